//! Raw format decoders (pixel format conversions).

use lethe_core::prelude::*;

pub mod bgr;
pub mod nv21;
pub mod packed422;
pub mod rgb;

pub use bgr::{decode_bgr24, decode_bgra32};
pub use nv21::decode_nv21;
pub use packed422::{decode_uyvy, decode_yuy2};
pub use rgb::{decode_rgb24, decode_rgba32};

/// BT.601 limited-range integer conversion with clamping.
///
/// Alpha is never produced here; decoders that want an alpha channel write
/// `255` themselves after converting.
///
/// # Example
/// ```rust
/// use lethe_codec::decoder::raw::yuv_to_rgb;
///
/// // Y=235 is reference white in limited range.
/// assert_eq!(yuv_to_rgb(235, 128, 128), (255, 255, 255));
/// assert_eq!(yuv_to_rgb(16, 128, 128), (0, 0, 0));
/// ```
#[inline(always)]
pub fn yuv_to_rgb(y: i32, u: i32, v: i32) -> (u8, u8, u8) {
    let c = y - 16;
    let d = u - 128;
    let e = v - 128;
    let r = (298 * c + 409 * e + 128) >> 8;
    let g = (298 * c - 100 * d - 208 * e + 128) >> 8;
    let b = (298 * c + 516 * d + 128) >> 8;
    (
        r.clamp(0, 255) as u8,
        g.clamp(0, 255) as u8,
        b.clamp(0, 255) as u8,
    )
}

/// Record a single `BufferTooSmall` warning when `data` cannot cover a full
/// frame of `format` at `resolution`.
pub(crate) fn warn_if_short(
    format: PixelFormat,
    resolution: Resolution,
    data: &[u8],
    warnings: &mut Warnings,
) {
    if let Some(expected) = format.frame_bytes(resolution)
        && (data.len() as u64) < expected
    {
        warnings.push(DecodeWarning::BufferTooSmall {
            expected,
            actual: data.len() as u64,
        });
    }
}
