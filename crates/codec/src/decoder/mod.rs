//! Per-format decode dispatch.

pub mod raw;

use lethe_core::prelude::*;

use crate::{CodecError, bitmap};

/// Decode `data` as `format` into a canonical buffer.
///
/// One exhaustive dispatch over the closed format set, so adding a variant
/// is a compile error until it gets an arm here. The raw arms fail only
/// when the canonical buffer for `resolution` cannot exist in memory;
/// undersized input truncates and reports through `warnings`. The legacy
/// bitmap arm parses the container instead; its geometry comes from the
/// file header and `resolution` is ignored there.
///
/// # Example
/// ```rust
/// use lethe_codec::prelude::*;
///
/// let resolution = Resolution::new(2, 1).unwrap();
/// let mut warnings = Warnings::new();
/// let buffer = decode_frame(
///     PixelFormat::Uyvy,
///     &[128, 235, 128, 235],
///     resolution,
///     &mut warnings,
/// )?;
/// assert_eq!(buffer.len(), 8);
/// assert!(warnings.is_empty());
/// # Ok::<(), lethe_codec::CodecError>(())
/// ```
pub fn decode_frame(
    format: PixelFormat,
    data: &[u8],
    resolution: Resolution,
    warnings: &mut Warnings,
) -> Result<CanonicalPixelBuffer, CodecError> {
    let decoded = match format {
        PixelFormat::Uyvy => raw::decode_uyvy(data, resolution, warnings),
        PixelFormat::Yuy2 => raw::decode_yuy2(data, resolution, warnings),
        PixelFormat::Nv21 => raw::decode_nv21(data, resolution, warnings),
        PixelFormat::Rgb24 => raw::decode_rgb24(data, resolution, warnings),
        PixelFormat::Bgr24 => raw::decode_bgr24(data, resolution, warnings),
        PixelFormat::Rgba32 => raw::decode_rgba32(data, resolution, warnings),
        PixelFormat::Bgra32 => raw::decode_bgra32(data, resolution, warnings),
        PixelFormat::LegacyBitmap => return Ok(bitmap::decode(data)?),
    };
    decoded.ok_or(CodecError::OversizedFrame { resolution })
}
