//! NV21 semi-planar 4:2:0 decoder.

use lethe_core::prelude::*;

use crate::decoder::raw::{warn_if_short, yuv_to_rgb};

/// Decode NV21 bytes into canonical RGBA: a full-resolution luma plane
/// followed by one interleaved chroma pair per 2x2 block, `v` at the even
/// offset and `u` right after it.
///
/// Running out of luma stops the decode and leaves the remaining pixels
/// zeroed; running out of chroma substitutes the neutral pair `(128, 128)`
/// so a partially captured frame comes out gray rather than failing.
/// Returns `None` only when the canonical byte length for `resolution`
/// overflows addressing.
pub fn decode_nv21(
    data: &[u8],
    resolution: Resolution,
    warnings: &mut Warnings,
) -> Option<CanonicalPixelBuffer> {
    warn_if_short(PixelFormat::Nv21, resolution, data, warnings);
    let mut out = CanonicalPixelBuffer::zeroed(resolution, ChannelLayout::Rgba)?;
    let width = resolution.width.get() as usize;
    let height = resolution.height.get() as usize;
    let y_size = width * height;
    let dst = out.data_mut();
    'rows: for row in 0..height {
        for col in 0..width {
            let yi = row * width + col;
            let Some(&y) = data.get(yi) else { break 'rows };
            let uv_index = y_size + (row / 2) * width + (col / 2) * 2;
            let (v, u) = match (data.get(uv_index), data.get(uv_index + 1)) {
                (Some(&v), Some(&u)) => (v, u),
                _ => (128, 128),
            };
            let (r, g, b) = yuv_to_rgb(y as i32, u as i32, v as i32);
            let di = yi * 4;
            dst[di..di + 4].copy_from_slice(&[r, g, b, 255]);
        }
    }
    Some(out)
}
