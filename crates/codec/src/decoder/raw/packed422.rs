//! Packed 4:2:2 YUV decoders (UYVY, YUY2).

use lethe_core::prelude::*;

use crate::decoder::raw::{warn_if_short, yuv_to_rgb};

/// Decode packed 4:2:2 bytes ordered `U, Y0, V, Y1` into canonical RGBA.
pub fn decode_uyvy(
    data: &[u8],
    resolution: Resolution,
    warnings: &mut Warnings,
) -> Option<CanonicalPixelBuffer> {
    decode_packed422(data, resolution, PixelFormat::Uyvy, [1, 0, 3, 2], warnings)
}

/// Decode packed 4:2:2 bytes ordered `Y0, U, Y1, V` into canonical RGBA.
pub fn decode_yuy2(
    data: &[u8],
    resolution: Resolution,
    warnings: &mut Warnings,
) -> Option<CanonicalPixelBuffer> {
    decode_packed422(data, resolution, PixelFormat::Yuy2, [0, 1, 2, 3], warnings)
}

/// Shared 4:2:2 loop. `byte_order` gives the offsets of `[y0, u, y1, v]`
/// within each 4-byte group; every group carries two pixels sharing one
/// chroma pair. Decoding stops at the last complete group, leaving any
/// remaining pixels zeroed (alpha included), and an undersized input is
/// reported through `warnings`. Returns `None` only when the canonical
/// byte length for `resolution` overflows addressing.
fn decode_packed422(
    data: &[u8],
    resolution: Resolution,
    format: PixelFormat,
    byte_order: [usize; 4],
    warnings: &mut Warnings,
) -> Option<CanonicalPixelBuffer> {
    warn_if_short(format, resolution, data, warnings);
    let mut out = CanonicalPixelBuffer::zeroed(resolution, ChannelLayout::Rgba)?;
    let total_pixels = resolution.pixel_count() as usize;
    let full_pairs = (data.len() / 4).min(total_pixels / 2);
    let dst = out.data_mut();
    for pair in 0..full_pairs {
        let group = &data[pair * 4..pair * 4 + 4];
        let y0 = group[byte_order[0]] as i32;
        let u = group[byte_order[1]] as i32;
        let y1 = group[byte_order[2]] as i32;
        let v = group[byte_order[3]] as i32;
        let di = pair * 8;
        let (r, g, b) = yuv_to_rgb(y0, u, v);
        dst[di..di + 4].copy_from_slice(&[r, g, b, 255]);
        let (r, g, b) = yuv_to_rgb(y1, u, v);
        dst[di + 4..di + 8].copy_from_slice(&[r, g, b, 255]);
    }
    // An odd pixel total ends on a half-used group.
    if total_pixels % 2 == 1 {
        let si = (total_pixels / 2) * 4;
        if let Some(group) = data.get(si..si + 4) {
            let (r, g, b) = yuv_to_rgb(
                group[byte_order[0]] as i32,
                group[byte_order[1]] as i32,
                group[byte_order[3]] as i32,
            );
            let di = (total_pixels - 1) * 4;
            dst[di..di + 4].copy_from_slice(&[r, g, b, 255]);
        }
    }
    Some(out)
}
