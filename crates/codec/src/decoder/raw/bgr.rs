//! Decoders for blue-first layouts (channel swap).

use lethe_core::prelude::*;

use crate::decoder::raw::warn_if_short;

/// Swap `B, G, R` triplets into a canonical RGB buffer.
pub fn decode_bgr24(
    data: &[u8],
    resolution: Resolution,
    warnings: &mut Warnings,
) -> Option<CanonicalPixelBuffer> {
    swap_red_blue(data, resolution, PixelFormat::Bgr24, warnings)
}

/// Swap `B, G, R, A` quads into a canonical RGBA buffer. Alpha passes
/// through untouched.
pub fn decode_bgra32(
    data: &[u8],
    resolution: Resolution,
    warnings: &mut Warnings,
) -> Option<CanonicalPixelBuffer> {
    swap_red_blue(data, resolution, PixelFormat::Bgra32, warnings)
}

/// Whole pixels only: a trailing partial pixel in the input is left zeroed
/// rather than half-copied. The input slice is never modified; the swap
/// always lands in a fresh buffer. Returns `None` only when the canonical
/// byte length for `resolution` overflows addressing.
fn swap_red_blue(
    data: &[u8],
    resolution: Resolution,
    format: PixelFormat,
    warnings: &mut Warnings,
) -> Option<CanonicalPixelBuffer> {
    warn_if_short(format, resolution, data, warnings);
    let mut out = CanonicalPixelBuffer::zeroed(resolution, format.canonical_layout())?;
    let channels = out.channel_count();
    for (dst_px, src_px) in out
        .data_mut()
        .chunks_exact_mut(channels)
        .zip(data.chunks_exact(channels))
    {
        dst_px[0] = src_px[2];
        dst_px[1] = src_px[1];
        dst_px[2] = src_px[0];
        if channels == 4 {
            dst_px[3] = src_px[3];
        }
    }
    Some(out)
}
