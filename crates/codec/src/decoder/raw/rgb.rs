//! Decoders for RGB layouts already in canonical channel order.

use lethe_core::prelude::*;

use crate::decoder::raw::warn_if_short;

/// Copy tightly packed `R, G, B` triplets into a canonical RGB buffer.
pub fn decode_rgb24(
    data: &[u8],
    resolution: Resolution,
    warnings: &mut Warnings,
) -> Option<CanonicalPixelBuffer> {
    copy_prefix(data, resolution, PixelFormat::Rgb24, warnings)
}

/// Copy tightly packed `R, G, B, A` quads into a canonical RGBA buffer.
/// Alpha passes through untouched.
pub fn decode_rgba32(
    data: &[u8],
    resolution: Resolution,
    warnings: &mut Warnings,
) -> Option<CanonicalPixelBuffer> {
    copy_prefix(data, resolution, PixelFormat::Rgba32, warnings)
}

/// The bytes are already in canonical order, so decoding is a bounded copy:
/// as much of the frame as the input covers, the rest left zeroed. Returns
/// `None` only when the canonical byte length for `resolution` overflows
/// addressing.
fn copy_prefix(
    data: &[u8],
    resolution: Resolution,
    format: PixelFormat,
    warnings: &mut Warnings,
) -> Option<CanonicalPixelBuffer> {
    warn_if_short(format, resolution, data, warnings);
    let mut out = CanonicalPixelBuffer::zeroed(resolution, format.canonical_layout())?;
    let dst = out.data_mut();
    let copy_len = data.len().min(dst.len());
    dst[..copy_len].copy_from_slice(&data[..copy_len]);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn res(width: u32, height: u32) -> Resolution {
        Resolution::new(width, height).unwrap()
    }

    #[test]
    fn rgb24_is_a_straight_copy() {
        let mut warnings = Warnings::new();
        let out = decode_rgb24(&[1, 2, 3, 4, 5, 6], res(2, 1), &mut warnings).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(out.channel_count(), 3);
        assert_eq!(out.data(), [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn rgba32_keeps_source_alpha() {
        let mut warnings = Warnings::new();
        let out = decode_rgba32(&[10, 20, 30, 7, 40, 50, 60, 0], res(2, 1), &mut warnings).unwrap();
        assert_eq!(out.pixel(0, 0).unwrap(), [10, 20, 30, 7]);
        assert_eq!(out.pixel(1, 0).unwrap(), [40, 50, 60, 0]);
    }

    #[test]
    fn short_input_zero_fills_the_tail() {
        let mut warnings = Warnings::new();
        let out = decode_rgb24(&[9, 8, 7, 6], res(2, 2), &mut warnings).unwrap();
        assert_eq!(
            warnings.as_slice(),
            [DecodeWarning::BufferTooSmall {
                expected: 12,
                actual: 4
            }]
        );
        assert_eq!(out.data(), [9, 8, 7, 6, 0, 0, 0, 0, 0, 0, 0, 0]);
    }
}
