//! Legacy Windows bitmap codec.
//!
//! Decoding runs in two layers: [`parse`] turns the container into flat
//! `(A, B, G, R)` samples, then this module applies the opacity correction
//! and reorders into canonical RGBA. Encoding is the inverse reorder plus a
//! 32-bit bottom-up writer.

mod parse;

use lethe_core::prelude::*;

use crate::CodecError;
use parse::{header_representable, read_bitmap, write_bitmap};

/// Failures while reading bitmap bytes. Unlike the raw formats, a broken
/// container is fatal rather than a warning: there is no geometry to fall
/// back on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BitmapError {
    /// Input ends before the structure it promises.
    #[error("truncated bitmap: need {need} bytes, have {have}")]
    Truncated { need: usize, have: usize },
    /// Missing the `BM` signature.
    #[error("not a bitmap: bad signature")]
    BadSignature,
    /// Header variant, bit depth, or compression outside the supported set.
    #[error("unsupported bitmap: {0}")]
    Unsupported(&'static str),
    /// Zero or negative width, zero height, or dimensions that overflow
    /// addressing.
    #[error("invalid bitmap dimensions {width}x{height}")]
    BadDimensions { width: i32, height: i32 },
}

/// Alpha handling when encoding canonical pixels back to bitmap bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlphaPolicy {
    /// Copy canonical alpha through unmodified.
    #[default]
    Preserve,
    /// Write every alpha byte as 255, for buffers whose alpha was
    /// synthesized earlier in the pipeline.
    ForceOpaque,
}

/// Decode bitmap bytes into a canonical RGBA buffer.
///
/// When the alpha channel's maximum over the whole image is zero the data
/// is taken for padded 24-bit (or BGRX) content and comes back fully
/// opaque. A genuinely all-transparent 32-bit source is indistinguishable
/// from that and comes back opaque too.
pub fn decode(data: &[u8]) -> Result<CanonicalPixelBuffer, BitmapError> {
    let parsed = read_bitmap(data)?;
    let Some(resolution) = Resolution::new(parsed.width, parsed.height) else {
        return Err(BitmapError::BadDimensions {
            width: parsed.width as i32,
            height: parsed.height as i32,
        });
    };

    let max_alpha = parsed.abgr.iter().step_by(4).copied().max().unwrap_or(0);
    let force_opaque = max_alpha == 0;

    let Some(mut out) = CanonicalPixelBuffer::zeroed(resolution, ChannelLayout::Rgba) else {
        return Err(BitmapError::BadDimensions {
            width: parsed.width as i32,
            height: parsed.height as i32,
        });
    };
    for (dst, src) in out
        .data_mut()
        .chunks_exact_mut(4)
        .zip(parsed.abgr.chunks_exact(4))
    {
        dst[0] = src[3];
        dst[1] = src[2];
        dst[2] = src[1];
        dst[3] = if force_opaque { 255 } else { src[0] };
    }
    Ok(out)
}

/// Encode a canonical RGBA buffer as bitmap bytes.
///
/// Three-channel buffers are refused; convert to RGBA first. Geometry that
/// the header's 32-bit size fields cannot express is refused as well.
pub fn encode(buffer: &CanonicalPixelBuffer, policy: AlphaPolicy) -> Result<Vec<u8>, CodecError> {
    if buffer.layout() != ChannelLayout::Rgba {
        return Err(CodecError::ChannelMismatch {
            expected: 4,
            actual: buffer.channel_count(),
        });
    }
    if !header_representable(buffer.width(), buffer.height()) {
        return Err(BitmapError::Unsupported("image too large for the header's size fields").into());
    }

    let mut abgr = vec![0u8; buffer.len()];
    for (dst, src) in abgr.chunks_exact_mut(4).zip(buffer.data().chunks_exact(4)) {
        dst[0] = match policy {
            AlphaPolicy::Preserve => src[3],
            AlphaPolicy::ForceOpaque => 255,
        };
        dst[1] = src[2];
        dst[2] = src[1];
        dst[3] = src[0];
    }
    Ok(write_bitmap(buffer.width(), buffer.height(), &abgr))
}
