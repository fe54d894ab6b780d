//! Bridge between pass-through bytes and the `image` crate.
//!
//! Nothing in the pipeline calls this: [`crate::normalize::normalize`]
//! deliberately returns standard formats untouched. It exists for callers
//! that want the pass-through realized into the same canonical buffer the
//! raw paths produce.

use image::DynamicImage;
use lethe_core::prelude::*;

use crate::CodecError;

/// Decode standard-format bytes (PNG, JPEG, and the rest of what the
/// `image` crate detects) into a canonical RGBA buffer.
pub fn decode(data: &[u8]) -> Result<CanonicalPixelBuffer, CodecError> {
    let decoded =
        image::load_from_memory(data).map_err(|e| CodecError::Standard(e.to_string()))?;
    let rgba = decoded.into_rgba8();
    let Some(resolution) = Resolution::new(rgba.width(), rgba.height()) else {
        return Err(CodecError::Standard("image has no pixels".into()));
    };
    CanonicalPixelBuffer::from_vec(resolution, ChannelLayout::Rgba, rgba.into_raw())
        .ok_or_else(|| CodecError::Standard("decoded length mismatch".into()))
}

/// View a canonical buffer as a `DynamicImage` for further processing.
///
/// Returns `None` only if the geometry and byte count disagree, which
/// buffers built by this crate never do.
pub fn to_dynamic(buffer: &CanonicalPixelBuffer) -> Option<DynamicImage> {
    let (width, height) = (buffer.width(), buffer.height());
    let data = buffer.data().to_vec();
    match buffer.layout() {
        ChannelLayout::Rgb => {
            image::RgbImage::from_raw(width, height, data).map(DynamicImage::ImageRgb8)
        }
        ChannelLayout::Rgba => {
            image::RgbaImage::from_raw(width, height, data).map(DynamicImage::ImageRgba8)
        }
    }
}
