//! The ingestion pipeline: detect, resolve geometry, decode.

use lethe_core::prelude::*;

use crate::{
    CodecError, bitmap,
    decoder::decode_frame,
    detect::{Detection, detect_format},
    resolve::infer_resolution,
};

/// Terminal states of one normalization attempt.
#[derive(Debug)]
pub enum Outcome {
    /// Raw or legacy bytes decoded into a canonical buffer.
    Decoded {
        format: PixelFormat,
        buffer: CanonicalPixelBuffer,
    },
    /// Standard compressed format; the bytes were left untouched for a
    /// downstream decoder (see [`crate::standard`]).
    PassThrough,
    /// A raw layout was recognized, but no geometry was declared and none
    /// could be inferred from the byte count.
    UnknownResolution(PixelFormat),
}

/// What [`normalize`] hands back: the outcome plus every warning collected
/// along the way. Warnings never abort a decode; an input that produces
/// them still yields a full-size buffer.
#[derive(Debug)]
pub struct IngestResult {
    pub outcome: Outcome,
    pub warnings: Warnings,
}

/// Normalize one input described by `desc`.
///
/// Detection picks the interpretation, declared dimensions win over
/// inference, and the legacy bitmap path skips geometry resolution entirely
/// because the container header carries its own.
///
/// # Example
/// ```rust
/// use lethe_codec::prelude::*;
///
/// let desc = RawImageDescriptor::new("uyvy").with_dimensions(2, 1);
/// let result = normalize(&[128, 235, 128, 235], &desc)?;
/// assert!(matches!(
///     result.outcome,
///     Outcome::Decoded { format: PixelFormat::Uyvy, .. }
/// ));
/// # Ok::<(), lethe_codec::CodecError>(())
/// ```
pub fn normalize(data: &[u8], desc: &RawImageDescriptor) -> Result<IngestResult, CodecError> {
    let mut warnings = Warnings::new();
    let format = match detect_format(desc, &mut warnings) {
        Detection::PassThrough => {
            log::debug!(
                "extension {:?} is a standard format, passing {} bytes through",
                desc.extension,
                data.len()
            );
            return Ok(finish(Outcome::PassThrough, warnings));
        }
        Detection::Format(format) => format,
    };

    if format == PixelFormat::LegacyBitmap {
        let buffer = bitmap::decode(data)?;
        log::debug!("bitmap decoded at {}", buffer.resolution());
        return Ok(finish(
            Outcome::Decoded { format, buffer },
            warnings,
        ));
    }

    let resolution = desc
        .declared_resolution()
        .or_else(|| infer_resolution(data.len() as u64, format));
    let Some(resolution) = resolution else {
        log::debug!("{format}: {} bytes match no known geometry", data.len());
        return Ok(finish(Outcome::UnknownResolution(format), warnings));
    };

    let buffer = decode_frame(format, data, resolution, &mut warnings)?;
    log::debug!("{format} decoded at {resolution}");
    Ok(finish(Outcome::Decoded { format, buffer }, warnings))
}

fn finish(outcome: Outcome, warnings: Warnings) -> IngestResult {
    for warning in &warnings {
        log::warn!("{warning}");
    }
    IngestResult { outcome, warnings }
}
