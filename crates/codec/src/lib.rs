#![doc = include_str!("../README.md")]

pub mod bitmap;
pub mod decoder;
pub mod detect;
pub mod normalize;
pub mod resolve;
#[cfg(feature = "image")]
pub mod standard;

use lethe_core::format::Resolution;

/// Fatal failures surfaced by the engine.
///
/// Everything non-fatal travels as [`lethe_core::diag::DecodeWarning`]
/// values on the result instead.
///
/// # Example
/// ```rust
/// use lethe_codec::CodecError;
///
/// let err = CodecError::ChannelMismatch {
///     expected: 4,
///     actual: 3,
/// };
/// assert!(matches!(err, CodecError::ChannelMismatch { .. }));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The legacy bitmap container rejected the input.
    #[error("legacy bitmap decode failed: {0}")]
    Bitmap(#[from] bitmap::BitmapError),
    /// An encoder was handed a buffer with the wrong channel layout.
    #[error("channel layout mismatch: expected {expected} channels, got {actual}")]
    ChannelMismatch {
        /// Channels the operation requires.
        expected: usize,
        /// Channels the buffer actually has.
        actual: usize,
    },
    /// A resolution whose canonical buffer cannot exist in memory.
    #[error("canonical buffer for {resolution} would overflow addressable memory")]
    OversizedFrame {
        /// The geometry that was refused.
        resolution: Resolution,
    },
    /// The standard-format bridge could not decode pass-through bytes.
    #[error("standard decode failed: {0}")]
    Standard(String),
}

pub mod prelude {
    pub use lethe_core::prelude::*;

    pub use crate::{
        CodecError,
        bitmap::{AlphaPolicy, BitmapError},
        decoder::{decode_frame, raw::yuv_to_rgb},
        detect::{Detection, detect_format},
        normalize::{IngestResult, Outcome, normalize},
        resolve::{FUZZY_BYTE_TOLERANCE, RESOLUTION_CANDIDATES, infer_resolution},
    };
}
