use smallvec::SmallVec;

/// Non-fatal conditions observed while normalizing one input.
///
/// Decode results carry these as data instead of writing to a global log
/// stream; the embedding boundary decides what to do with them. Fatal
/// conditions live in the codec crate's error type, not here.
///
/// # Example
/// ```rust
/// use lethe_core::prelude::DecodeWarning;
///
/// let warning = DecodeWarning::BufferTooSmall { expected: 16, actual: 12 };
/// assert!(warning.to_string().contains("16"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DecodeWarning {
    /// Input shorter than the format/resolution combination requires; the
    /// decode truncated and the rest of the buffer stayed zeroed.
    #[error("input holds {actual} bytes where the geometry needs {expected}")]
    BufferTooSmall {
        /// Bytes the resolved geometry calls for.
        expected: u64,
        /// Bytes actually supplied.
        actual: u64,
    },
    /// The caller's hint named a format outside the decoder set; the default
    /// UYVY interpretation was used instead.
    #[error("unsupported pixel format hint {hint:?}, assuming uyvy")]
    UnsupportedPixelFormat {
        /// The hint exactly as supplied.
        hint: String,
    },
}

/// Warning list carried alongside a decode result.
///
/// Inline capacity of two covers the common cases without allocating.
pub type Warnings = SmallVec<[DecodeWarning; 2]>;
