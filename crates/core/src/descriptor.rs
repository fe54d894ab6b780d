use std::path::Path;

use crate::format::Resolution;

/// Caller-supplied facts about one incoming byte buffer.
///
/// Created fresh per request and never persisted. Everything is optional
/// except the filename extension, which drives format detection; the byte
/// length travels as the input slice itself.
///
/// # Example
/// ```rust
/// use lethe_core::prelude::RawImageDescriptor;
///
/// let desc = RawImageDescriptor::from_path("frames/dump_0042.nv21")
///     .with_dimensions(1280, 720);
/// assert_eq!(desc.normalized_extension(), "nv21");
/// assert!(desc.declared_resolution().is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "snake_case"))]
pub struct RawImageDescriptor {
    /// Filename extension, with or without the leading dot.
    pub extension: String,
    /// Width the caller already knows, if any.
    pub declared_width: Option<u32>,
    /// Height the caller already knows, if any.
    pub declared_height: Option<u32>,
    /// Pixel-format hint exactly as supplied, e.g. `"nv21"`.
    pub pixel_format: Option<String>,
}

impl RawImageDescriptor {
    /// Descriptor with just an extension.
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            ..Self::default()
        }
    }

    /// Descriptor for a file path, taking the extension from its final
    /// component (empty when the path has none).
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let extension = path
            .as_ref()
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(extension)
    }

    /// Attach caller-known dimensions.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.declared_width = Some(width);
        self.declared_height = Some(height);
        self
    }

    /// Attach a pixel-format hint.
    pub fn with_pixel_format(mut self, hint: impl Into<String>) -> Self {
        self.pixel_format = Some(hint.into());
        self
    }

    /// Declared geometry, present only when both dimensions are supplied and
    /// non-zero. Zero dimensions count as unsupplied.
    pub fn declared_resolution(&self) -> Option<Resolution> {
        match (self.declared_width, self.declared_height) {
            (Some(width), Some(height)) => Resolution::new(width, height),
            _ => None,
        }
    }

    /// Extension lowercased, without a leading dot.
    pub fn normalized_extension(&self) -> String {
        self.extension.trim_start_matches('.').to_ascii_lowercase()
    }

    /// The hint with surrounding whitespace removed; an empty hint counts
    /// as no hint at all.
    pub fn format_hint(&self) -> Option<&str> {
        self.pixel_format
            .as_deref()
            .map(str::trim)
            .filter(|hint| !hint.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_from_path() {
        assert_eq!(
            RawImageDescriptor::from_path("uploads/cam0.UYVY").normalized_extension(),
            "uyvy"
        );
        assert_eq!(RawImageDescriptor::from_path("noext").extension, "");
        assert_eq!(RawImageDescriptor::new(".BMP").normalized_extension(), "bmp");
    }

    #[test]
    fn declared_resolution_requires_both_nonzero() {
        let desc = RawImageDescriptor::new("yuv").with_dimensions(640, 480);
        assert!(desc.declared_resolution().is_some());

        let partial = RawImageDescriptor {
            declared_width: Some(640),
            ..RawImageDescriptor::new("yuv")
        };
        assert_eq!(partial.declared_resolution(), None);

        let zero = RawImageDescriptor::new("yuv").with_dimensions(640, 0);
        assert_eq!(zero.declared_resolution(), None);
    }

    #[test]
    fn blank_hint_is_no_hint() {
        let desc = RawImageDescriptor::new("raw").with_pixel_format("  ");
        assert_eq!(desc.format_hint(), None);
        let desc = RawImageDescriptor::new("raw").with_pixel_format("NV21");
        assert_eq!(desc.format_hint(), Some("NV21"));
    }
}
