use lethe_core::prelude::*;

/// Standard compressed-image extensions. These always bypass the engine and
/// go to whatever standard decoder the caller embeds.
const STANDARD_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "tif", "tiff", "avif", "ico", "svg",
];

/// Route chosen for one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    /// Raw or legacy layout this engine decodes itself.
    Format(PixelFormat),
    /// Standard compressed image; hand the bytes off untouched.
    PassThrough,
}

/// Pick the decode route for a descriptor.
///
/// Precedence: standard extensions bypass everything; otherwise an explicit
/// hint decides (an unparseable hint consumes its slot and falls back to
/// UYVY with a warning); otherwise the extension table; otherwise
/// pass-through.
///
/// # Example
/// ```rust
/// use lethe_codec::prelude::*;
///
/// let mut warnings = Warnings::new();
/// let desc = RawImageDescriptor::new("nv21");
/// assert_eq!(
///     detect_format(&desc, &mut warnings),
///     Detection::Format(PixelFormat::Nv21),
/// );
/// ```
pub fn detect_format(desc: &RawImageDescriptor, warnings: &mut Warnings) -> Detection {
    let extension = desc.normalized_extension();
    if STANDARD_EXTENSIONS.contains(&extension.as_str()) {
        return Detection::PassThrough;
    }

    if let Some(hint) = desc.format_hint() {
        return match hint.parse::<PixelFormat>() {
            Ok(format) => Detection::Format(format),
            Err(_) => {
                warnings.push(DecodeWarning::UnsupportedPixelFormat {
                    hint: hint.to_owned(),
                });
                Detection::Format(PixelFormat::Uyvy)
            }
        };
    }

    match extension_format(&extension) {
        Some(format) => Detection::Format(format),
        None => Detection::PassThrough,
    }
}

/// Fixed extension → format table. The first row is the implicit-raw set
/// that defaults to UYVY when nothing more specific applies.
fn extension_format(extension: &str) -> Option<PixelFormat> {
    match extension {
        "uyvy" | "yuv" | "raw" | "bin" => Some(PixelFormat::Uyvy),
        "nv21" => Some(PixelFormat::Nv21),
        "rgb" => Some(PixelFormat::Rgb24),
        "bgr" => Some(PixelFormat::Bgr24),
        "rgba" => Some(PixelFormat::Rgba32),
        "bgra" => Some(PixelFormat::Bgra32),
        "bmp" => Some(PixelFormat::LegacyBitmap),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(desc: &RawImageDescriptor) -> (Detection, Warnings) {
        let mut warnings = Warnings::new();
        let detection = detect_format(desc, &mut warnings);
        (detection, warnings)
    }

    #[test]
    fn extension_table_routes() {
        for (ext, format) in [
            ("uyvy", PixelFormat::Uyvy),
            ("yuv", PixelFormat::Uyvy),
            ("raw", PixelFormat::Uyvy),
            ("bin", PixelFormat::Uyvy),
            ("nv21", PixelFormat::Nv21),
            ("rgb", PixelFormat::Rgb24),
            ("bgr", PixelFormat::Bgr24),
            ("rgba", PixelFormat::Rgba32),
            ("bgra", PixelFormat::Bgra32),
            ("bmp", PixelFormat::LegacyBitmap),
        ] {
            let (detection, warnings) = detect(&RawImageDescriptor::new(ext));
            assert_eq!(detection, Detection::Format(format), "extension {ext}");
            assert!(warnings.is_empty());
        }
    }

    #[test]
    fn hint_beats_extension() {
        let desc = RawImageDescriptor::new("rgb").with_pixel_format("nv21");
        let (detection, warnings) = detect(&desc);
        assert_eq!(detection, Detection::Format(PixelFormat::Nv21));
        assert!(warnings.is_empty());
    }

    #[test]
    fn hint_overrides_bitmap_extension() {
        let desc = RawImageDescriptor::new("bmp").with_pixel_format("rgba");
        let (detection, _) = detect(&desc);
        assert_eq!(detection, Detection::Format(PixelFormat::Rgba32));
    }

    #[test]
    fn bad_hint_falls_back_to_uyvy_not_the_table() {
        let desc = RawImageDescriptor::new("nv21").with_pixel_format("yv12");
        let (detection, warnings) = detect(&desc);
        assert_eq!(detection, Detection::Format(PixelFormat::Uyvy));
        assert_eq!(
            warnings.as_slice(),
            [DecodeWarning::UnsupportedPixelFormat {
                hint: "yv12".into()
            }]
        );
    }

    #[test]
    fn hint_forces_raw_for_unknown_extension() {
        let desc = RawImageDescriptor::new("dat").with_pixel_format("nv21");
        let (detection, _) = detect(&desc);
        assert_eq!(detection, Detection::Format(PixelFormat::Nv21));
    }

    #[test]
    fn standard_extension_bypasses_even_with_hint() {
        let desc = RawImageDescriptor::new("jpg").with_pixel_format("nv21");
        let (detection, warnings) = detect(&desc);
        assert_eq!(detection, Detection::PassThrough);
        assert!(warnings.is_empty());
    }

    #[test]
    fn unknown_extension_passes_through() {
        let (detection, warnings) = detect(&RawImageDescriptor::new("dat"));
        assert_eq!(detection, Detection::PassThrough);
        assert!(warnings.is_empty());
    }

    #[test]
    fn extension_is_normalized_before_lookup() {
        let (detection, _) = detect(&RawImageDescriptor::new(".UYVY"));
        assert_eq!(detection, Detection::Format(PixelFormat::Uyvy));
    }
}
