use std::{fmt, num::NonZeroU32, str::FromStr};

/// Pixel layout of an incoming byte stream.
///
/// Closed set: every consumer dispatches with an exhaustive `match`, so
/// adding a layout is a compile-time-enforced change across the detector,
/// the decoder set, and the geometry tables.
///
/// # Example
/// ```rust
/// use lethe_core::prelude::PixelFormat;
///
/// let format: PixelFormat = "NV21".parse().unwrap();
/// assert_eq!(format, PixelFormat::Nv21);
/// assert!(format.is_raw());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PixelFormat {
    /// Packed 4:2:2, byte order `U, Y0, V, Y1`.
    Uyvy,
    /// Packed 4:2:2, byte order `Y0, U, Y1, V`.
    Yuy2,
    /// Semi-planar 4:2:0: full-resolution luma plane followed by an
    /// interleaved `V, U` chroma plane subsampled 2x2.
    Nv21,
    /// Tightly packed `R, G, B` triplets.
    Rgb24,
    /// Tightly packed `B, G, R` triplets.
    Bgr24,
    /// Tightly packed `R, G, B, A` quads.
    Rgba32,
    /// Tightly packed `B, G, R, A` quads.
    Bgra32,
    /// Windows bitmap container; geometry comes from its header.
    LegacyBitmap,
}

impl PixelFormat {
    /// Whether this is a headerless raw dump (everything but the bitmap).
    pub const fn is_raw(self) -> bool {
        !matches!(self, PixelFormat::LegacyBitmap)
    }

    /// Encoded bytes per pixel as a `(bytes, pixels)` rational, so the
    /// 1.5 byte/pixel NV21 case stays in integer math.
    const fn byte_ratio(self) -> Option<(u64, u64)> {
        match self {
            PixelFormat::Uyvy | PixelFormat::Yuy2 => Some((2, 1)),
            PixelFormat::Nv21 => Some((3, 2)),
            PixelFormat::Rgb24 | PixelFormat::Bgr24 => Some((3, 1)),
            PixelFormat::Rgba32 | PixelFormat::Bgra32 => Some((4, 1)),
            PixelFormat::LegacyBitmap => None,
        }
    }

    /// Encoded byte length of a full frame at `resolution`.
    ///
    /// `None` for [`PixelFormat::LegacyBitmap`], whose container carries its
    /// own geometry.
    ///
    /// # Example
    /// ```rust
    /// use lethe_core::prelude::{PixelFormat, Resolution};
    ///
    /// let res = Resolution::new(4, 4).unwrap();
    /// assert_eq!(PixelFormat::Nv21.frame_bytes(res), Some(24));
    /// assert_eq!(PixelFormat::Uyvy.frame_bytes(res), Some(32));
    /// ```
    pub const fn frame_bytes(self, resolution: Resolution) -> Option<u64> {
        match self.byte_ratio() {
            Some((bytes, pixels)) => {
                Some(resolution.pixel_count().saturating_mul(bytes) / pixels)
            }
            None => None,
        }
    }

    /// Number of whole pixels encoded in `byte_len` bytes.
    pub const fn pixels_in(self, byte_len: u64) -> Option<u64> {
        match self.byte_ratio() {
            Some((bytes, pixels)) => Some(byte_len.saturating_mul(pixels) / bytes),
            None => None,
        }
    }

    /// Channel layout of the canonical buffer this format decodes into.
    ///
    /// YUV sources gain a synthetic opaque alpha channel; three-channel RGB
    /// sources stay three-channel.
    pub const fn canonical_layout(self) -> ChannelLayout {
        match self {
            PixelFormat::Rgb24 | PixelFormat::Bgr24 => ChannelLayout::Rgb,
            PixelFormat::Uyvy
            | PixelFormat::Yuy2
            | PixelFormat::Nv21
            | PixelFormat::Rgba32
            | PixelFormat::Bgra32
            | PixelFormat::LegacyBitmap => ChannelLayout::Rgba,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PixelFormat::Uyvy => "uyvy",
            PixelFormat::Yuy2 => "yuy2",
            PixelFormat::Nv21 => "nv21",
            PixelFormat::Rgb24 => "rgb24",
            PixelFormat::Bgr24 => "bgr24",
            PixelFormat::Rgba32 => "rgba32",
            PixelFormat::Bgra32 => "bgra32",
            PixelFormat::LegacyBitmap => "bitmap",
        };
        write!(f, "{name}")
    }
}

impl FromStr for PixelFormat {
    type Err = String;

    /// Parse a caller-supplied hint. Case-insensitive; covers the raw
    /// layouts and their short aliases. The bitmap path is chosen by
    /// extension, never by hint, so `"bitmap"` does not parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uyvy" => Ok(PixelFormat::Uyvy),
            "yuy2" | "yuyv" => Ok(PixelFormat::Yuy2),
            "nv21" => Ok(PixelFormat::Nv21),
            "rgb24" | "rgb" => Ok(PixelFormat::Rgb24),
            "bgr24" | "bgr" => Ok(PixelFormat::Bgr24),
            "rgba32" | "rgba" => Ok(PixelFormat::Rgba32),
            "bgra32" | "bgra" => Ok(PixelFormat::Bgra32),
            _ => Err(format!("unrecognized pixel format {s:?}")),
        }
    }
}

/// Channel layout of a canonical buffer: plain RGB or RGB plus alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChannelLayout {
    /// Three bytes per pixel: `R, G, B`.
    Rgb,
    /// Four bytes per pixel: `R, G, B, A`.
    Rgba,
}

impl ChannelLayout {
    /// Bytes (and channels) per pixel: 3 or 4.
    pub const fn channel_count(self) -> usize {
        match self {
            ChannelLayout::Rgb => 3,
            ChannelLayout::Rgba => 4,
        }
    }
}

/// Color space tag on a canonical buffer.
///
/// YUV inputs are converted with BT.601 coefficients on entry, so every
/// buffer leaving the pipeline is sRGB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ColorSpace {
    /// Standard sRGB.
    #[default]
    Srgb,
}

/// Resolution of a frame.
///
/// # Example
/// ```rust
/// use lethe_core::prelude::Resolution;
///
/// let res = Resolution::new(640, 480).unwrap();
/// assert_eq!(res.width.get(), 640);
/// assert!(Resolution::new(0, 480).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution {
    /// Width in pixels (non-zero).
    pub width: NonZeroU32,
    /// Height in pixels (non-zero).
    pub height: NonZeroU32,
}

impl Resolution {
    /// Create a resolution, returning `None` if width or height are zero.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            width: NonZeroU32::new(width)?,
            height: NonZeroU32::new(height)?,
        })
    }

    /// Total pixel count, `width * height`.
    pub const fn pixel_count(self) -> u64 {
        self.width.get() as u64 * self.height.get() as u64
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_aliases_and_case() {
        assert_eq!("UYVY".parse::<PixelFormat>(), Ok(PixelFormat::Uyvy));
        assert_eq!("yuyv".parse::<PixelFormat>(), Ok(PixelFormat::Yuy2));
        assert_eq!(" rgba ".parse::<PixelFormat>(), Ok(PixelFormat::Rgba32));
        assert_eq!("bgr".parse::<PixelFormat>(), Ok(PixelFormat::Bgr24));
    }

    #[test]
    fn parse_rejects_bitmap_and_unknown() {
        assert!("bitmap".parse::<PixelFormat>().is_err());
        assert!("yv12".parse::<PixelFormat>().is_err());
        assert!("".parse::<PixelFormat>().is_err());
    }

    #[test]
    fn frame_bytes_per_format() {
        let res = Resolution::new(640, 480).unwrap();
        assert_eq!(PixelFormat::Uyvy.frame_bytes(res), Some(614_400));
        assert_eq!(PixelFormat::Nv21.frame_bytes(res), Some(460_800));
        assert_eq!(PixelFormat::Rgb24.frame_bytes(res), Some(921_600));
        assert_eq!(PixelFormat::Bgra32.frame_bytes(res), Some(1_228_800));
        assert_eq!(PixelFormat::LegacyBitmap.frame_bytes(res), None);
    }

    #[test]
    fn pixels_in_floors_fractional_nv21() {
        // 10 bytes at 1.5 bytes/pixel is 6.67 pixels; whole pixels only.
        assert_eq!(PixelFormat::Nv21.pixels_in(10), Some(6));
        assert_eq!(PixelFormat::Uyvy.pixels_in(10), Some(5));
        assert_eq!(PixelFormat::LegacyBitmap.pixels_in(10), None);
    }

    #[test]
    fn canonical_layouts() {
        assert_eq!(PixelFormat::Rgb24.canonical_layout(), ChannelLayout::Rgb);
        assert_eq!(PixelFormat::Bgr24.canonical_layout(), ChannelLayout::Rgb);
        assert_eq!(PixelFormat::Uyvy.canonical_layout(), ChannelLayout::Rgba);
        assert_eq!(
            PixelFormat::LegacyBitmap.canonical_layout(),
            ChannelLayout::Rgba
        );
    }
}
