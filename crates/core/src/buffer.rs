use std::fmt;

use crate::format::{ChannelLayout, ColorSpace, Resolution};

/// Byte length a canonical buffer must have for the given geometry, or
/// `None` when that length does not fit the address space.
pub fn canonical_len(resolution: Resolution, layout: ChannelLayout) -> Option<usize> {
    let bytes = resolution
        .pixel_count()
        .checked_mul(layout.channel_count() as u64)?;
    usize::try_from(bytes).ok()
}

/// The one pixel shape every decode path produces and every downstream
/// stage consumes: row-major RGB(A) bytes plus geometry.
///
/// The length invariant `data.len() == width * height * channels` holds for
/// every constructed value. Buffers are freshly allocated, exclusively
/// owned, and moved between stages; no pooling, no sharing.
///
/// # Example
/// ```rust
/// use lethe_core::prelude::{CanonicalPixelBuffer, ChannelLayout, Resolution};
///
/// let res = Resolution::new(2, 2).unwrap();
/// let buf = CanonicalPixelBuffer::zeroed(res, ChannelLayout::Rgba).unwrap();
/// assert_eq!(buf.data().len(), 16);
/// assert_eq!(buf.channel_count(), 4);
/// ```
#[derive(Clone)]
pub struct CanonicalPixelBuffer {
    resolution: Resolution,
    layout: ChannelLayout,
    color: ColorSpace,
    data: Vec<u8>,
}

impl CanonicalPixelBuffer {
    /// Zero-filled buffer for `resolution` and `layout`, or `None` when the
    /// geometry multiplies out past the address space.
    ///
    /// Decoders start from this and overwrite what the input covers, so an
    /// undersized input naturally leaves the tail black and transparent.
    pub fn zeroed(resolution: Resolution, layout: ChannelLayout) -> Option<Self> {
        Some(Self {
            resolution,
            layout,
            color: ColorSpace::Srgb,
            data: vec![0; canonical_len(resolution, layout)?],
        })
    }

    /// Wrap an existing byte vector, returning `None` if its length does not
    /// match the geometry.
    pub fn from_vec(resolution: Resolution, layout: ChannelLayout, data: Vec<u8>) -> Option<Self> {
        if canonical_len(resolution, layout) != Some(data.len()) {
            return None;
        }
        Some(Self {
            resolution,
            layout,
            color: ColorSpace::Srgb,
            data,
        })
    }

    /// Geometry of the buffer.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.resolution.width.get()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.resolution.height.get()
    }

    /// Channel layout (RGB or RGBA).
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// Channels per pixel: 3 or 4.
    pub fn channel_count(&self) -> usize {
        self.layout.channel_count()
    }

    /// Color space tag; always sRGB on exit from the pipeline.
    pub fn color(&self) -> ColorSpace {
        self.color
    }

    /// Borrow the pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Borrow the pixel bytes mutably.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Total byte length.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer holds no bytes (never true for constructed values).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow one row of pixels, or `None` when `y` is out of range.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        let stride = self.resolution.width.get() as usize * self.channel_count();
        let start = (y as usize).checked_mul(stride)?;
        self.data.get(start..start.checked_add(stride)?)
    }

    /// Borrow one pixel's channels, or `None` when out of range.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.resolution.width.get() {
            return None;
        }
        let channels = self.channel_count();
        let row = self.row(y)?;
        row.get(x as usize * channels..(x as usize + 1) * channels)
    }

    /// Take ownership of the pixel bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

impl fmt::Debug for CanonicalPixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanonicalPixelBuffer")
            .field("resolution", &self.resolution)
            .field("layout", &self.layout)
            .field("len", &self.data.len())
            .finish_non_exhaustive()
    }
}
