use lethe_core::prelude::*;

/// Common device resolutions consulted when no geometry was supplied, in
/// match priority order.
pub const RESOLUTION_CANDIDATES: [(u32, u32); 8] = [
    (640, 480),
    (1280, 720),
    (1920, 1080),
    (1920, 1536),
    (2560, 1440),
    (3840, 2160),
    (800, 600),
    (1024, 768),
];

/// Fuzzy-pass slack in bytes: a candidate matches when the input length is
/// strictly within this distance of the exact frame size, absorbing small
/// header or padding tails some capture tools leave behind.
pub const FUZZY_BYTE_TOLERANCE: u64 = 4096;

/// Infer a resolution from the byte count alone.
///
/// First pass returns the first candidate whose pixel count divides the
/// input exactly; the second pass tolerates a byte delta below
/// [`FUZZY_BYTE_TOLERANCE`]. `None` when nothing matches, and always `None`
/// for [`PixelFormat::LegacyBitmap`], whose geometry comes from its header.
///
/// # Example
/// ```rust
/// use lethe_codec::prelude::*;
///
/// let res = infer_resolution(640 * 480 * 2, PixelFormat::Uyvy).unwrap();
/// assert_eq!(res.to_string(), "640x480");
/// ```
pub fn infer_resolution(byte_len: u64, format: PixelFormat) -> Option<Resolution> {
    let total_pixels = format.pixels_in(byte_len)?;
    RESOLUTION_CANDIDATES
        .iter()
        .find(|&&(w, h)| w as u64 * h as u64 == total_pixels)
        .or_else(|| {
            RESOLUTION_CANDIDATES.iter().find(|&&(w, h)| {
                Resolution::new(w, h)
                    .and_then(|res| format.frame_bytes(res))
                    .is_some_and(|need| need.abs_diff(byte_len) < FUZZY_BYTE_TOLERANCE)
            })
        })
        .and_then(|&(w, h)| Resolution::new(w, h))
}
