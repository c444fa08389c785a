//! Pure dimension math for aspect-fit resizing
//!
//! No I/O here, so every edge case is cheap to test.

use crate::transform::Ratio;

/// Width and height in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether both axes fit inside `other`
    pub fn fits_within(&self, other: Dimensions) -> bool {
        self.width <= other.width && self.height <= other.height
    }
}

/// Round to the nearest pixel, never below one
fn to_pixels(value: f64) -> u32 {
    value.round().clamp(1.0, f64::from(u32::MAX)) as u32
}

/// Bounding box for a target `size` and aspect `ratio`.
///
/// Landscape ratios pin the width to `size`; square and portrait ratios pin
/// the height.
pub fn bounding_box(size: u32, ratio: Ratio) -> Dimensions {
    let r = ratio.as_f64();
    let scaled = to_pixels(f64::from(size) / r);

    if ratio.is_landscape() {
        Dimensions::new(size, scaled)
    } else {
        Dimensions::new(scaled, size)
    }
}

/// Final raster size for a source inside a bounding box.
///
/// Keeps the source's own aspect ratio and never upscales.
pub fn fit_within(source: Dimensions, bounds: Dimensions) -> Dimensions {
    if source.fits_within(bounds) {
        return source;
    }

    let src_w = f64::from(source.width);
    let src_h = f64::from(source.height);
    let max_w = f64::from(bounds.width);
    let max_h = f64::from(bounds.height);

    if src_w / max_w > src_h / max_h {
        Dimensions::new(bounds.width, to_pixels(max_w * src_h / src_w))
    } else {
        Dimensions::new(to_pixels(max_h * src_w / src_h), bounds.height)
    }
}
