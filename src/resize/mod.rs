//! Aspect-fit resizing
//!
//! Turns a source image into a variant that fits the transform's bounding
//! box:
//!
//! | Step | Implementation |
//! |---|---|
//! | Detect format | magic-byte sniffing, BMP/GIF/JPEG/PNG only |
//! | Bounding box | [`calculations::bounding_box`] |
//! | Final size | [`calculations::fit_within`] (never upscales) |
//! | Resample | triangle (bilinear) filter |
//! | Encode | JPEG at the requested quality, whatever the source format |
//!
//! The dimension math lives in [`calculations`] and has no I/O.

pub mod calculations;
pub mod codec;

pub use calculations::{bounding_box, fit_within, Dimensions};
pub use codec::SourceFormat;

use crate::error::{ImgCacheError, ImgCacheResult};
use crate::store::write_atomic;
use crate::transform::TransformSpec;
use image::imageops::{self, FilterType};
use std::fs;
use std::path::Path;
use tracing::debug;

/// An encoded variant ready to be written
#[derive(Debug, Clone)]
pub struct ResizedImage {
    /// JPEG bytes
    pub bytes: Vec<u8>,
    /// Raster size of the encoded image
    pub dimensions: Dimensions,
    /// Format the source was decoded from
    pub source_format: SourceFormat,
}

/// Resize encoded source bytes according to `spec`.
///
/// `origin` only labels errors and log lines.
pub fn resize_image(
    bytes: &[u8],
    spec: &TransformSpec,
    origin: &Path,
) -> ImgCacheResult<ResizedImage> {
    spec.validate()?;

    let format = codec::detect(bytes, origin)?;
    let decoded = codec::decode(bytes, format, origin)?;
    let source = Dimensions::new(decoded.width(), decoded.height());

    let bounds = bounding_box(spec.size, spec.ratio);
    let target = fit_within(source, bounds);
    debug!(
        "Resizing {} ({}, {}x{}) into {}x{} box -> {}x{}",
        origin.display(),
        format,
        source.width,
        source.height,
        bounds.width,
        bounds.height,
        target.width,
        target.height
    );

    let flat = codec::flatten(decoded);
    let raster = if target == source {
        flat
    } else {
        let resampled = imageops::resize(&flat, target.width, target.height, FilterType::Triangle);
        drop(flat);
        resampled
    };

    let encoded = codec::encode_jpeg(&raster, spec.quality)?;

    Ok(ResizedImage {
        bytes: encoded,
        dimensions: target,
        source_format: format,
    })
}

/// Resize the image at `src` and atomically write the result to `dest`.
///
/// Nothing is written when decoding or encoding fails.
pub fn resize_file(src: &Path, spec: &TransformSpec, dest: &Path) -> ImgCacheResult<ResizedImage> {
    let bytes = fs::read(src).map_err(|e| ImgCacheError::io(format!("reading {}", src.display()), e))?;
    let resized = resize_image(&bytes, spec, src)?;
    write_atomic(dest, &resized.bytes)?;
    Ok(resized)
}
