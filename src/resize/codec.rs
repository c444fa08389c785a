//! Format sniffing, decoding and JPEG encoding on top of the `image` crate

use crate::error::{ImgCacheError, ImgCacheResult};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba};
use std::fmt;
use std::path::Path;

/// Source formats the resizer accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Bmp,
    Gif,
    Jpeg,
    Png,
}

impl SourceFormat {
    fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Bmp => Some(Self::Bmp),
            ImageFormat::Gif => Some(Self::Gif),
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::Png => Some(Self::Png),
            _ => None,
        }
    }

    fn image_format(&self) -> ImageFormat {
        match self {
            Self::Bmp => ImageFormat::Bmp,
            Self::Gif => ImageFormat::Gif,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Png => ImageFormat::Png,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bmp => "bmp",
            Self::Gif => "gif",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
        };
        write!(f, "{}", name)
    }
}

/// Sniff the format from magic bytes; the file extension is never trusted
pub fn detect(bytes: &[u8], origin: &Path) -> ImgCacheResult<SourceFormat> {
    let format = image::guess_format(bytes).map_err(|_| ImgCacheError::UnsupportedFormat {
        path: origin.to_path_buf(),
        format: "unknown".to_string(),
    })?;

    SourceFormat::from_image_format(format).ok_or_else(|| ImgCacheError::UnsupportedFormat {
        path: origin.to_path_buf(),
        format: format!("{:?}", format),
    })
}

/// Decode the full pixel buffer
pub fn decode(bytes: &[u8], format: SourceFormat, origin: &Path) -> ImgCacheResult<DynamicImage> {
    image::load_from_memory_with_format(bytes, format.image_format()).map_err(|e| {
        ImgCacheError::image(format!("decoding {} as {}", origin.display(), format), e)
    })
}

/// Drop the alpha channel by compositing onto black, the way a fresh
/// truecolor canvas would
pub fn flatten(image: DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.into_rgb8();
    }

    let rgba = image.into_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
        let blend = |c: u8| ((u16::from(c) * u16::from(a) + 127) / 255) as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}

/// Encode as baseline JPEG
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> ImgCacheResult<Vec<u8>> {
    let mut out = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut out, quality);
        encoder
            .encode_image(image)
            .map_err(|e| ImgCacheError::image("encoding JPEG", e))?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    #[test]
    fn detects_whitelisted_formats() {
        let origin = Path::new("x");
        let png = test_utils::image_bytes(4, 4, ImageFormat::Png);
        let jpeg = test_utils::image_bytes(4, 4, ImageFormat::Jpeg);
        let gif = test_utils::image_bytes(4, 4, ImageFormat::Gif);
        let bmp = test_utils::image_bytes(4, 4, ImageFormat::Bmp);

        assert_eq!(detect(&png, origin).unwrap(), SourceFormat::Png);
        assert_eq!(detect(&jpeg, origin).unwrap(), SourceFormat::Jpeg);
        assert_eq!(detect(&gif, origin).unwrap(), SourceFormat::Gif);
        assert_eq!(detect(&bmp, origin).unwrap(), SourceFormat::Bmp);
    }

    #[test]
    fn rejects_webp() {
        let err = detect(&test_utils::webp_bytes(), Path::new("a.webp")).unwrap_err();
        assert!(matches!(err, ImgCacheError::UnsupportedFormat { .. }));
    }

    #[test]
    fn rejects_garbage() {
        let err = detect(b"definitely not an image", Path::new("a.png")).unwrap_err();
        match err {
            ImgCacheError::UnsupportedFormat { format, .. } => assert_eq!(format, "unknown"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn truncated_png_is_a_decode_error() {
        let mut png = test_utils::png_bytes(32, 32);
        png.truncate(40);
        let err = decode(&png, SourceFormat::Png, Path::new("a.png")).unwrap_err();
        assert!(matches!(err, ImgCacheError::Image { .. }));
    }

    #[test]
    fn flatten_composites_onto_black() {
        let bytes = test_utils::transparent_png_bytes(2, 2);
        let decoded = decode(&bytes, SourceFormat::Png, Path::new("t.png")).unwrap();
        let flat = flatten(decoded);
        assert_eq!(*flat.get_pixel(0, 0), Rgb([0, 0, 0]));
    }

    #[test]
    fn encodes_jpeg() {
        let img = RgbImage::from_pixel(8, 8, Rgb([200, 10, 10]));
        let bytes = encode_jpeg(&img, 65).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
    }
}
