//! Transform parameters for a single variant request

use crate::error::{ImgCacheError, ImgCacheResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default longest-edge size in pixels
pub const DEFAULT_SIZE: u32 = 200;

/// Default JPEG quality
pub const DEFAULT_QUALITY: u8 = 65;

/// Highest quality the encoder accepts
pub const MAX_QUALITY: u8 = 100;

/// Target aspect ratio, written as `W:H`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ratio {
    pub w: u32,
    pub h: u32,
}

impl Ratio {
    pub const SQUARE: Ratio = Ratio { w: 1, h: 1 };

    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// Width divided by height
    pub fn as_f64(&self) -> f64 {
        f64::from(self.w) / f64::from(self.h)
    }

    /// Landscape targets are strictly wider than tall
    pub fn is_landscape(&self) -> bool {
        self.w > self.h
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Self::SQUARE
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.w, self.h)
    }
}

impl FromStr for Ratio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(':')
            .ok_or_else(|| format!("invalid W:H format: no ':' found in '{s}'"))?;
        let w = w
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid ratio width '{w}': {e}"))?;
        let h = h
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid ratio height '{h}': {e}"))?;
        if w == 0 || h == 0 {
            return Err(format!("ratio components must be positive, got '{s}'"));
        }
        Ok(Self { w, h })
    }
}

impl TryFrom<String> for Ratio {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Ratio> for String {
    fn from(ratio: Ratio) -> Self {
        ratio.to_string()
    }
}

/// Size, quality and aspect ratio of one requested variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransformSpec {
    /// Longest edge of the bounding box in pixels
    pub size: u32,
    /// JPEG quality, 1-100
    pub quality: u8,
    /// Aspect ratio of the bounding box
    pub ratio: Ratio,
}

impl TransformSpec {
    /// Build a validated transform spec
    pub fn new(size: u32, quality: u8, ratio: Ratio) -> ImgCacheResult<Self> {
        let spec = Self {
            size,
            quality,
            ratio,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Reject non-positive sizes, ratios and out-of-range qualities
    pub fn validate(&self) -> ImgCacheResult<()> {
        if self.size == 0 {
            return Err(ImgCacheError::invalid_argument("size must be positive"));
        }
        if self.quality == 0 || self.quality > MAX_QUALITY {
            return Err(ImgCacheError::invalid_argument(format!(
                "quality must be between 1 and {}, got {}",
                MAX_QUALITY, self.quality
            )));
        }
        if self.ratio.w == 0 || self.ratio.h == 0 {
            return Err(ImgCacheError::invalid_argument(format!(
                "ratio components must be positive, got {}",
                self.ratio
            )));
        }
        Ok(())
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_ratio(mut self, ratio: Ratio) -> Self {
        self.ratio = ratio;
        self
    }
}

impl Default for TransformSpec {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            quality: DEFAULT_QUALITY,
            ratio: Ratio::SQUARE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let spec = TransformSpec::default();
        assert_eq!(spec.size, 200);
        assert_eq!(spec.quality, 65);
        assert_eq!(spec.ratio, Ratio::new(1, 1));
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn rejects_zero_size() {
        let err = TransformSpec::new(0, 65, Ratio::SQUARE).unwrap_err();
        assert!(matches!(err, ImgCacheError::InvalidArgument(_)));
    }

    #[test]
    fn rejects_quality_out_of_range() {
        assert!(TransformSpec::new(200, 0, Ratio::SQUARE).is_err());
        assert!(TransformSpec::new(200, 101, Ratio::SQUARE).is_err());
        assert!(TransformSpec::new(200, 100, Ratio::SQUARE).is_ok());
    }

    #[test]
    fn rejects_zero_ratio() {
        let spec = TransformSpec::default().with_ratio(Ratio { w: 0, h: 1 });
        assert!(matches!(
            spec.validate(),
            Err(ImgCacheError::InvalidArgument(_))
        ));
    }

    #[test]
    fn ratio_parse() {
        assert_eq!("16:9".parse::<Ratio>().unwrap(), Ratio::new(16, 9));
        assert_eq!(" 4 : 3 ".trim().parse::<Ratio>().unwrap(), Ratio::new(4, 3));
        assert!("16x9".parse::<Ratio>().is_err());
        assert!("0:1".parse::<Ratio>().is_err());
        assert!("a:1".parse::<Ratio>().is_err());
    }

    #[test]
    fn ratio_orientation() {
        assert!(Ratio::new(16, 9).is_landscape());
        assert!(!Ratio::new(1, 1).is_landscape());
        assert!(!Ratio::new(9, 16).is_landscape());
    }
}
