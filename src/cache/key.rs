//! Cache key derivation and parsing
//!
//! A key is serialized into the variant's file name:
//! `{base}_{size}_{w}_{h}_{quality}_{mtime}.{ext}`. The extension is the
//! source's, even though the content is always JPEG, so existing cache
//! directories stay valid.

use crate::store::SourceImage;
use crate::transform::{Ratio, TransformSpec};
use std::fmt;

/// Extension used when the source file has none
pub const FALLBACK_EXTENSION: &str = "jpg";

/// Identity of one cached variant
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub base_name: String,
    pub size: u32,
    pub ratio: Ratio,
    pub quality: u8,
    /// Source modification time in seconds at generation time
    pub modified: u64,
    pub extension: String,
}

impl CacheKey {
    /// Derive the key for a source snapshot and transform
    pub fn new(source: &SourceImage, spec: &TransformSpec, modified: u64) -> Self {
        Self {
            base_name: source.base_name.clone(),
            size: spec.size,
            ratio: spec.ratio,
            quality: spec.quality,
            modified,
            extension: variant_extension(source).to_string(),
        }
    }

    /// Serialized file name
    pub fn file_name(&self) -> String {
        self.to_string()
    }

    /// Parse a file name back into a key.
    ///
    /// Fields are taken from the right, so base names may contain
    /// underscores and dots. Returns `None` for anything that is not a
    /// variant name, including in-flight temporary files.
    pub fn parse(file_name: &str) -> Option<Self> {
        let (stem, extension) = file_name.rsplit_once('.')?;
        let mut fields = stem.rsplitn(6, '_');

        let modified = parse_number(fields.next()?)?;
        let quality = parse_number(fields.next()?)?;
        let h = parse_number(fields.next()?)?;
        let w = parse_number(fields.next()?)?;
        let size = parse_number(fields.next()?)?;
        let base_name = fields.next()?;

        if base_name.is_empty() || extension.is_empty() {
            return None;
        }

        Some(Self {
            base_name: base_name.to_string(),
            size: u32::try_from(size).ok()?,
            ratio: Ratio::new(u32::try_from(w).ok()?, u32::try_from(h).ok()?),
            quality: u8::try_from(quality).ok()?,
            modified,
            extension: extension.to_string(),
        })
    }

    /// Whether this key belongs to the given source, ignoring transform and
    /// modification time
    pub fn is_variant_of(&self, base_name: &str, extension: &str) -> bool {
        self.base_name == base_name && self.extension == extension
    }

    /// Candidate source file names in the same directory, most likely first
    pub fn source_file_names(&self) -> Vec<String> {
        let mut names = vec![format!("{}.{}", self.base_name, self.extension)];
        if self.extension == FALLBACK_EXTENSION {
            names.push(self.base_name.clone());
        }
        names
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}_{}_{}_{}.{}",
            self.base_name,
            self.size,
            self.ratio.w,
            self.ratio.h,
            self.quality,
            self.modified,
            self.extension
        )
    }
}

/// Extension a source's variants are stored under
pub fn variant_extension(source: &SourceImage) -> &str {
    if source.extension.is_empty() {
        FALLBACK_EXTENSION
    } else {
        &source.extension
    }
}

/// Digits only; rejects the signs `str::parse` would accept
fn parse_number(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
