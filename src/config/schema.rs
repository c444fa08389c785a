//! Configuration schema for imgcache
//!
//! Configuration is stored at `~/.config/imgcache/config.toml`

use crate::cache::{ResolverOptions, DEFAULT_CACHE_DIR};
use crate::transform::{Ratio, TransformSpec, DEFAULT_QUALITY, DEFAULT_SIZE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Asset store settings
    pub store: StoreConfig,

    /// Default transform applied when a request leaves a value out
    pub transform: TransformConfig,

    /// Cache settings
    pub cache: CacheConfig,
}

impl Config {
    /// Default transform spec from config
    pub fn transform_spec(&self) -> TransformSpec {
        TransformSpec {
            size: self.transform.size,
            quality: self.transform.quality,
            ratio: self.transform.ratio,
        }
    }

    /// Resolver options from config
    pub fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions {
            cache_dir_name: self.cache.dir_name.clone(),
        }
    }
}

/// Asset store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory all source paths are relative to
    pub root: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}

/// Default transform configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Longest edge of the bounding box in pixels
    pub size: u32,

    /// JPEG quality (1-100)
    pub quality: u8,

    /// Aspect ratio as "W:H"
    pub ratio: Ratio,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            quality: DEFAULT_QUALITY,
            ratio: Ratio::SQUARE,
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Name of the cache folder created next to sources
    pub dir_name: String,

    /// Concurrent resolutions for `warm`
    pub jobs: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir_name: DEFAULT_CACHE_DIR.to_string(),
            jobs: 4,
        }
    }
}
