//! Cache resolution: the entry point that maps a source and a transform to a
//! cached variant, generating it on a miss

use crate::cache::key::CacheKey;
use crate::cache::reaper::reap_stale;
use crate::error::{ImgCacheError, ImgCacheResult};
use crate::resize::{self, Dimensions};
use crate::store::{AssetStore, SourceImage};
use crate::transform::TransformSpec;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// Name of the per-directory cache folder
pub const DEFAULT_CACHE_DIR: &str = "cache";

/// Resolver settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Cache folder created next to each source
    pub cache_dir_name: String,
}

impl ResolverOptions {
    /// Options with a custom cache folder name, validated
    pub fn new(cache_dir_name: impl Into<String>) -> ImgCacheResult<Self> {
        let options = Self {
            cache_dir_name: cache_dir_name.into(),
        };
        options.validate()?;
        Ok(options)
    }

    /// The cache folder name must be one plain path segment, so variants
    /// stay in a dedicated folder directly below each source directory.
    pub fn validate(&self) -> ImgCacheResult<()> {
        let name = self.cache_dir_name.as_str();
        let mut components = Path::new(name).components();
        let single_segment = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );

        if !single_segment || name.contains(['/', '\\']) || name.trim() != name {
            return Err(ImgCacheError::invalid_argument(format!(
                "cache directory name must be a single folder name, got '{}'",
                name
            )));
        }
        Ok(())
    }
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            cache_dir_name: DEFAULT_CACHE_DIR.to_string(),
        }
    }
}

/// How a resolution was satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The variant already existed; nothing was written
    Hit,
    /// The variant was generated by this call
    Generated {
        dimensions: Dimensions,
        reaped: usize,
    },
}

/// A resolved variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Variant path relative to the store root
    pub path: PathBuf,
    pub key: CacheKey,
    pub outcome: Outcome,
}

/// Maps sources to cached variants.
///
/// Holds no mutable state, so one resolver can serve many threads.
#[derive(Debug, Clone)]
pub struct CacheResolver<S> {
    store: S,
    options: ResolverOptions,
}

impl<S: AssetStore> CacheResolver<S> {
    /// Create a resolver with default options
    pub fn new(store: S) -> Self {
        Self::with_options(store, ResolverOptions::default())
    }

    /// Create a resolver with custom options
    pub fn with_options(store: S, options: ResolverOptions) -> Self {
        Self { store, options }
    }

    /// Get the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the resolver options
    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Path of the cached variant for `relative_path` and `spec`.
    ///
    /// `None` or an empty path means "no image", and a source missing from
    /// the store is a normal outcome: both return `Ok(None)`.
    pub fn resolve(
        &self,
        relative_path: Option<&str>,
        spec: &TransformSpec,
    ) -> ImgCacheResult<Option<PathBuf>> {
        Ok(self
            .resolve_detailed(relative_path, spec)?
            .map(|resolution| resolution.path))
    }

    /// Like [`resolve`](Self::resolve), also reporting whether the variant
    /// was generated
    pub fn resolve_detailed(
        &self,
        relative_path: Option<&str>,
        spec: &TransformSpec,
    ) -> ImgCacheResult<Option<Resolution>> {
        let Some(relative_path) = relative_path.filter(|p| !p.trim().is_empty()) else {
            return Ok(None);
        };
        spec.validate()?;
        self.options.validate()?;

        let source = SourceImage::locate(relative_path)?;
        if !self.store.exists(&source.relative_path) {
            debug!("Source {} not found", source.relative_path.display());
            return Ok(None);
        }

        let modified = match self.store.mtime(&source.relative_path) {
            Ok(secs) => secs,
            Err(e) if e.is_not_found() => {
                debug!("Source {} vanished", source.relative_path.display());
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let key = CacheKey::new(&source, spec, modified);
        let cache_dir = source.directory.join(&self.options.cache_dir_name);
        let path = cache_dir.join(key.file_name());

        if self.store.exists(&path) {
            debug!("Cache hit {}", path.display());
            return Ok(Some(Resolution {
                path,
                key,
                outcome: Outcome::Hit,
            }));
        }

        self.store.ensure_dir(&cache_dir)?;

        let reaped = reap_stale(
            &self.store,
            &cache_dir,
            &key.base_name,
            &key.extension,
            key.modified,
        );

        let bytes = self.store.read(&source.relative_path)?;
        let resized = resize::resize_image(&bytes, spec, &source.relative_path)?;
        drop(bytes);
        self.store.write(&path, &resized.bytes)?;

        info!(
            "Generated {} ({}x{}, reaped {})",
            path.display(),
            resized.dimensions.width,
            resized.dimensions.height,
            reaped
        );

        Ok(Some(Resolution {
            path,
            key,
            outcome: Outcome::Generated {
                dimensions: resized.dimensions,
                reaped,
            },
        }))
    }
}
