//! Inventory of a cache directory
//!
//! Classifies every file in a `cache/` folder against its source so stale
//! and orphaned variants can be listed or purged in bulk.

use crate::cache::key::CacheKey;
use crate::cache::resolver::ResolverOptions;
use crate::error::ImgCacheResult;
use crate::store::AssetStore;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// State of a cached variant relative to its source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantStatus {
    /// Modification time matches the source
    Current,
    /// Source changed since generation
    Stale,
    /// Source no longer exists
    Orphaned,
    /// Not a variant file name
    Foreign,
}

impl VariantStatus {
    /// Whether a stale-only purge removes this variant
    pub fn is_outdated(&self) -> bool {
        matches!(self, Self::Stale | Self::Orphaned)
    }
}

impl fmt::Display for VariantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Current => "current",
            Self::Stale => "stale",
            Self::Orphaned => "orphaned",
            Self::Foreign => "foreign",
        };
        write!(f, "{}", name)
    }
}

/// One file found in a cache directory
#[derive(Debug, Clone)]
pub struct VariantInfo {
    /// Path relative to the store root
    pub path: PathBuf,
    pub file_name: String,
    /// Parsed key, `None` for foreign files
    pub key: Option<CacheKey>,
    /// Source the variant was derived from, when it still exists
    pub source: Option<PathBuf>,
    pub status: VariantStatus,
}

/// Which variants a purge removes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurgeScope {
    /// Stale and orphaned variants
    Outdated,
    /// Every variant; foreign files are always kept
    All,
}

/// Result of a purge
#[derive(Debug, Default)]
pub struct PurgeReport {
    pub removed: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

/// Classify every file in the cache folder of `dir`
pub fn inspect<S: AssetStore + ?Sized>(
    store: &S,
    dir: &Path,
    options: &ResolverOptions,
) -> ImgCacheResult<Vec<VariantInfo>> {
    options.validate()?;
    let cache_dir = dir.join(&options.cache_dir_name);
    let names = store.list(&cache_dir)?;

    // One mtime lookup per source, however many variants it has
    let mut mtimes: HashMap<PathBuf, Option<u64>> = HashMap::new();
    let mut variants = Vec::with_capacity(names.len());

    for file_name in names {
        let path = cache_dir.join(&file_name);
        let Some(key) = CacheKey::parse(&file_name) else {
            variants.push(VariantInfo {
                path,
                file_name,
                key: None,
                source: None,
                status: VariantStatus::Foreign,
            });
            continue;
        };

        let source = key
            .source_file_names()
            .into_iter()
            .map(|name| dir.join(name))
            .find(|candidate| store.exists(candidate));

        let status = match &source {
            None => VariantStatus::Orphaned,
            Some(source_path) => {
                let mtime = mtimes
                    .entry(source_path.clone())
                    .or_insert_with(|| match store.mtime(source_path) {
                        Ok(secs) => Some(secs),
                        Err(e) => {
                            debug!("Cannot read mtime of {}: {}", source_path.display(), e);
                            None
                        }
                    });
                match mtime {
                    Some(secs) if *secs == key.modified => VariantStatus::Current,
                    Some(_) => VariantStatus::Stale,
                    None => VariantStatus::Orphaned,
                }
            }
        };

        variants.push(VariantInfo {
            path,
            file_name,
            key: Some(key),
            source,
            status,
        });
    }

    Ok(variants)
}

/// Remove the variants selected by `scope`.
///
/// With `dry_run` nothing is deleted and `removed` lists what would be.
pub fn purge<S: AssetStore + ?Sized>(
    store: &S,
    variants: &[VariantInfo],
    scope: PurgeScope,
    dry_run: bool,
) -> PurgeReport {
    let mut report = PurgeReport::default();

    let selected = variants.iter().filter(|v| match scope {
        PurgeScope::Outdated => v.status.is_outdated(),
        PurgeScope::All => v.status != VariantStatus::Foreign,
    });

    for variant in selected {
        if dry_run {
            report.removed.push(variant.path.clone());
            continue;
        }

        match store.remove(&variant.path) {
            Ok(()) => {
                info!("Removed {} variant {}", variant.status, variant.path.display());
                report.removed.push(variant.path.clone());
            }
            Err(e) => {
                warn!("Failed to remove {}: {}", variant.path.display(), e);
                report.failed.push((variant.path.clone(), e.to_string()));
            }
        }
    }

    report
}
