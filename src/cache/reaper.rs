//! Stale variant reaping
//!
//! When a source changes, every variant generated from the old content is
//! invalid, whatever its size, ratio or quality.

use crate::cache::key::CacheKey;
use crate::store::AssetStore;
use std::path::Path;
use tracing::{debug, warn};

/// Delete the variants of one source whose modification time is not
/// `current_mtime`.
///
/// Only files that parse as cache keys for exactly `base_name` and
/// `extension` are candidates. Failures are logged and swallowed; reaping
/// never fails a resolution. Returns the number of files removed.
pub fn reap_stale<S: AssetStore + ?Sized>(
    store: &S,
    cache_dir: &Path,
    base_name: &str,
    extension: &str,
    current_mtime: u64,
) -> usize {
    let names = match store.list(cache_dir) {
        Ok(names) => names,
        Err(e) => {
            warn!("Skipping stale sweep of {}: {}", cache_dir.display(), e);
            return 0;
        }
    };

    let mut removed = 0;
    for name in names {
        let Some(key) = CacheKey::parse(&name) else {
            continue;
        };
        if !key.is_variant_of(base_name, extension) || key.modified == current_mtime {
            continue;
        }

        let path = cache_dir.join(&name);
        match store.remove(&path) {
            Ok(()) => {
                debug!("Reaped stale variant {}", path.display());
                removed += 1;
            }
            Err(e) => warn!("Failed to reap stale variant {}: {}", path.display(), e),
        }
    }

    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DiskStore;
    use std::fs;
    use tempfile::TempDir;

    fn setup(files: &[&str]) -> (TempDir, DiskStore) {
        let dir = TempDir::new().unwrap();
        let cache = dir.path().join("cache");
        fs::create_dir(&cache).unwrap();
        for name in files {
            fs::write(cache.join(name), b"x").unwrap();
        }
        let store = DiskStore::new(dir.path());
        (dir, store)
    }

    fn remaining(dir: &TempDir) -> Vec<String> {
        let mut names: Vec<_> = fs::read_dir(dir.path().join("cache"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn removes_every_stale_transform() {
        let (dir, store) = setup(&[
            "a_200_1_1_65_1000.png",
            "a_400_16_9_80_1000.png",
            "a_200_1_1_65_900.png",
            "a_200_1_1_65_2000.png",
        ]);

        let removed = reap_stale(&store, Path::new("cache"), "a", "png", 2000);

        assert_eq!(removed, 3);
        assert_eq!(remaining(&dir), vec!["a_200_1_1_65_2000.png"]);
    }

    #[test]
    fn prefix_siblings_are_untouched() {
        let (dir, store) = setup(&[
            "photo_200_1_1_65_1000.png",
            "photo_1_200_1_1_65_1000.png",
            "photo_10_200_1_1_65_1000.png",
        ]);

        reap_stale(&store, Path::new("cache"), "photo", "png", 2000);
        assert_eq!(
            remaining(&dir),
            vec!["photo_10_200_1_1_65_1000.png", "photo_1_200_1_1_65_1000.png"]
        );

        reap_stale(&store, Path::new("cache"), "photo_1", "png", 2000);
        assert_eq!(remaining(&dir), vec!["photo_10_200_1_1_65_1000.png"]);
    }

    #[test]
    fn other_extensions_are_untouched() {
        let (dir, store) = setup(&["a_200_1_1_65_1000.png", "a_200_1_1_65_1000.jpg"]);

        reap_stale(&store, Path::new("cache"), "a", "png", 2000);
        assert_eq!(remaining(&dir), vec!["a_200_1_1_65_1000.jpg"]);
    }

    #[test]
    fn ignores_foreign_and_temporary_files() {
        let (dir, store) = setup(&["README", ".a_200_1_1_65_1000.png.abc123.tmp"]);

        assert_eq!(reap_stale(&store, Path::new("cache"), "a", "png", 2000), 0);
        assert_eq!(remaining(&dir).len(), 2);
    }

    #[test]
    fn missing_cache_dir_is_empty_sweep() {
        let dir = TempDir::new().unwrap();
        let store = DiskStore::new(dir.path());
        assert_eq!(reap_stale(&store, Path::new("cache"), "a", "png", 1), 0);
    }
}
