//! Filesystem-backed asset store

use super::AssetStore;
use crate::error::{ImgCacheError, ImgCacheResult};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use tracing::debug;
use uuid::Uuid;

/// Asset store rooted at a directory on the local filesystem
#[derive(Debug, Clone)]
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    /// Create a store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetStore for DiskStore {
    fn absolute_path(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }

    fn exists(&self, relative: &Path) -> bool {
        self.absolute_path(relative).is_file()
    }

    fn read(&self, relative: &Path) -> ImgCacheResult<Vec<u8>> {
        let path = self.absolute_path(relative);
        fs::read(&path).map_err(|e| ImgCacheError::io(format!("reading {}", path.display()), e))
    }

    fn write(&self, relative: &Path, contents: &[u8]) -> ImgCacheResult<()> {
        write_atomic(&self.absolute_path(relative), contents)
    }

    fn mtime(&self, relative: &Path) -> ImgCacheResult<u64> {
        let path = self.absolute_path(relative);
        let modified = fs::metadata(&path)
            .and_then(|m| m.modified())
            .map_err(|e| ImgCacheError::io(format!("reading mtime of {}", path.display()), e))?;

        Ok(modified
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0))
    }

    fn ensure_dir(&self, relative: &Path) -> ImgCacheResult<()> {
        let path = self.absolute_path(relative);
        if path.is_dir() {
            return Ok(());
        }

        // Another resolver may win the race; only a still-missing directory is a failure.
        if let Err(e) = fs::create_dir_all(&path) {
            if !path.is_dir() {
                return Err(ImgCacheError::DirectoryCreationFailed { path, source: e });
            }
        }

        debug!("Created cache directory {}", path.display());
        Ok(())
    }

    fn list(&self, relative_dir: &Path) -> ImgCacheResult<Vec<String>> {
        let dir = self.absolute_path(relative_dir);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => {
                return Err(ImgCacheError::io(
                    format!("reading directory {}", dir.display()),
                    e,
                ))
            }
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| ImgCacheError::io(format!("reading entry in {}", dir.display()), e))?;
            if !entry.file_type().is_ok_and(|t| t.is_file()) {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    fn remove(&self, relative: &Path) -> ImgCacheResult<()> {
        let path = self.absolute_path(relative);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} already removed", path.display());
                Ok(())
            }
            Err(e) => Err(ImgCacheError::io(format!("removing {}", path.display()), e)),
        }
    }
}

/// Write `contents` to a hidden temporary sibling of `dest`, then rename it
/// into place.
///
/// The temporary file is removed again if anything fails, so `dest` either
/// holds the complete contents or is untouched.
pub fn write_atomic(dest: &Path, contents: &[u8]) -> ImgCacheResult<()> {
    let file_name = dest
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ImgCacheError::PathInvalid {
            path: dest.to_path_buf(),
            reason: "destination has no file name".to_string(),
        })?;
    let tmp = dest.with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4().simple()));

    let written = fs::File::create(&tmp).and_then(|mut file| {
        file.write_all(contents)?;
        file.sync_all()
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(ImgCacheError::io(format!("writing {}", tmp.display()), e));
    }

    if let Err(e) = fs::rename(&tmp, dest) {
        let _ = fs::remove_file(&tmp);
        return Err(ImgCacheError::io(
            format!("moving {} into place", dest.display()),
            e,
        ));
    }

    Ok(())
}
