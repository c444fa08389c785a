//! Asset store abstraction
//!
//! The cache never touches the filesystem directly: every read, write and
//! directory operation goes through an [`AssetStore`] addressed by paths
//! relative to the store root.

mod disk;

pub use disk::{write_atomic, DiskStore};

use crate::error::{ImgCacheError, ImgCacheResult};
use std::path::{Component, Path, PathBuf};

/// Byte-addressable file store keyed by relative path
pub trait AssetStore {
    /// Absolute location of a relative path
    fn absolute_path(&self, relative: &Path) -> PathBuf;

    /// Whether a regular file exists at `relative`
    fn exists(&self, relative: &Path) -> bool;

    /// Read the whole file
    fn read(&self, relative: &Path) -> ImgCacheResult<Vec<u8>>;

    /// Replace the file at `relative`.
    ///
    /// Readers must never observe a partially written file.
    fn write(&self, relative: &Path, contents: &[u8]) -> ImgCacheResult<()>;

    /// Modification time in whole seconds since the Unix epoch
    fn mtime(&self, relative: &Path) -> ImgCacheResult<u64>;

    /// Create a directory and its parents.
    ///
    /// Fails with [`ImgCacheError::DirectoryCreationFailed`] only when the
    /// directory is still missing after the attempt.
    fn ensure_dir(&self, relative: &Path) -> ImgCacheResult<()>;

    /// File names of the regular files in a directory. A missing directory
    /// lists as empty.
    fn list(&self, relative_dir: &Path) -> ImgCacheResult<Vec<String>>;

    /// Delete a file. A file that is already gone counts as removed.
    fn remove(&self, relative: &Path) -> ImgCacheResult<()>;
}

/// A source image addressed relative to the store root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    /// Path as given by the caller, normalized
    pub relative_path: PathBuf,
    /// Parent directory, empty for files at the root
    pub directory: PathBuf,
    /// File name without extension
    pub base_name: String,
    /// Extension without the dot, empty when the file has none
    pub extension: String,
}

impl SourceImage {
    /// Split a caller-supplied relative path into its parts.
    ///
    /// Absolute paths and `..` components are rejected so a request can never
    /// address files outside the store root.
    pub fn locate(relative: &str) -> ImgCacheResult<Self> {
        let raw = Path::new(relative.trim());
        let mut normalized = PathBuf::new();

        for component in raw.components() {
            match component {
                Component::Normal(part) => normalized.push(part),
                Component::CurDir => {}
                Component::ParentDir => {
                    return Err(ImgCacheError::PathInvalid {
                        path: raw.to_path_buf(),
                        reason: "parent directory components are not allowed".to_string(),
                    })
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(ImgCacheError::PathInvalid {
                        path: raw.to_path_buf(),
                        reason: "path must be relative to the asset root".to_string(),
                    })
                }
            }
        }

        let base_name = normalized
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ImgCacheError::PathInvalid {
                path: raw.to_path_buf(),
                reason: "path has no file name".to_string(),
            })?
            .to_string();

        let extension = normalized
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        let directory = normalized
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Ok(Self {
            relative_path: normalized,
            directory,
            base_name,
            extension,
        })
    }
}
