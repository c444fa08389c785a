//! Error types for imgcache
//!
//! All modules use `ImgCacheResult<T>` as their return type. A missing source
//! image is not an error: resolution returns `Ok(None)` for it.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for imgcache operations
pub type ImgCacheResult<T> = Result<T, ImgCacheError>;

/// All errors that can occur in imgcache
#[derive(Error, Debug)]
pub enum ImgCacheError {
    // Request errors
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid path: {path}: {reason}")]
    PathInvalid { path: PathBuf, reason: String },

    // Cache errors
    #[error("Directory \"{path}\" was not created: {source}")]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Codec errors
    #[error("Unsupported image format {format} of {path}")]
    UnsupportedFormat { path: PathBuf, format: String },

    #[error("Image error: {context}")]
    Image {
        context: String,
        #[source]
        source: image::ImageError,
    },

    #[error("{failed} of {total} resolutions failed")]
    BatchFailed { failed: usize, total: usize },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ImgCacheError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an image codec error with context
    pub fn image(context: impl Into<String>, source: image::ImageError) -> Self {
        Self::Image {
            context: context.into(),
            source,
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Whether this error means the underlying file vanished.
    ///
    /// Used to turn races against external deletion into a plain miss.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            Self::Image {
                source: image::ImageError::IoError(e),
                ..
            } => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::UnsupportedFormat { .. } => Some("Supported source formats: BMP, GIF, JPEG, PNG"),
            Self::DirectoryCreationFailed { .. } => {
                Some("Check that the asset root is writable by this user")
            }
            Self::ConfigInvalid { .. } => Some("Run: imgcache config init --force"),
            Self::PathInvalid { .. } => Some("Paths must be relative to the asset root"),
            Self::BatchFailed { .. } => Some("Failed sources are listed above; re-run with -v for details"),
            _ => None,
        }
    }
}
