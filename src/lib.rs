//! imgcache - Resized Image Variant Cache
//!
//! Derives resized, re-encoded variants of source images kept in an asset
//! directory and caches them next to the sources. Variants are keyed by the
//! transform parameters and the source's modification time, so editing a source
//! invalidates every variant generated from the old content.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod resize;
pub mod store;
pub mod transform;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;

pub use cache::{CacheKey, CacheResolver, Outcome, Resolution, ResolverOptions};
pub use error::{ImgCacheError, ImgCacheResult};
pub use store::{AssetStore, DiskStore, SourceImage};
pub use transform::{Ratio, TransformSpec};
