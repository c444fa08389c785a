//! Variant cache
//!
//! Resized variants live in a `cache/` folder next to their source, one file
//! per key. Keys embed the source's modification time, so a changed source
//! never matches an old variant; stale files are reaped on the next miss.
//!
//! # Resolution
//!
//! | Step | Hit | Miss |
//! |------|-----|------|
//! | Locate source, read mtime | yes | yes |
//! | Existence check of the key | found, return | not found |
//! | Create cache folder | - | yes |
//! | Reap variants with other mtimes | - | yes |
//! | Resize + atomic write | - | yes |

pub mod inventory;
pub mod key;
pub mod reaper;
pub mod resolver;

pub use inventory::{inspect, purge, PurgeReport, PurgeScope, VariantInfo, VariantStatus};
pub use key::CacheKey;
pub use reaper::reap_stale;
pub use resolver::{CacheResolver, Outcome, Resolution, ResolverOptions, DEFAULT_CACHE_DIR};
