//! CLI command implementations

pub mod completions;
pub mod config;
pub mod list;
pub mod purge;
pub mod resize;
pub mod resolve;
pub mod warm;

pub use completions::execute as completions;
pub use config::execute as config;
pub use list::execute as list;
pub use purge::execute as purge;
pub use resize::execute as resize;
pub use resolve::execute as resolve;
pub use warm::execute as warm;

use crate::cache::CacheResolver;
use crate::config::Config;
use crate::error::{ImgCacheError, ImgCacheResult};
use crate::store::DiskStore;

/// Resolver over the configured asset root
pub(crate) fn disk_resolver(config: &Config) -> CacheResolver<DiskStore> {
    CacheResolver::with_options(
        DiskStore::new(config.store.root.clone()),
        config.resolver_options(),
    )
}

/// Run synchronous filesystem work off the async runtime
pub(crate) async fn run_blocking<T, F>(f: F) -> ImgCacheResult<T>
where
    F: FnOnce() -> ImgCacheResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ImgCacheError::Internal(format!("blocking task failed: {}", e)))?
}
