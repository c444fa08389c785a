//! Configuration management for imgcache

pub mod schema;

pub use schema::Config;

use crate::error::{ImgCacheError, ImgCacheResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Project-local config file name, discovered by walking up from the cwd
pub const LOCAL_CONFIG_FILE: &str = ".imgcache.toml";

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("imgcache")
            .join("config.toml")
    }

    /// Find the nearest `.imgcache.toml` in `start` or its ancestors
    pub fn find_local_config(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(LOCAL_CONFIG_FILE))
            .find(|candidate| candidate.is_file())
    }

    /// Load configuration, using defaults if the file does not exist
    pub async fn load(&self) -> ImgCacheResult<Config> {
        self.load_merged(None).await
    }

    /// Load the global configuration with an optional local file merged on
    /// top. Tables merge key by key; local values win.
    pub async fn load_merged(&self, local: Option<&Path>) -> ImgCacheResult<Config> {
        let mut merged = toml::Table::new();

        if self.config_path.exists() {
            merged = read_table(&self.config_path).await?;
        } else {
            debug!("Config file not found, using defaults");
        }

        if let Some(local) = local {
            let overlay = read_table(local).await?;
            merge_tables(&mut merged, overlay);
            debug!("Merged local config {}", local.display());
        }

        let origin = local.unwrap_or(&self.config_path);
        let config: Config = toml::Value::Table(merged).try_into().map_err(
            |e: toml::de::Error| ImgCacheError::ConfigInvalid {
                path: origin.to_path_buf(),
                reason: e.to_string(),
            },
        )?;

        config
            .resolver_options()
            .validate()
            .map_err(|e| ImgCacheError::ConfigInvalid {
                path: origin.to_path_buf(),
                reason: format!("cache.dir_name: {}", e),
            })?;

        Ok(config)
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> ImgCacheResult<()> {
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            ImgCacheError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensure the config directory exists
    async fn ensure_config_dir(&self) -> ImgCacheResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ImgCacheError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

async fn read_table(path: &Path) -> ImgCacheResult<toml::Table> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| ImgCacheError::io(format!("reading config from {}", path.display()), e))?;

    toml::from_str(&content).map_err(|e| ImgCacheError::ConfigInvalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Deep-merge `overlay` into `base`
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Ratio;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_default_when_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nonexistent.toml");
        let manager = ConfigManager::with_path(path);

        let config = manager.load().await.unwrap();
        assert_eq!(config.transform.size, 200);
        assert_eq!(config.cache.dir_name, "cache");
    }

    #[tokio::test]
    async fn save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");
        let manager = ConfigManager::with_path(path);

        let mut config = Config::default();
        config.transform.ratio = Ratio::new(4, 3);
        config.cache.jobs = 9;

        manager.save(&config).await.unwrap();
        let loaded = manager.load().await.unwrap();

        assert_eq!(loaded.transform.ratio, Ratio::new(4, 3));
        assert_eq!(loaded.cache.jobs, 9);
    }

    #[tokio::test]
    async fn local_config_overrides_global() {
        let temp = TempDir::new().unwrap();
        let global = temp.path().join("config.toml");
        let local = temp.path().join(LOCAL_CONFIG_FILE);
        std::fs::write(&global, "[transform]\nsize = 300\nquality = 90\n").unwrap();
        std::fs::write(&local, "[transform]\nsize = 120\n[cache]\njobs = 2\n").unwrap();

        let config = ConfigManager::with_path(global)
            .load_merged(Some(&local))
            .await
            .unwrap();

        assert_eq!(config.transform.size, 120);
        assert_eq!(config.transform.quality, 90);
        assert_eq!(config.cache.jobs, 2);
    }

    #[tokio::test]
    async fn invalid_config_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[transform]\nsize = \"big\"\n").unwrap();

        let err = ConfigManager::with_path(path.clone()).load().await.unwrap_err();
        match err {
            ImgCacheError::ConfigInvalid { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected ConfigInvalid, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn escaping_cache_dir_name_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        for bad in ["", ".", "..", "../escaped", "/tmp/cache", "nested/cache"] {
            std::fs::write(&path, format!("[cache]\ndir_name = {:?}\n", bad)).unwrap();
            let err = ConfigManager::with_path(path.clone()).load().await.unwrap_err();
            assert!(
                matches!(err, ImgCacheError::ConfigInvalid { .. }),
                "dir_name {bad:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn find_local_config_walks_up() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp.path().join(LOCAL_CONFIG_FILE), "").unwrap();

        let found = ConfigManager::find_local_config(&nested).unwrap();
        assert_eq!(found, temp.path().join(LOCAL_CONFIG_FILE));
    }
}
