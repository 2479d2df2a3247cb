//! Configuration management for regauth

pub mod schema;

pub use schema::{AuthCacheConfig, Config, GitlabConfig};

use crate::error::{RegauthError, RegauthResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

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
            .join("regauth")
            .join("config.toml")
    }

    /// Load configuration, falling back to defaults if the file does not exist
    pub async fn load(&self) -> RegauthResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration that must exist
    pub async fn load_required(&self) -> RegauthResult<Config> {
        if !self.config_path.exists() {
            return Err(RegauthError::ConfigNotFound(self.config_path.clone()));
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load and validate configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> RegauthResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| RegauthError::io(format!("reading config from {}", path.display()), e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| RegauthError::config_invalid(path, e.to_string()))?;

        config.validate(path)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> RegauthResult<()> {
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            RegauthError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensure the config directory exists
    async fn ensure_config_dir(&self) -> RegauthResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                RegauthError::io(format!("creating directory {}", parent.display()), e)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PublishLevel;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_default_when_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nonexistent.toml");
        let manager = ConfigManager::with_path(path);

        let config = manager.load().await.unwrap();
        assert_eq!(config.gitlab.url, "https://gitlab.com");
    }

    #[tokio::test]
    async fn load_required_fails_when_missing() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp.path().join("nope.toml"));

        let err = manager.load_required().await.unwrap_err();
        assert!(matches!(err, RegauthError::ConfigNotFound(_)));
    }

    #[tokio::test]
    async fn save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");
        let manager = ConfigManager::with_path(path);

        let mut config = Config::default();
        config.gitlab.url = "https://gitlab.example.com".to_string();
        config.publish = PublishLevel::Owner;

        manager.save(&config).await.unwrap();
        let loaded = manager.load().await.unwrap();

        assert_eq!(loaded.gitlab.url, "https://gitlab.example.com");
        assert_eq!(loaded.publish, PublishLevel::Owner);
    }

    #[tokio::test]
    async fn invalid_values_fail_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        tokio::fs::write(&path, "[auth_cache]\nttl = 0\n").await.unwrap();

        let err = ConfigManager::with_path(path).load().await.unwrap_err();
        assert!(matches!(err, RegauthError::ConfigInvalid { .. }));
    }

    #[tokio::test]
    async fn unknown_publish_level_fails_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        tokio::fs::write(&path, "publish = \"superuser\"\n").await.unwrap();

        let err = ConfigManager::with_path(path).load().await.unwrap_err();
        assert!(err.to_string().contains("superuser"));
    }
}
