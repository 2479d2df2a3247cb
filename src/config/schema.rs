//! Configuration schema for regauth
//!
//! Configuration is stored at `~/.config/regauth/config.toml`

use crate::cache::DEFAULT_TTL_SECS;
use crate::error::{RegauthError, RegauthResult};
use crate::policy::{PublishLevel, ANONYMOUS_ALL};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Longest accepted cache TTL (one year)
pub const MAX_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Longest accepted GitLab request timeout
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum GitLab role allowed to publish
    pub publish: PublishLevel,

    /// Pre GitLab 11.2 behaviour: only group owners may publish
    pub legacy_mode: bool,

    /// Access rules applied when a package declares none
    pub default_allow_access: Vec<String>,

    /// GitLab server settings
    pub gitlab: GitlabConfig,

    /// Credential cache settings
    pub auth_cache: AuthCacheConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            publish: PublishLevel::default(),
            legacy_mode: false,
            default_allow_access: vec![ANONYMOUS_ALL.to_string()],
            gitlab: GitlabConfig::default(),
            auth_cache: AuthCacheConfig::default(),
        }
    }
}

impl Config {
    /// Publish level after applying legacy mode
    pub fn effective_publish_level(&self) -> PublishLevel {
        if self.legacy_mode {
            PublishLevel::Owner
        } else {
            self.publish
        }
    }

    /// Check value ranges that serde cannot express
    ///
    /// `path` is only used for error reporting.
    pub fn validate(&self, path: &Path) -> RegauthResult<()> {
        if self.gitlab.url.trim().is_empty() {
            return Err(RegauthError::config_invalid(path, "gitlab.url must not be empty"));
        }
        if !(1..=MAX_TIMEOUT_SECS).contains(&self.gitlab.timeout_secs) {
            return Err(RegauthError::config_invalid(
                path,
                format!("gitlab.timeout_secs must be between 1 and {}", MAX_TIMEOUT_SECS),
            ));
        }
        if self.auth_cache.enabled && !(1..=MAX_TTL_SECS).contains(&self.auth_cache.ttl) {
            return Err(RegauthError::config_invalid(
                path,
                format!("auth_cache.ttl must be between 1 and {}", MAX_TTL_SECS),
            ));
        }
        Ok(())
    }
}

/// GitLab server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitlabConfig {
    /// Base URL of the GitLab instance
    pub url: String,

    /// Timeout for a single user lookup in seconds
    pub timeout_secs: u64,
}

impl Default for GitlabConfig {
    fn default() -> Self {
        Self {
            url: "https://gitlab.com".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Credential cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthCacheConfig {
    /// Enable the credential cache (default: true)
    pub enabled: bool,

    /// Seconds a verified credential stays cached
    pub ttl: u64,
}

impl Default for AuthCacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: DEFAULT_TTL_SECS,
        }
    }
}
