//! Error types for regauth
//!
//! All modules use `RegauthResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for regauth operations
pub type RegauthResult<T> = Result<T, RegauthError>;

/// All errors that can occur in regauth
#[derive(Error, Debug)]
pub enum RegauthError {
    // Decision errors, surfaced to the registry
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotImplemented(String),

    // Identity provider errors, logged but never surfaced
    #[error("GitLab request failed: {0}")]
    Provider(String),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Invalid publish access level configuration: {0}")]
    InvalidPublishLevel(String),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RegauthError {
    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a config validation error
    pub fn config_invalid(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// HTTP status the registry should answer with
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::NotImplemented(_) => 501,
            Self::Provider(_) => 502,
            _ => 500,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ConfigInvalid { .. } => Some("Run: regauth config show"),
            Self::ConfigNotFound(_) => Some("Pass --config or set REGAUTH_CONFIG"),
            Self::InvalidPublishLevel(_) => {
                Some("Valid levels: guest, reporter, developer, maintainer, owner")
            }
            Self::Unauthorized(_) => {
                Some("Use a GitLab personal access token as the password")
            }
            _ => None,
        }
    }
}
