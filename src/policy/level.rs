//! GitLab access levels used for publish control

use crate::error::RegauthError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minimum GitLab role required to publish, in increasing order of privilege
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PublishLevel {
    Guest,
    Reporter,
    Developer,
    Maintainer,
    Owner,
}

impl PublishLevel {
    /// Numeric access level as reported by the GitLab API
    pub fn access_level(&self) -> u32 {
        match self {
            Self::Guest => 10,
            Self::Reporter => 20,
            Self::Developer => 30,
            Self::Maintainer => 40,
            Self::Owner => 50,
        }
    }

    /// Name without the `$` prefix
    pub fn name(&self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::Reporter => "reporter",
            Self::Developer => "developer",
            Self::Maintainer => "maintainer",
            Self::Owner => "owner",
        }
    }

    /// All levels from least to most privileged
    pub fn all() -> &'static [Self] {
        &[
            Self::Guest,
            Self::Reporter,
            Self::Developer,
            Self::Maintainer,
            Self::Owner,
        ]
    }
}

impl Default for PublishLevel {
    fn default() -> Self {
        Self::Maintainer
    }
}

impl fmt::Display for PublishLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.name())
    }
}

impl FromStr for PublishLevel {
    type Err = RegauthError;

    /// Accepts both `$maintainer` and `maintainer`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bare = s.strip_prefix('$').unwrap_or(s);
        Self::all()
            .iter()
            .copied()
            .find(|level| level.name() == bare)
            .ok_or_else(|| RegauthError::InvalidPublishLevel(s.to_string()))
    }
}

impl TryFrom<String> for PublishLevel {
    type Error = RegauthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PublishLevel> for String {
    fn from(level: PublishLevel) -> Self {
        level.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_prefix() {
        assert_eq!("$owner".parse::<PublishLevel>().unwrap(), PublishLevel::Owner);
        assert_eq!(
            "developer".parse::<PublishLevel>().unwrap(),
            PublishLevel::Developer
        );
    }

    #[test]
    fn rejects_unknown_level() {
        let err = "$admin".parse::<PublishLevel>().unwrap_err();
        assert!(matches!(err, RegauthError::InvalidPublishLevel(ref s) if s == "$admin"));
    }

    #[test]
    fn ordering_follows_privilege() {
        assert!(PublishLevel::Guest < PublishLevel::Reporter);
        assert!(PublishLevel::Maintainer < PublishLevel::Owner);
        let levels: Vec<u32> = PublishLevel::all().iter().map(|l| l.access_level()).collect();
        assert_eq!(levels, vec![10, 20, 30, 40, 50]);
    }

    #[test]
    fn displays_with_prefix() {
        assert_eq!(PublishLevel::default().to_string(), "$maintainer");
    }
}
