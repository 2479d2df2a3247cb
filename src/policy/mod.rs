//! Authentication and authorization decisions backed by GitLab
//!
//! `AccessPolicy` is what the registry calls for every request:
//! - `authenticate` resolves credentials to groups, consulting the
//!   credential cache before GitLab
//! - `allow_access` and `allow_publish` decide on an already-resolved caller
//!   and never talk to GitLab
//!
//! Packages not marked as GitLab-managed get `Ok(false)`, which tells the
//! registry to ask its other auth plugins rather than deny.

pub mod level;
pub mod matching;
pub mod package;

pub use level::PublishLevel;
pub use matching::{match_group_with_package, SCOPE_MARKER};
pub use package::{CallerIdentity, PackageDescriptor};

use crate::cache::{CachedIdentity, CredentialCache};
use crate::config::Config;
use crate::error::{RegauthError, RegauthResult};
use crate::provider::{GitlabVerifier, IdentityVerifier};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, trace};

/// Access rule granting everyone, including anonymous callers
pub const ANONYMOUS_ALL: &str = "$all";

/// Access rules that admit anonymous callers
pub const ANONYMOUS_ACCESS_LEVELS: &[&str] = &["$anonymous", ANONYMOUS_ALL];

/// What a publish permission was (or would have to be) granted on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishPermit {
    /// A group matched the package name or its scope path
    PackageName,
    /// Role-based permission on the package scope, not yet granted by any rule
    PackageScope,
}

impl fmt::Display for PublishPermit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PackageName => f.write_str("package-name"),
            Self::PackageScope => f.write_str("package-scope"),
        }
    }
}

/// GitLab-backed auth plugin state
pub struct AccessPolicy {
    verifier: Arc<dyn IdentityVerifier>,
    cache: Option<CredentialCache>,
    publish_level: PublishLevel,
    default_allow_access: Vec<String>,
}

impl AccessPolicy {
    /// Build a policy using the given identity verifier
    ///
    /// When called inside a tokio runtime, the cache's eviction sweeper is
    /// started as well. Outside a runtime expired entries are still never
    /// returned, they are just not purged.
    pub fn new(config: &Config, verifier: Arc<dyn IdentityVerifier>) -> RegauthResult<Self> {
        config.validate(Path::new("<config>"))?;
        info!("GitLab url: {}", config.gitlab.url);

        let cache = if config.auth_cache.enabled {
            let cache = CredentialCache::with_ttl_secs(config.auth_cache.ttl);
            if tokio::runtime::Handle::try_current().is_ok() {
                cache.spawn_sweeper();
            }
            info!(
                "Initialized auth cache with ttl: {} seconds",
                config.auth_cache.ttl
            );
            Some(cache)
        } else {
            info!("Auth cache disabled");
            None
        };

        let publish_level = config.effective_publish_level();
        if config.legacy_mode {
            info!("Legacy mode (pre GitLab v11.2) active, publish is only allowed to group owners");
        } else {
            info!("Publish control level: {}", publish_level);
        }

        Ok(Self {
            verifier,
            cache,
            publish_level,
            default_allow_access: config.default_allow_access.clone(),
        })
    }

    /// Build a policy that verifies tokens against the configured GitLab
    pub fn gitlab(config: &Config) -> RegauthResult<Self> {
        Self::new(config, Arc::new(GitlabVerifier::new(&config.gitlab)))
    }

    /// Effective publish level after legacy mode
    pub fn publish_level(&self) -> PublishLevel {
        self.publish_level
    }

    /// The credential cache, if enabled
    pub fn cache(&self) -> Option<&CredentialCache> {
        self.cache.as_ref()
    }

    /// Resolve credentials to the caller's groups
    ///
    /// The password is a GitLab personal access token. Cache hits return
    /// without contacting GitLab. Provider failures are logged and reported
    /// as a generic unauthorized error.
    pub async fn authenticate(&self, user: &str, password: &str) -> RegauthResult<Vec<String>> {
        trace!("Authenticate called for user: {}", user);

        if let Some(groups) = self.cached_groups(user, password) {
            debug!(
                "User {} found in cache, authenticated with groups: {:?}",
                user, groups
            );
            return Ok(groups);
        }

        trace!("User {} not found in cache", user);

        let verified = match self.verifier.verify(password).await {
            Ok(verified) => verified,
            Err(e) => {
                error!("User {} error querying GitLab user data: {}", user, e);
                return Err(RegauthError::unauthorized("error authenticating user"));
            }
        };

        if verified.username != user {
            debug!(
                "GitLab token belongs to {}, not {}",
                verified.username, user
            );
            return Err(RegauthError::unauthorized("wrong gitlab username"));
        }

        // TODO: fetch the user's groups at `access_level()` or above instead of
        // returning only the user name
        trace!(
            "Publish level {} maps to GitLab access level {}",
            self.publish_level,
            self.publish_level.access_level()
        );
        let groups = vec![user.to_string()];

        self.store_cached_groups(user, password, &groups);
        Ok(groups)
    }

    /// Registration is handled by GitLab, so any user is accepted
    pub fn add_user(&self, user: &str, _password: &str) -> RegauthResult<bool> {
        trace!("Add user called for user: {}", user);
        Ok(true)
    }

    /// Passwords are GitLab tokens and cannot be changed through the registry
    pub fn change_password(
        &self,
        user: &str,
        _password: &str,
        _new_password: &str,
    ) -> RegauthResult<bool> {
        trace!("Change password called for user: {}", user);
        Err(RegauthError::NotImplemented(
            "You are using the GitLab integration. Please change your password in GitLab"
                .to_string(),
        ))
    }

    /// Decide whether the caller may read the package
    ///
    /// Any authenticated caller may read. Anonymous callers need `$all` or
    /// `$anonymous` in the package rules, or in the configured defaults when
    /// the package declares none.
    pub fn allow_access(
        &self,
        caller: &CallerIdentity,
        package: &PackageDescriptor,
    ) -> RegauthResult<bool> {
        if !package.gitlab {
            return Ok(false);
        }

        if caller.is_authenticated() {
            debug!(
                "Allow user {} authenticated access to package {}",
                caller.display_name(),
                package.name
            );
            return Ok(true);
        }

        let package_access = if package.access.is_empty() {
            &self.default_allow_access
        } else {
            &package.access
        };

        let anonymous_allowed = ANONYMOUS_ACCESS_LEVELS
            .iter()
            .any(|level| package_access.iter().any(|rule| rule.as_str() == *level));

        if anonymous_allowed {
            debug!("Allow anonymous access to package {}", package.name);
            Ok(true)
        } else {
            debug!("Deny access to package {}", package.name);
            Err(RegauthError::unauthorized(
                "access denied, user not authenticated and anonymous access disabled",
            ))
        }
    }

    /// Decide whether the caller may publish the package
    ///
    /// Publishing needs a group equal to the package name, or a group whose
    /// path is a prefix of the package scope.
    pub fn allow_publish(
        &self,
        caller: &CallerIdentity,
        package: &PackageDescriptor,
    ) -> RegauthResult<bool> {
        if !package.gitlab {
            return Ok(false);
        }

        if let Some(permit) = self.publish_permit(caller, package) {
            debug!(
                "User {} allowed to publish package {} based on {}",
                caller.display_name(),
                package.name,
                permit
            );
            return Ok(true);
        }

        debug!(
            "User {} denied from publishing package {}",
            caller.display_name(),
            package.name
        );
        let missing = if package.is_scoped() {
            PublishPermit::PackageScope
        } else {
            PublishPermit::PackageName
        };
        Err(RegauthError::unauthorized(format!(
            "must have required permissions: {} at {}",
            self.publish_level, missing
        )))
    }

    /// First permit the caller's groups grant on the package
    fn publish_permit(
        &self,
        caller: &CallerIdentity,
        package: &PackageDescriptor,
    ) -> Option<PublishPermit> {
        let name_permit = caller.real_groups.iter().any(|group| {
            trace!(
                "Publish: checking group {} for user {} and package {}",
                group,
                caller.display_name(),
                package.name
            );
            match_group_with_package(group, &package.name)
        });

        // PackageScope is reserved for role-based scope permissions
        name_permit.then_some(PublishPermit::PackageName)
    }

    fn cached_groups(&self, user: &str, password: &str) -> Option<Vec<String>> {
        let cache = self.cache.as_ref()?;
        cache
            .find(user, password)
            .map(|identity| identity.groups().to_vec())
    }

    fn store_cached_groups(&self, user: &str, password: &str, groups: &[String]) {
        let Some(cache) = &self.cache else {
            return;
        };
        debug!("Saving data in cache for user: {}", user);
        cache.store(user, password, CachedIdentity::new(user, groups.to_vec()));
    }
}
