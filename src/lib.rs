//! regauth - GitLab-backed registry authentication
//!
//! Lets a package registry delegate identity checks and publish decisions
//! to GitLab, with a short-lived credential cache in front of the GitLab API.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod policy;
pub mod provider;

pub use cache::{CachedIdentity, CredentialCache};
pub use config::Config;
pub use error::{RegauthError, RegauthResult};
pub use policy::{AccessPolicy, CallerIdentity, PackageDescriptor, PublishLevel};
pub use provider::{IdentityVerifier, VerifiedUser};
