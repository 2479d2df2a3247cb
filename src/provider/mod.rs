//! Identity provider abstraction
//!
//! The policy only needs one thing from the provider: given a bearer token,
//! tell us which user it belongs to.

pub mod gitlab;

pub use gitlab::GitlabVerifier;

use crate::error::RegauthResult;
use async_trait::async_trait;
use serde::Deserialize;

/// User as reported by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifiedUser {
    pub username: String,
}

/// Resolves a bearer token to the user that owns it
///
/// Implementations make a single request with no retries; a failed or timed
/// out request resolves to an error.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> RegauthResult<VerifiedUser>;
}
