//! Short-lived credential cache
//!
//! Holds the result of a successful GitLab verification for a bounded time so
//! repeated requests with the same credentials skip the remote lookup.

pub mod key;
pub mod store;

pub use key::CacheKey;
pub use store::{CachedIdentity, CredentialCache, DEFAULT_TTL_SECS};
