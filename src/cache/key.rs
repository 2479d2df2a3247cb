//! One-way cache keys for credential pairs
//!
//! A key is the SHA-256 of the length-prefixed username and secret, so the
//! same pair always lands in the same slot while stored keys reveal nothing
//! about the secret.

use sha2::{Digest, Sha256};
use std::fmt;

/// Hex-encoded SHA-256 digest identifying a `(username, secret)` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key for a credential pair
    pub fn derive(username: &str, secret: &str) -> Self {
        let mut hasher = Sha256::new();
        // Length prefixes keep ("ab", "c") and ("a", "bc") apart
        hasher.update((username.len() as u64).to_le_bytes());
        hasher.update(username.as_bytes());
        hasher.update((secret.len() as u64).to_le_bytes());
        hasher.update(secret.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn same_pair_same_key() {
        assert_eq!(
            CacheKey::derive("alice", "glpat-123"),
            CacheKey::derive("alice", "glpat-123")
        );
    }

    #[test]
    fn key_is_fixed_length_hex() {
        let key = CacheKey::derive("alice", "glpat-123");
        assert_eq!(key.as_str().len(), 64);
        assert!(key.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!key.as_str().contains("glpat"));
    }

    #[test]
    fn boundary_shift_changes_key() {
        assert_ne!(CacheKey::derive("ab", "c"), CacheKey::derive("a", "bc"));
        assert_ne!(CacheKey::derive("", "abc"), CacheKey::derive("abc", ""));
    }

    #[test]
    fn no_collisions_across_sample() {
        let mut keys = HashSet::new();
        for user in 0..100 {
            for secret in 0..100 {
                let key = CacheKey::derive(&format!("user{user}"), &format!("token{secret}"));
                assert!(keys.insert(key), "collision at user{user}/token{secret}");
            }
        }
        assert_eq!(keys.len(), 10_000);
    }
}
