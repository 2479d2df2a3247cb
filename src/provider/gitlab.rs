//! GitLab user lookup via the REST API

use crate::config::schema::GitlabConfig;
use crate::error::{RegauthError, RegauthResult};
use crate::provider::{IdentityVerifier, VerifiedUser};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Verifies personal access tokens against `GET /api/v4/user`
pub struct GitlabVerifier {
    agent: ureq::Agent,
    user_url: String,
}

impl GitlabVerifier {
    /// Create a verifier for the configured GitLab instance
    pub fn new(config: &GitlabConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build()
            .into();

        Self {
            agent,
            user_url: user_endpoint(&config.url),
        }
    }

    /// Endpoint queried for the current user
    pub fn user_url(&self) -> &str {
        &self.user_url
    }

    fn fetch_user(agent: &ureq::Agent, url: &str, token: &str) -> RegauthResult<VerifiedUser> {
        let mut response = agent
            .get(url)
            .header("PRIVATE-TOKEN", token)
            .call()
            .map_err(|e| RegauthError::Provider(e.to_string()))?;

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| RegauthError::Provider(format!("reading response: {}", e)))?;

        serde_json::from_str(&body)
            .map_err(|e| RegauthError::Provider(format!("decoding user: {}", e)))
    }
}

#[async_trait]
impl IdentityVerifier for GitlabVerifier {
    async fn verify(&self, token: &str) -> RegauthResult<VerifiedUser> {
        debug!("Querying GitLab user at {}", self.user_url);

        let agent = self.agent.clone();
        let url = self.user_url.clone();
        let token = token.to_string();

        // ureq is blocking, keep it off the async workers
        tokio::task::spawn_blocking(move || Self::fetch_user(&agent, &url, &token))
            .await
            .map_err(|e| RegauthError::Internal(format!("GitLab lookup task failed: {}", e)))?
    }
}

fn user_endpoint(base_url: &str) -> String {
    format!("{}/api/v4/user", base_url.trim_end_matches('/'))
}
