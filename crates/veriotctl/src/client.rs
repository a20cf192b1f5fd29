//! HTTP client for the veriotd API.

use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::time::Duration;
use veriot_common::{HealthResponse, TopologyResponse, VerifyRequest, VerifyResponse};

/// Timeout for registry and health reads (ms). Local daemon, small bodies.
const READ_TIMEOUT_MS: u64 = 5_000;

/// Timeout for verification calls (ms). The rule engine is fast; this only
/// guards against a wedged daemon.
const VERIFY_TIMEOUT_MS: u64 = 15_000;

/// Client for the verification daemon.
#[derive(Debug, Clone)]
pub struct VerifierClient {
    base_url: String,
    http: reqwest::Client,
}

impl VerifierClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Daemon health and registry counts.
    pub async fn health(&self) -> Result<HealthResponse> {
        let url = format!("{}/v1/health", self.base_url);
        let resp = self
            .http
            .get(&url)
            .timeout(Duration::from_millis(READ_TIMEOUT_MS))
            .send()
            .await
            .with_context(|| format!("connecting to verifier at {}", self.base_url))?;

        if !resp.status().is_success() {
            return Err(anyhow!("Verifier health check returned {}", resp.status()));
        }
        resp.json().await.context("parsing health response")
    }

    /// Current topology snapshot. Used as context for the translation stage.
    pub async fn topology(&self) -> Result<TopologyResponse> {
        let url = format!("{}/v1/topology", self.base_url);
        let resp = self
            .http
            .get(&url)
            .timeout(Duration::from_millis(READ_TIMEOUT_MS))
            .send()
            .await
            .with_context(|| format!("connecting to verifier at {}", self.base_url))?;

        if !resp.status().is_success() {
            return Err(anyhow!("Topology request returned {}", resp.status()));
        }
        resp.json().await.context("parsing topology response")
    }

    /// Submit a configuration for verification.
    pub async fn verify(&self, verification_type: &str, commands: Value) -> Result<VerifyResponse> {
        let url = format!("{}/v1/verify", self.base_url);
        let request = VerifyRequest {
            verification_type: verification_type.to_string(),
            commands,
        };

        let resp = self
            .http
            .post(&url)
            .timeout(Duration::from_millis(VERIFY_TIMEOUT_MS))
            .json(&request)
            .send()
            .await
            .with_context(|| format!("connecting to verifier at {}", self.base_url))?;

        if !resp.status().is_success() {
            return Err(anyhow!("Verify request returned {}", resp.status()));
        }
        resp.json().await.context("parsing verify response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = VerifierClient::new("http://127.0.0.1:7410/");
        assert_eq!(client.base_url(), "http://127.0.0.1:7410");
    }
}
