//! HTTP client for the SIFT feature-matching service

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::warn;

use crate::errors::MantaMatchError;
use crate::errors::Result;
use crate::models::SiftHealth;
use crate::models::VerificationResult;

/// Client for the geometric verification service.
///
/// `verify_pair` is idempotent and side-effect-free; it may be re-invoked
/// for the same pair at any time.
pub struct SiftClient {
    endpoint: String,
    client: Client,
}

impl SiftClient {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(16)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| MantaMatchError::Http(e.to_string()))?;

        Ok(Self { endpoint, client })
    }

    /// Create from application config
    pub fn from_config(config: &crate::config::AppConfig) -> Result<Self> {
        Self::new(
            config.verification.endpoint.clone(),
            Duration::from_secs(config.verification.request_timeout_secs),
        )
    }

    /// Count geometrically-consistent feature matches between two images.
    ///
    /// # Errors
    /// - `VerificationService` on non-2xx responses. Callers present this as
    ///   "verification unavailable", distinct from zero inliers.
    /// - `Timeout` when the configured request timeout elapses
    pub async fn verify_pair(&self, url_a: &str, url_b: &str) -> Result<VerificationResult> {
        #[derive(Serialize)]
        struct SiftRequest<'a> {
            image_url_a: &'a str,
            image_url_b: &'a str,
        }

        #[derive(Deserialize)]
        struct SiftResponse {
            #[serde(default)]
            inliers: i64,
            #[serde(default)]
            inlier_ratio: f32,
        }

        let url = format!("{}/match/sift", self.endpoint);
        debug!("Calling SIFT service: {} vs {}", url_a, url_b);

        let request = SiftRequest {
            image_url_a: url_a,
            image_url_b: url_b,
        };

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| MantaMatchError::from_transport(&e, "verification service"))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(MantaMatchError::VerificationService { status, body });
        }

        let result: SiftResponse = response.json().await.map_err(|e| {
            MantaMatchError::VerificationService {
                status: 200,
                body: format!("failed to parse response: {e}"),
            }
        })?;

        Ok(VerificationResult {
            inliers: result.inliers.max(0),
            inlier_ratio: result.inlier_ratio.clamp(0.0, 1.0),
        })
    }

    /// Verification with skip-semantics for the review flow.
    ///
    /// Missing URLs make this a no-op (`None`) without issuing any request;
    /// service failures degrade to `None` with a warning instead of blocking
    /// the similarity-based workflow.
    pub async fn verify_candidate(
        &self,
        url_a: Option<&str>,
        url_b: Option<&str>,
    ) -> Option<VerificationResult> {
        let (a, b) = match (url_a, url_b) {
            (Some(a), Some(b)) => (a, b),
            _ => return None,
        };

        match self.verify_pair(a, b).await {
            Ok(result) => Some(result),
            Err(e) => {
                warn!("Verification unavailable for {} vs {}: {}", a, b, e);
                None
            }
        }
    }

    /// Probe the service health endpoint.
    pub async fn health(&self) -> Result<SiftHealth> {
        let url = format!("{}/health", self.endpoint);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| MantaMatchError::from_transport(&e, "verification service"))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(MantaMatchError::VerificationService { status, body });
        }

        response.json().await.map_err(|e| {
            MantaMatchError::VerificationService {
                status: 200,
                body: format!("failed to parse health response: {e}"),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_urls_skip_without_request() {
        // Endpoint is unroutable; any issued request would error loudly.
        let client = SiftClient::new(
            "http://localhost:1".to_string(),
            Duration::from_millis(100),
        )
        .unwrap();

        assert!(client.verify_candidate(None, Some("http://x/a.jpg")).await.is_none());
        assert!(client.verify_candidate(Some("http://x/a.jpg"), None).await.is_none());
        assert!(client.verify_candidate(None, None).await.is_none());
    }
}
