//! HTTP client for the external embedding service

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::errors::MantaMatchError;
use crate::errors::Result;
use crate::imaging;
use crate::models::EmbedHealth;

/// Client for the image embedding service.
///
/// Owns its HTTP connection pool and the expected output dimensionality.
/// Every call is a single attempt; retry policy belongs to the caller so
/// service-health signals reach the operator undamped.
#[derive(Debug)]
pub struct EmbeddingClient {
    endpoint: String,
    dimension: usize,
    client: Client,
}

impl EmbeddingClient {
    /// Create a new embedding client
    ///
    /// # Errors
    /// - HTTP client build errors (invalid configuration)
    pub fn new(endpoint: String, dimension: usize, timeout: Duration) -> Result<Self> {
        if dimension == 0 {
            return Err(MantaMatchError::Config(
                "embedding dimension must be non-zero".to_string(),
            ));
        }
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(16)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| MantaMatchError::Http(e.to_string()))?;

        Ok(Self {
            endpoint,
            dimension,
            client,
        })
    }

    /// Create from application config
    pub fn from_config(config: &crate::config::AppConfig) -> Result<Self> {
        Self::new(
            config.embedding.endpoint.clone(),
            config.embedding.dimension,
            Duration::from_secs(config.embedding.request_timeout_secs),
        )
    }

    /// Expected output dimensionality
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Compute the embedding for one image.
    ///
    /// Validates the response before returning: wrong-length vectors fail
    /// with `InvalidEmbeddingShape`, degenerate all-zero vectors with
    /// `AllZeroEmbedding`. Neither must ever be persisted.
    ///
    /// # Errors
    /// - `EmbeddingService` on non-2xx responses (service body surfaced)
    /// - `Timeout` when the configured request timeout elapses
    /// - `InvalidEmbeddingShape` / `AllZeroEmbedding` on bad vectors
    pub async fn compute(&self, image_bytes: &[u8]) -> Result<Vec<f32>> {
        if image_bytes.is_empty() {
            return Err(MantaMatchError::FetchFailed(
                "empty image data".to_string(),
            ));
        }

        #[derive(Serialize)]
        struct EmbedRequest {
            image_base64: String,
        }

        #[derive(Deserialize)]
        struct EmbedResponse {
            embedding: Vec<f32>,
        }

        let digest = imaging::sha256_hex(image_bytes);
        let url = format!("{}/embed", self.endpoint);
        debug!("Calling embedding service: {} (sha256 {})", url, digest);

        let request = EmbedRequest {
            image_base64: imaging::encode_base64(image_bytes),
        };

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| MantaMatchError::from_transport(&e, "embedding service"))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(MantaMatchError::EmbeddingService { status, body });
        }

        let result: EmbedResponse = response.json().await.map_err(|e| {
            MantaMatchError::EmbeddingService {
                status: 200,
                body: format!("failed to parse response: {e}"),
            }
        })?;

        self.validate(result.embedding, &digest)
    }

    /// Probe the service health endpoint.
    pub async fn health(&self) -> Result<EmbedHealth> {
        let url = format!("{}/health", self.endpoint);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| MantaMatchError::from_transport(&e, "embedding service"))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(MantaMatchError::EmbeddingService { status, body });
        }

        response.json().await.map_err(|e| {
            MantaMatchError::EmbeddingService {
                status: 200,
                body: format!("failed to parse health response: {e}"),
            }
        })
    }

    fn validate(&self, embedding: Vec<f32>, digest: &str) -> Result<Vec<f32>> {
        if embedding.len() != self.dimension {
            return Err(MantaMatchError::InvalidEmbeddingShape {
                expected: self.dimension,
                actual: embedding.len(),
            });
        }
        // An all-zero vector means the model failed, not that the image has
        // no features. Reject instead of silently matching everything.
        if embedding.iter().all(|v| *v == 0.0) {
            return Err(MantaMatchError::AllZeroEmbedding(digest.to_string()));
        }
        Ok(embedding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(dimension: usize) -> EmbeddingClient {
        EmbeddingClient::new(
            "http://localhost:5050".to_string(),
            dimension,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn validate_accepts_expected_shape() {
        let client = test_client(4);
        let out = client.validate(vec![0.1, 0.2, 0.3, 0.4], "d").unwrap();
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn validate_rejects_wrong_length() {
        let client = test_client(1024);
        let err = client.validate(vec![0.1; 768], "d").unwrap_err();
        assert!(matches!(
            err,
            MantaMatchError::InvalidEmbeddingShape {
                expected: 1024,
                actual: 768
            }
        ));
    }

    #[test]
    fn validate_rejects_all_zero_vector() {
        let client = test_client(4);
        let err = client.validate(vec![0.0; 4], "abc123").unwrap_err();
        match err {
            MantaMatchError::AllZeroEmbedding(digest) => assert_eq!(digest, "abc123"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn zero_dimension_is_a_config_error() {
        let err = EmbeddingClient::new(
            "http://localhost:5050".to_string(),
            0,
            Duration::from_secs(5),
        )
        .unwrap_err();
        assert!(matches!(err, MantaMatchError::Config(_)));
    }

    #[tokio::test]
    async fn empty_image_fails_before_any_request() {
        let client = test_client(4);
        let err = client.compute(&[]).await.unwrap_err();
        assert!(matches!(err, MantaMatchError::FetchFailed(_)));
    }
}
