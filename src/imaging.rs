//! Image acquisition
//!
//! Fetches photo bytes by URL (or disk path) and prepares them for transport
//! to the embedding service: base64 encoding plus a sha256 content digest.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha2::Digest;
use sha2::Sha256;
use tracing::debug;

use crate::errors::MantaMatchError;
use crate::errors::Result;

/// HTTP image fetcher with an explicit per-request timeout.
///
/// Constructed once at startup and shared; never ambient state.
pub struct ImageFetcher {
    client: reqwest::Client,
}

impl ImageFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MantaMatchError::Http(e.to_string()))?;
        Ok(Self { client })
    }

    /// Fetch raw image bytes from a URL.
    ///
    /// Single attempt; non-2xx statuses, transport failures and empty bodies
    /// all surface as `FetchFailed` (timeouts keep their own kind).
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        debug!("Fetching image: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                MantaMatchError::Timeout(format!("image fetch {url}: {e}"))
            } else {
                MantaMatchError::FetchFailed(format!("{url}: {e}"))
            }
        })?;

        if !response.status().is_success() {
            return Err(MantaMatchError::FetchFailed(format!(
                "{url}: HTTP {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| MantaMatchError::FetchFailed(format!("{url}: {e}")))?;

        if bytes.is_empty() {
            return Err(MantaMatchError::FetchFailed(format!("{url}: empty body")));
        }

        Ok(bytes.to_vec())
    }

    /// Read image bytes from a local file.
    pub async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let bytes = tokio::fs::read(path).await?;
        if bytes.is_empty() {
            return Err(MantaMatchError::FetchFailed(format!("{path}: empty file")));
        }
        Ok(bytes)
    }
}

/// Base64-encode image bytes for the embedding service transport.
#[must_use]
pub fn encode_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Hex sha256 digest of the raw image bytes, matching the `bytes_sha256`
/// the embedding service reports.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
