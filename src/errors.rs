use thiserror::Error;

/// Error taxonomy for the matching pipeline.
///
/// Transport- and validation-level failures (`FetchFailed`,
/// `InvalidEmbeddingShape`, `AllZeroEmbedding`) are raised at the embedding
/// client boundary and must never be persisted or used for matching.
/// Store-level failures (`Persistence`, `Query`) propagate unchanged; no
/// automatic retry anywhere (fail fast, let the operator retry).
#[derive(Error, Debug)]
pub enum MantaMatchError {
    #[error("Image fetch failed: {0}")]
    FetchFailed(String),

    #[error("Embedding service error ({status}): {body}")]
    EmbeddingService { status: u16, body: String },

    #[error("Invalid embedding shape: expected {expected} dimensions, got {actual}")]
    InvalidEmbeddingShape { expected: usize, actual: usize },

    #[error("All-zero embedding returned (image sha256 {0})")]
    AllZeroEmbedding(String),

    #[error("Persistence error: {0}")]
    Persistence(sqlx::Error),

    #[error("Vector query error: {0}")]
    Query(sqlx::Error),

    #[error("Verification service error ({status}): {body}")]
    VerificationService { status: u16, body: String },

    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Dropped stale or torn-down work. Never surfaced to the operator.
    #[error("Operation cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Catalog entry not found: {0}")]
    CatalogEntryNotFound(i64),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MantaMatchError {
    /// Map a reqwest transport failure, keeping timeouts as their own kind.
    pub fn from_transport(err: &reqwest::Error, context: &str) -> Self {
        if err.is_timeout() {
            Self::Timeout(format!("{context}: {err}"))
        } else {
            Self::Http(format!("{context}: {err}"))
        }
    }

    /// True for failures the review flow hides from the operator.
    #[must_use]
    pub const fn is_silent(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, MantaMatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_distinguish_kinds() {
        let shape = MantaMatchError::InvalidEmbeddingShape {
            expected: 1024,
            actual: 768,
        };
        assert!(shape.to_string().contains("expected 1024"));

        let service = MantaMatchError::EmbeddingService {
            status: 500,
            body: "model not loaded".to_string(),
        };
        assert!(service.to_string().contains("500"));
        assert!(service.to_string().contains("model not loaded"));
    }

    #[test]
    fn cancelled_is_silent() {
        assert!(MantaMatchError::Cancelled.is_silent());
        assert!(!MantaMatchError::FetchFailed("x".to_string()).is_silent());
    }
}
