//! Data model for the matching pipeline
//!
//! Persistent rows (`CatalogEntry`, stored embeddings, self-match outcomes)
//! map onto Postgres tables; `MatchCandidate` and `VerificationResult` are
//! transient, produced per query and discarded with the review session.

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// A unique individual in the catalog, with its best representative photo.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CatalogEntry {
    pub id: Uuid,
    /// Human-facing numeric catalog id; embeddings are keyed by this.
    pub pk_catalog_id: i64,
    pub name: Option<String>,
    /// Storage path of the best ventral photo, relative to the photo base URL
    pub best_photo_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One row of the nearest-neighbor query: catalog id plus cosine similarity.
///
/// Ordering contract: descending `score`, ties broken by ascending
/// `pk_catalog_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMatch {
    pub pk_catalog_id: i64,
    pub score: f32,
}

/// Outcome of geometric (SIFT) verification for one image pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub inliers: i64,
    pub inlier_ratio: f32,
}

/// A ranked candidate presented to the operator during match review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub pk_catalog_id: i64,
    pub score: f32,
    /// `None` until verification ran (or when it was skipped / unavailable)
    pub verification: Option<VerificationResult>,
}

impl MatchCandidate {
    #[must_use]
    pub const fn from_scored(scored: &ScoredMatch) -> Self {
        Self {
            pk_catalog_id: scored.pk_catalog_id,
            score: scored.score,
            verification: None,
        }
    }
}

/// Health report of the embedding service (`GET /health`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedHealth {
    pub ok: bool,
    #[serde(default)]
    pub model: Option<String>,
    pub dim: usize,
}

/// Health report of the verification service (`GET /health`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiftHealth {
    pub ok: bool,
    #[serde(default)]
    pub sift_nfeatures: Option<u32>,
}

/// One self-match regression record: did a catalog photo rank its own
/// catalog entry first?
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SelfMatchOutcome {
    pub pk_catalog_id: i64,
    pub matched_pk_catalog_id: i64,
    pub match_rank: i32,
    pub similarity: f32,
    pub is_correct_top_match: bool,
    pub photo_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_starts_unverified() {
        let candidate = MatchCandidate::from_scored(&ScoredMatch {
            pk_catalog_id: 42,
            score: 0.93,
        });
        assert_eq!(candidate.pk_catalog_id, 42);
        assert!(candidate.verification.is_none());
    }
}
