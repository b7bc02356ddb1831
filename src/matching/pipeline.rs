//! Identification pipeline: embed, rank, verify

use std::sync::Arc;

use futures::stream::StreamExt;
use futures::stream::{
    self,
};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::info;

use crate::database::Database;
use crate::embeddings::EmbeddingClient;
use crate::errors::MantaMatchError;
use crate::errors::Result;
use crate::imaging::ImageFetcher;
use crate::models::MatchCandidate;
use crate::verification::SiftClient;

/// Bounded fan-out for concurrent verification calls
const VERIFY_CONCURRENCY: usize = 4;

/// Orchestrates the identification flow against the embedding service, the
/// vector store and the verification service.
///
/// Constructed once at startup; all clients are owned explicitly and shared
/// via `Arc`, never module-level state.
pub struct MatchPipeline {
    fetcher: Arc<ImageFetcher>,
    embedder: Arc<EmbeddingClient>,
    sift: Arc<SiftClient>,
    database: Arc<Database>,
    match_count: usize,
    match_threshold: f32,
    verify_top: usize,
    photo_base_url: String,
}

impl MatchPipeline {
    pub fn new(
        fetcher: Arc<ImageFetcher>,
        embedder: Arc<EmbeddingClient>,
        sift: Arc<SiftClient>,
        database: Arc<Database>,
        config: &crate::config::AppConfig,
    ) -> Self {
        Self {
            fetcher,
            embedder,
            sift,
            database,
            match_count: config.match_count(),
            match_threshold: config.match_threshold(),
            verify_top: config.verify_top(),
            photo_base_url: config.storage.photo_base_url.clone(),
        }
    }

    /// Build a pipeline with all clients derived from the config.
    pub async fn from_config(config: &crate::config::AppConfig) -> Result<Self> {
        let timeout = std::time::Duration::from_secs(config.embedding.request_timeout_secs);
        Ok(Self::new(
            Arc::new(ImageFetcher::new(timeout)?),
            Arc::new(EmbeddingClient::from_config(config)?),
            Arc::new(SiftClient::from_config(config)?),
            Arc::new(Database::from_config(config).await?),
            config,
        ))
    }

    /// Resolve a stored photo path to a fetchable URL.
    #[must_use]
    pub fn photo_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.photo_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Embed a query photo and return ranked candidates.
    ///
    /// Result is ordered by descending similarity (store contract: ties by
    /// ascending catalog id). An empty list means nothing cleared the
    /// threshold, not an error.
    pub async fn identify(&self, image_bytes: &[u8]) -> Result<Vec<MatchCandidate>> {
        let embedding = self.embedder.compute(image_bytes).await?;
        let scored = self
            .database
            .match_embeddings(&embedding, self.match_count, self.match_threshold)
            .await?;

        debug!("Query produced {} candidates", scored.len());
        Ok(scored.iter().map(MatchCandidate::from_scored).collect())
    }

    /// Fetch a photo by URL and identify it.
    pub async fn identify_url(&self, url: &str) -> Result<Vec<MatchCandidate>> {
        let bytes = self.fetcher.fetch(url).await?;
        self.identify(&bytes).await
    }

    /// Cancellable identify for UI-driven queries: aborts promptly when the
    /// initiating context is torn down, yielding `Cancelled`.
    pub async fn identify_url_cancellable(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<MatchCandidate>> {
        tokio::select! {
            () = cancel.cancelled() => Err(MantaMatchError::Cancelled),
            result = self.identify_url(url) => result,
        }
    }

    /// Annotate the top candidates with geometric verification.
    ///
    /// Verifications run concurrently with a bounded fan-out and no ordering
    /// guarantee among completions; per-candidate failures and candidates
    /// without a stored photo degrade to an unverified badge.
    pub async fn verify_candidates(
        &self,
        query_photo_url: &str,
        candidates: Vec<MatchCandidate>,
    ) -> Vec<MatchCandidate> {
        let verify_top = self.verify_top;

        stream::iter(candidates.into_iter().enumerate())
            .map(|(rank, mut candidate)| {
                let sift = Arc::clone(&self.sift);
                let database = Arc::clone(&self.database);
                async move {
                    if rank >= verify_top {
                        return candidate;
                    }

                    let candidate_url = match database
                        .get_catalog_entry(candidate.pk_catalog_id)
                        .await
                    {
                        Ok(entry) => entry.best_photo_path.map(|p| self.photo_url(&p)),
                        Err(e) => {
                            debug!(
                                "Skipping verification for {}: {}",
                                candidate.pk_catalog_id, e
                            );
                            None
                        }
                    };

                    candidate.verification = sift
                        .verify_candidate(Some(query_photo_url), candidate_url.as_deref())
                        .await;
                    candidate
                }
            })
            .buffered(VERIFY_CONCURRENCY)
            .collect()
            .await
    }

    /// Embed one catalog photo and store the vector (backfill unit of work).
    ///
    /// Validation failures from the embedding client abort before anything
    /// is written.
    pub async fn index_photo(&self, pk_catalog_id: i64, image_bytes: &[u8]) -> Result<()> {
        let embedding = self.embedder.compute(image_bytes).await?;
        self.database
            .upsert_embedding(pk_catalog_id, &embedding)
            .await?;
        info!("Indexed embedding for catalog {}", pk_catalog_id);
        Ok(())
    }

    /// Fetch a catalog entry's best photo and index it.
    pub async fn index_entry(&self, pk_catalog_id: i64) -> Result<()> {
        let entry = self.database.get_catalog_entry(pk_catalog_id).await?;
        let path = entry.best_photo_path.ok_or_else(|| {
            MantaMatchError::FetchFailed(format!("catalog {pk_catalog_id} has no photo"))
        })?;
        let bytes = self.fetcher.fetch(&self.photo_url(&path)).await?;
        self.index_photo(pk_catalog_id, &bytes).await
    }

    #[must_use]
    pub fn database(&self) -> &Arc<Database> {
        &self.database
    }

    #[must_use]
    pub fn embedder(&self) -> &Arc<EmbeddingClient> {
        &self.embedder
    }

    #[must_use]
    pub fn sift(&self) -> &Arc<SiftClient> {
        &self.sift
    }

    #[must_use]
    pub fn fetcher(&self) -> &Arc<ImageFetcher> {
        &self.fetcher
    }
}
