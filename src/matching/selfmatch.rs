//! Self-match regression run
//!
//! Probes the store with each catalog entry's own best photo: re-embeds it,
//! queries the nearest neighbors and records whether the entry ranked itself
//! first. "Self-similarity is the best match" is the core sanity property of
//! the whole pipeline; a drop in accuracy here means the embedding model or
//! the store changed underneath us.

use tracing::info;
use tracing::warn;

use crate::errors::Result;
use crate::matching::score;
use crate::matching::MatchPipeline;
use crate::models::SelfMatchOutcome;

/// Page size for walking the catalog
const BATCH_SIZE: i64 = 25;

#[derive(Debug, Default, Clone, Copy)]
pub struct SelfMatchStats {
    pub tested: usize,
    pub correct: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl SelfMatchStats {
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.tested == 0 {
            return 0.0;
        }
        self.correct as f64 / self.tested as f64
    }
}

/// Run the self-match probe over all catalog entries with a photo.
///
/// Entries covered by a previous run are skipped so the run is resumable.
pub async fn run_selfmatch(pipeline: &MatchPipeline, limit: Option<usize>) -> Result<SelfMatchStats> {
    info!("Starting catalog self-match run");

    let mut stats = SelfMatchStats::default();
    let processed = pipeline.database().selfmatch_processed_ids().await?;

    let mut offset = 0i64;
    'pages: loop {
        let entries = pipeline
            .database()
            .list_entries_with_photo(BATCH_SIZE, offset)
            .await?;
        if entries.is_empty() {
            break;
        }
        offset += entries.len() as i64;

        for entry in entries {
            if let Some(max) = limit {
                if stats.tested + stats.failed >= max {
                    break 'pages;
                }
            }

            if processed.contains(&entry.pk_catalog_id) {
                stats.skipped += 1;
                continue;
            }
            let Some(path) = entry.best_photo_path.as_deref() else {
                stats.skipped += 1;
                continue;
            };
            let photo_url = pipeline.photo_url(path);

            match probe_entry(pipeline, entry.pk_catalog_id, &photo_url).await {
                Ok(outcomes) => {
                    if outcomes.is_empty() {
                        warn!("No matches returned for catalog {}", entry.pk_catalog_id);
                        stats.failed += 1;
                        continue;
                    }
                    let correct = outcomes
                        .first()
                        .is_some_and(|top| top.is_correct_top_match);
                    pipeline
                        .database()
                        .record_selfmatch_outcomes(&outcomes)
                        .await?;
                    stats.tested += 1;
                    if correct {
                        stats.correct += 1;
                    }
                }
                Err(e) => {
                    warn!("Self-match failed for catalog {}: {}", entry.pk_catalog_id, e);
                    stats.failed += 1;
                }
            }
        }
    }

    info!(
        "Self-match complete: {}/{} correct top matches ({:.1}%), {} skipped, {} failed",
        stats.correct,
        stats.tested,
        stats.accuracy() * 100.0,
        stats.skipped,
        stats.failed
    );
    Ok(stats)
}

async fn probe_entry(
    pipeline: &MatchPipeline,
    pk_catalog_id: i64,
    photo_url: &str,
) -> Result<Vec<SelfMatchOutcome>> {
    let bytes = pipeline.fetcher().fetch(photo_url).await?;
    let embedding = pipeline.embedder().compute(&bytes).await?;
    info!(
        "Catalog {} | vector SHA-1: {}",
        pk_catalog_id,
        score::hash_vector(&embedding)
    );

    let matches = pipeline
        .database()
        .match_embeddings(&embedding, 10, 1.0)
        .await?;

    Ok(matches
        .iter()
        .enumerate()
        .map(|(i, m)| SelfMatchOutcome {
            pk_catalog_id,
            matched_pk_catalog_id: m.pk_catalog_id,
            match_rank: i as i32 + 1,
            similarity: m.score,
            is_correct_top_match: m.pk_catalog_id == pk_catalog_id,
            photo_url: photo_url.to_string(),
        })
        .collect())
}
