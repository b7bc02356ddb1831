//! Backfill embeddings for existing catalog entries

use tracing::info;
use tracing::warn;

use crate::errors::Result;
use crate::matching::MatchPipeline;

/// Page size for walking the catalog
const BATCH_SIZE: i64 = 25;

#[derive(Debug, Default, Clone, Copy)]
pub struct BackfillStats {
    pub total_entries: usize,
    pub indexed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Embed every catalog entry's best photo and store the vectors.
///
/// Entries that already have an embedding are skipped; per-entry failures
/// are logged and counted, never fatal to the run (the operator re-runs for
/// the failures).
pub async fn backfill_embeddings(
    pipeline: &MatchPipeline,
    limit: Option<usize>,
) -> Result<BackfillStats> {
    info!("Starting catalog embeddings backfill");

    let mut stats = BackfillStats::default();
    let already_embedded = pipeline.database().embedded_catalog_ids().await?;

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
                if stats.indexed + stats.failed >= max {
                    break 'pages;
                }
            }
            stats.total_entries += 1;

            if already_embedded.contains(&entry.pk_catalog_id) {
                stats.skipped += 1;
                continue;
            }

            match pipeline.index_entry(entry.pk_catalog_id).await {
                Ok(()) => stats.indexed += 1,
                Err(e) => {
                    warn!(
                        "Embedding failed for catalog {}: {}",
                        entry.pk_catalog_id, e
                    );
                    stats.failed += 1;
                }
            }
        }

        info!(
            "Backfill progress: {} indexed, {} skipped, {} failed",
            stats.indexed, stats.skipped, stats.failed
        );
    }

    info!(
        "Backfill complete: {} entries seen, {} indexed, {} skipped, {} failed",
        stats.total_entries, stats.indexed, stats.skipped, stats.failed
    );
    Ok(stats)
}
