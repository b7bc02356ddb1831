//! Catalog-wide embedding backfill handler

use crate::cli::output::print_info;
use crate::cli::output::print_success;
use crate::cli::output::print_warning;
use crate::embeddings::backfill_embeddings;
use crate::matching::MatchPipeline;
use crate::AppConfig;
use crate::Result;

pub async fn handle_backfill(config: &AppConfig, limit: Option<usize>) -> Result<()> {
    let pipeline = MatchPipeline::from_config(config).await?;
    pipeline.database().verify_schema_or_error().await?;

    print_info("🚀 Starting catalog embeddings backfill...");
    let stats = backfill_embeddings(&pipeline, limit).await?;

    print_success(&format!(
        "Backfill complete: {} indexed, {} skipped, {} failed (of {} entries)",
        stats.indexed, stats.skipped, stats.failed, stats.total_entries
    ));
    if stats.failed > 0 {
        print_warning("Some entries failed; re-run backfill to retry them.");
    }
    Ok(())
}
