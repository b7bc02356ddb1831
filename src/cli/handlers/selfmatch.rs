//! Self-match regression run handler

use crate::cli::output::print_info;
use crate::cli::output::print_success;
use crate::matching::run_selfmatch;
use crate::matching::MatchPipeline;
use crate::AppConfig;
use crate::Result;

pub async fn handle_selfmatch(config: &AppConfig, limit: Option<usize>) -> Result<()> {
    let pipeline = MatchPipeline::from_config(config).await?;
    pipeline.database().verify_schema_or_error().await?;

    print_info("▶️  Starting catalog self-match run...");
    let stats = run_selfmatch(&pipeline, limit).await?;

    print_success(&format!(
        "Self-match: {}/{} correct top matches ({:.1}%), {} skipped, {} failed",
        stats.correct,
        stats.tested,
        stats.accuracy() * 100.0,
        stats.skipped,
        stats.failed
    ));
    Ok(())
}
