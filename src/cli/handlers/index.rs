//! Single-entry indexing handler

use crate::cli::output::print_info;
use crate::cli::output::print_success;
use crate::matching::MatchPipeline;
use crate::AppConfig;
use crate::Result;

pub async fn handle_index(config: &AppConfig, catalog_id: i64) -> Result<()> {
    let pipeline = MatchPipeline::from_config(config).await?;
    pipeline.database().verify_schema_or_error().await?;

    print_info(&format!("Indexing catalog entry {catalog_id}..."));
    pipeline.index_entry(catalog_id).await?;
    print_success(&format!("Stored embedding for catalog {catalog_id}"));
    Ok(())
}
