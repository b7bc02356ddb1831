//! Service health and store statistics handlers

use crate::cli::output::print_error;
use crate::cli::output::print_success;
use crate::database::Database;
use crate::embeddings::EmbeddingClient;
use crate::verification::SiftClient;
use crate::AppConfig;
use crate::Result;

pub async fn handle_health(config: &AppConfig) -> Result<()> {
    let embedder = EmbeddingClient::from_config(config)?;
    match embedder.health().await {
        Ok(health) => print_success(&format!(
            "Embedding service ok (model: {}, dim: {})",
            health.model.as_deref().unwrap_or("unknown"),
            health.dim
        )),
        Err(e) => print_error(&format!("Embedding service unavailable: {e}")),
    }

    let sift = SiftClient::from_config(config)?;
    match sift.health().await {
        Ok(_) => print_success("Verification service ok"),
        Err(e) => print_error(&format!("Verification service unavailable: {e}")),
    }

    Ok(())
}

pub async fn handle_stats(config: &AppConfig) -> Result<()> {
    let database = Database::from_config(config).await?;
    database.verify_schema_or_error().await?;

    let stats = database.embedding_stats().await?;
    println!("Catalog entries:   {}", stats.catalog_entries);
    println!("Embedded entries:  {}", stats.embedded_entries);

    let (correct, total) = database.selfmatch_accuracy().await?;
    if total > 0 {
        println!(
            "Self-match:        {correct}/{total} correct top matches ({:.1}%)",
            correct as f64 / total as f64 * 100.0
        );
    }
    Ok(())
}
