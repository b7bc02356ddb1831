//! One-shot embedding handler: vector statistics for a single image

use std::time::Duration;

use crate::cli::output::print_info;
use crate::cli::output::print_success;
use crate::embeddings::EmbeddingClient;
use crate::imaging;
use crate::imaging::ImageFetcher;
use crate::matching::score;
use crate::AppConfig;
use crate::Result;

pub async fn handle_embed(config: &AppConfig, input: &str, is_file: bool) -> Result<()> {
    let fetcher = ImageFetcher::new(Duration::from_secs(
        config.embedding.request_timeout_secs,
    ))?;
    let client = EmbeddingClient::from_config(config)?;

    print_info(&format!("Embedding {input}..."));
    let bytes = if is_file {
        fetcher.read_file(input).await?
    } else {
        fetcher.fetch(input).await?
    };

    print_info(&format!("Image sha256: {}", imaging::sha256_hex(&bytes)));
    let embedding = client.compute(&bytes).await?;

    print_success("Embedding computed:");
    println!("  Dimensions: {}", embedding.len());
    println!("  L1 norm:    {:.2}", score::l1_norm(&embedding));
    println!("  L2 norm:    {:.4}", score::l2_norm(&embedding));
    println!("  SHA-1 hash: {}", score::hash_vector(&embedding));
    Ok(())
}
