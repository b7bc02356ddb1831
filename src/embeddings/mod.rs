//! Embedding generation module
//!
//! Converts a photograph into a fixed-length feature vector by calling an
//! external embedding service (`POST /embed` with base64 image bytes). The
//! model itself is not part of this crate; any backend satisfying the wire
//! contract can stand behind the endpoint.
//!
//! # Examples
//!
//! ```rust,no_run
//! use mantamatch::config::AppConfig;
//! use mantamatch::embeddings::EmbeddingClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let client = EmbeddingClient::from_config(&config)?;
//!
//!     let bytes = std::fs::read("photo.jpg")?;
//!     let embedding = client.compute(&bytes).await?;
//!     println!("Generated embedding with {} dimensions", embedding.len());
//!
//!     Ok(())
//! }
//! ```

pub mod backfill;
pub mod client;

pub use backfill::backfill_embeddings;
pub use backfill::BackfillStats;
pub use client::EmbeddingClient;

/// Default embedding dimension (ResNet50 features projected to 1024)
pub const DEFAULT_EMBEDDING_DIM: usize = 1024;
