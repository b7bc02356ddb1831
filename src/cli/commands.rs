//! Command line argument definitions

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "mantamatch")]
#[command(about = "Manta ray photo-identification matching pipeline")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to the config file (defaults to config.toml)
    #[arg(short, long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database schema (catalog + embedding tables)
    Init,
    /// Embed one image and print vector statistics (dim, L1 norm, SHA-1)
    Embed {
        /// Image URL or local file path
        input: String,
        /// Treat input as a local file instead of a URL
        #[arg(long)]
        file: bool,
    },
    /// Embed a catalog entry's best photo and store the vector
    Index {
        /// Numeric catalog id
        catalog_id: i64,
    },
    /// Embed all catalog photos that don't have a stored vector yet
    Backfill {
        /// Stop after this many entries
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Query a photo against the catalog and print ranked candidates
    Match {
        /// Image URL or local file path
        input: String,
        /// Treat input as a local file instead of a URL
        #[arg(long)]
        file: bool,
        /// Run geometric verification on the top candidates
        #[arg(long)]
        verify: bool,
    },
    /// Geometrically verify a pair of image URLs
    Verify {
        image_url_a: String,
        image_url_b: String,
    },
    /// Self-match regression run over the whole catalog
    Selfmatch {
        /// Stop after this many entries
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Probe the embedding and verification services
    Health,
    /// Show embedding store statistics
    Stats,
}
