use clap::Parser;
use mantamatch::cli::handlers;
use mantamatch::cli::Cli;
use mantamatch::cli::Commands;
use mantamatch::config::AppConfig;
use mantamatch::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::load()?,
    };

    if cli.verbose {
        mantamatch::logging::init_logging_with_level("debug")?;
    } else {
        mantamatch::logging::init_logging_with_config(Some(&config))?;
    }

    match cli.command {
        Commands::Init => handlers::handle_init(&config).await,
        Commands::Embed { input, file } => handlers::handle_embed(&config, &input, file).await,
        Commands::Index { catalog_id } => handlers::handle_index(&config, catalog_id).await,
        Commands::Backfill { limit } => handlers::handle_backfill(&config, limit).await,
        Commands::Match {
            input,
            file,
            verify,
        } => handlers::handle_match(&config, &input, file, verify).await,
        Commands::Verify {
            image_url_a,
            image_url_b,
        } => handlers::handle_verify(&config, &image_url_a, &image_url_b).await,
        Commands::Selfmatch { limit } => handlers::handle_selfmatch(&config, limit).await,
        Commands::Health => handlers::handle_health(&config).await,
        Commands::Stats => handlers::handle_stats(&config).await,
    }
}
