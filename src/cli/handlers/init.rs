//! Schema initialization handler

use crate::cli::output::print_success;
use crate::database::Database;
use crate::AppConfig;
use crate::Result;

pub async fn handle_init(config: &AppConfig) -> Result<()> {
    let database = Database::from_config(config).await?;
    database.init_schema(config.embedding_dimension()).await?;
    print_success(&format!(
        "Schema initialized (embedding dimension: {})",
        config.embedding_dimension()
    ));
    Ok(())
}
