use super::Database;
use crate::MantaMatchError;
use crate::Result;

impl Database {
    /// Check if database schema is initialized
    /// Returns true if all required tables exist
    pub async fn is_schema_initialized(&self) -> Result<bool> {
        let required_tables = vec![
            "catalog",
            "catalog_embeddings",
            "embedding_selfmatch_results",
        ];

        for table_name in required_tables {
            let result = sqlx::query_scalar::<_, bool>(
                r"
                SELECT EXISTS (
                    SELECT FROM information_schema.tables
                    WHERE table_schema = 'public'
                    AND table_name = $1
                )
                ",
            )
            .bind(table_name)
            .fetch_one(self.pool())
            .await
            .map_err(MantaMatchError::Persistence)?;

            if !result {
                tracing::debug!("Missing required table: {}", table_name);
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Create the schema if it does not exist yet.
    ///
    /// The embedding column dimension is fixed at creation time and must
    /// match the configured model dimensionality.
    pub async fn init_schema(&self, embedding_dimension: usize) -> Result<()> {
        sqlx::query("CREATE EXTENSION IF NOT EXISTS vector")
            .execute(self.pool())
            .await
            .map_err(MantaMatchError::Persistence)?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS catalog (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                pk_catalog_id BIGINT NOT NULL UNIQUE,
                name TEXT,
                best_photo_path TEXT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            ",
        )
        .execute(self.pool())
        .await
        .map_err(MantaMatchError::Persistence)?;

        sqlx::query(&format!(
            r"
            CREATE TABLE IF NOT EXISTS catalog_embeddings (
                pk_catalog_id BIGINT PRIMARY KEY
                    REFERENCES catalog(pk_catalog_id) ON DELETE CASCADE,
                embedding vector({embedding_dimension}) NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            ",
        ))
        .execute(self.pool())
        .await
        .map_err(MantaMatchError::Persistence)?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS embedding_selfmatch_results (
                id BIGSERIAL PRIMARY KEY,
                pk_catalog_id BIGINT NOT NULL,
                matched_pk_catalog_id BIGINT NOT NULL,
                match_rank INT NOT NULL,
                similarity REAL NOT NULL,
                is_correct_top_match BOOLEAN NOT NULL,
                photo_url TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            ",
        )
        .execute(self.pool())
        .await
        .map_err(MantaMatchError::Persistence)?;

        tracing::info!(
            "Schema initialized (embedding dimension: {})",
            embedding_dimension
        );
        Ok(())
    }

    /// Verify database schema or return helpful error
    pub async fn verify_schema_or_error(&self) -> Result<()> {
        if !self.is_schema_initialized().await? {
            return Err(MantaMatchError::Config(
                "Database schema not initialized. Run: mantamatch init".to_string(),
            ));
        }
        Ok(())
    }
}
