use pgvector::Vector;

use super::Database;
use crate::models::ScoredMatch;
use crate::MantaMatchError;
use crate::Result;

/// Counts describing the state of the embedding store.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddingStats {
    pub catalog_entries: i64,
    pub embedded_entries: i64,
}

impl Database {
    /// Upsert the embedding for a catalog entry.
    ///
    /// Keyed by catalog id; any existing vector is overwritten
    /// (last-writer-wins, no client-side locking). A foreign-key violation
    /// on an unknown catalog id surfaces as `Persistence`.
    pub async fn upsert_embedding(&self, pk_catalog_id: i64, embedding: &[f32]) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO catalog_embeddings (pk_catalog_id, embedding, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (pk_catalog_id)
            DO UPDATE SET embedding = EXCLUDED.embedding, updated_at = now()
            ",
        )
        .bind(pk_catalog_id)
        .bind(Vector::from(embedding.to_vec()))
        .execute(self.pool())
        .await
        .map_err(MantaMatchError::Persistence)?;

        Ok(())
    }

    /// Top-K nearest catalog entries by cosine similarity.
    ///
    /// Contract: `score = 1 - cosine_distance`, results ordered by
    /// descending score with ties broken by ascending catalog id;
    /// `max_distance` is the cosine-distance cutoff (1.0 admits everything
    /// non-opposing). An empty result set is not an error.
    pub async fn match_embeddings(
        &self,
        query_embedding: &[f32],
        match_count: usize,
        max_distance: f32,
    ) -> Result<Vec<ScoredMatch>> {
        #[derive(sqlx::FromRow)]
        struct RawMatch {
            pk_catalog_id: i64,
            // PostgreSQL returns FLOAT8 from the distance operator
            score: f64,
        }

        let raw: Vec<RawMatch> = sqlx::query_as(
            r"
            SELECT
                ce.pk_catalog_id,
                1 - (ce.embedding <=> $1) as score
            FROM catalog_embeddings ce
            WHERE (ce.embedding <=> $1) <= $2
            ORDER BY ce.embedding <=> $1, ce.pk_catalog_id ASC
            LIMIT $3
            ",
        )
        .bind(Vector::from(query_embedding.to_vec()))
        .bind(f64::from(max_distance))
        .bind(i64::try_from(match_count).unwrap_or(i64::MAX))
        .fetch_all(self.pool())
        .await
        .map_err(MantaMatchError::Query)?;

        Ok(raw
            .into_iter()
            .map(|r| ScoredMatch {
                pk_catalog_id: r.pk_catalog_id,
                score: r.score as f32,
            })
            .collect())
    }

    /// Remove the stored embedding for a catalog entry (maintenance surface).
    pub async fn delete_embedding(&self, pk_catalog_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM catalog_embeddings WHERE pk_catalog_id = $1")
            .bind(pk_catalog_id)
            .execute(self.pool())
            .await
            .map_err(MantaMatchError::Persistence)?;

        Ok(result.rows_affected() > 0)
    }

    /// Catalog ids that already have an embedding; backfill skips these.
    pub async fn embedded_catalog_ids(&self) -> Result<Vec<i64>> {
        sqlx::query_scalar("SELECT pk_catalog_id FROM catalog_embeddings ORDER BY pk_catalog_id")
            .fetch_all(self.pool())
            .await
            .map_err(MantaMatchError::Query)
    }

    /// Counts of catalog entries vs. embedded entries.
    pub async fn embedding_stats(&self) -> Result<EmbeddingStats> {
        let catalog_entries = self.count_catalog_entries().await?;
        let embedded_entries: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM catalog_embeddings")
            .fetch_one(self.pool())
            .await
            .map_err(MantaMatchError::Query)?;

        Ok(EmbeddingStats {
            catalog_entries,
            embedded_entries,
        })
    }
}
