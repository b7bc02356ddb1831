use super::Database;
use crate::models::SelfMatchOutcome;
use crate::MantaMatchError;
use crate::Result;

impl Database {
    /// Record the ranked results of one self-match probe.
    pub async fn record_selfmatch_outcomes(&self, outcomes: &[SelfMatchOutcome]) -> Result<()> {
        for outcome in outcomes {
            sqlx::query(
                r"
                INSERT INTO embedding_selfmatch_results
                    (pk_catalog_id, matched_pk_catalog_id, match_rank,
                     similarity, is_correct_top_match, photo_url)
                VALUES ($1, $2, $3, $4, $5, $6)
                ",
            )
            .bind(outcome.pk_catalog_id)
            .bind(outcome.matched_pk_catalog_id)
            .bind(outcome.match_rank)
            .bind(outcome.similarity)
            .bind(outcome.is_correct_top_match)
            .bind(&outcome.photo_url)
            .execute(self.pool())
            .await
            .map_err(MantaMatchError::Persistence)?;
        }
        Ok(())
    }

    /// Catalog ids already covered by a previous self-match run.
    pub async fn selfmatch_processed_ids(&self) -> Result<Vec<i64>> {
        sqlx::query_scalar("SELECT DISTINCT pk_catalog_id FROM embedding_selfmatch_results")
            .fetch_all(self.pool())
            .await
            .map_err(MantaMatchError::Query)
    }

    /// Share of probes whose own catalog entry ranked first.
    pub async fn selfmatch_accuracy(&self) -> Result<(i64, i64)> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(DISTINCT pk_catalog_id) FROM embedding_selfmatch_results",
        )
        .fetch_one(self.pool())
        .await
        .map_err(MantaMatchError::Query)?;

        let correct: i64 = sqlx::query_scalar(
            r"
            SELECT COUNT(DISTINCT pk_catalog_id) FROM embedding_selfmatch_results
            WHERE match_rank = 1 AND is_correct_top_match
            ",
        )
        .fetch_one(self.pool())
        .await
        .map_err(MantaMatchError::Query)?;

        Ok((correct, total))
    }
}
