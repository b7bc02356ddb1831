use super::Database;
use crate::models::CatalogEntry;
use crate::MantaMatchError;
use crate::Result;

impl Database {
    /// Fetch one catalog entry by its numeric catalog id.
    pub async fn get_catalog_entry(&self, pk_catalog_id: i64) -> Result<CatalogEntry> {
        sqlx::query_as(
            r"
            SELECT id, pk_catalog_id, name, best_photo_path, created_at
            FROM catalog
            WHERE pk_catalog_id = $1
            ",
        )
        .bind(pk_catalog_id)
        .fetch_optional(self.pool())
        .await
        .map_err(MantaMatchError::Query)?
        .ok_or(MantaMatchError::CatalogEntryNotFound(pk_catalog_id))
    }

    /// Insert a catalog entry (used by init/import tooling and tests).
    pub async fn insert_catalog_entry(
        &self,
        pk_catalog_id: i64,
        name: Option<&str>,
        best_photo_path: Option<&str>,
    ) -> Result<CatalogEntry> {
        sqlx::query_as(
            r"
            INSERT INTO catalog (pk_catalog_id, name, best_photo_path)
            VALUES ($1, $2, $3)
            RETURNING id, pk_catalog_id, name, best_photo_path, created_at
            ",
        )
        .bind(pk_catalog_id)
        .bind(name)
        .bind(best_photo_path)
        .fetch_one(self.pool())
        .await
        .map_err(MantaMatchError::Persistence)
    }

    /// Page through catalog entries that have a best photo, ordered by
    /// ascending catalog id. Drives the backfill and self-match runs.
    pub async fn list_entries_with_photo(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CatalogEntry>> {
        sqlx::query_as(
            r"
            SELECT id, pk_catalog_id, name, best_photo_path, created_at
            FROM catalog
            WHERE best_photo_path IS NOT NULL
            ORDER BY pk_catalog_id ASC
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool())
        .await
        .map_err(MantaMatchError::Query)
    }

    /// Total number of catalog entries.
    pub async fn count_catalog_entries(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM catalog")
            .fetch_one(self.pool())
            .await
            .map_err(MantaMatchError::Query)
    }
}
