use chrono::Utc;
use quest_core::model::CareerStats;
use sqlx::Row;

use super::SqliteRepository;
use crate::repository::{CareerStatsRepository, StorageError};

const COLLECTION: &str = "careerStats";

fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait::async_trait]
impl CareerStatsRepository for SqliteRepository {
    async fn get_stats(&self, key: &str) -> Result<Option<CareerStats>, StorageError> {
        let row = sqlx::query("SELECT body FROM documents WHERE collection = ?1 AND key = ?2")
            .bind(COLLECTION)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let body: String = row
            .try_get("body")
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        Ok(Some(serde_json::from_str(&body)?))
    }

    async fn put_stats(&self, key: &str, stats: &CareerStats) -> Result<(), StorageError> {
        let body = serde_json::to_string(stats)?;
        sqlx::query(
            r"
                INSERT INTO documents (collection, key, body, updated_at)
                VALUES (?1, ?2, ?3, ?4)
                ON CONFLICT(collection, key) DO UPDATE SET
                    body = excluded.body,
                    updated_at = excluded.updated_at
            ",
        )
        .bind(COLLECTION)
        .bind(key)
        .bind(body)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(conn)?;
        Ok(())
    }
}
