use quest_core::model::LeaderboardEntry;
use sqlx::Row;

use super::SqliteRepository;
use crate::repository::{LeaderboardRepository, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

fn map_entry_row(row: &sqlx::sqlite::SqliteRow) -> Result<LeaderboardEntry, StorageError> {
    let player_name: String = row.try_get("player_name").map_err(ser)?;
    let score = u32_from_i64("score", row.try_get::<i64, _>("score").map_err(ser)?)?;
    let course_topic: String = row.try_get("course_topic").map_err(ser)?;
    let accuracy = u32_from_i64("accuracy", row.try_get::<i64, _>("accuracy").map_err(ser)?)?;
    let recorded_at = row.try_get("recorded_at").map_err(ser)?;

    Ok(LeaderboardEntry::new(player_name, score, recorded_at)
        .with_course(course_topic)
        .with_accuracy(accuracy))
}

#[async_trait::async_trait]
impl LeaderboardRepository for SqliteRepository {
    async fn add_entry(&self, entry: &LeaderboardEntry) -> Result<(), StorageError> {
        sqlx::query(
            r"
                INSERT INTO leaderboard (player_name, score, course_topic, accuracy, recorded_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(&entry.player_name)
        .bind(i64::from(entry.score))
        .bind(&entry.course_topic)
        .bind(i64::from(entry.accuracy.min(100)))
        .bind(entry.recorded_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(())
    }

    async fn top_entries(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT player_name, score, course_topic, accuracy, recorded_at
                FROM leaderboard
                ORDER BY score DESC, recorded_at ASC, id ASC
                LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(map_entry_row(&row)?);
        }
        Ok(out)
    }
}
