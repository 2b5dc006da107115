//! Capped, score-sorted leaderboard kept in a [`LocalStore`] as JSON.

use quest_core::model::leaderboard::insert_ranked;
use quest_core::model::{LOCAL_LEADERBOARD_LIMIT, LeaderboardEntry};
use tracing::warn;

use crate::repository::{LocalStore, StorageError};

pub const LOCAL_LEADERBOARD_KEY: &str = "quest.leaderboard";

/// Read the fallback list. Unparseable contents are treated as empty.
///
/// # Errors
///
/// Returns `StorageError` if the local store itself fails.
pub async fn load_local_leaderboard(
    store: &dyn LocalStore,
) -> Result<Vec<LeaderboardEntry>, StorageError> {
    let Some(raw) = store.get_item(LOCAL_LEADERBOARD_KEY).await? else {
        return Ok(Vec::new());
    };
    match serde_json::from_str::<Vec<LeaderboardEntry>>(&raw) {
        Ok(entries) => Ok(entries),
        Err(err) => {
            warn!(error = %err, "discarding unreadable local leaderboard");
            Ok(Vec::new())
        }
    }
}

/// Insert `entry` into the fallback list, keeping the best
/// [`LOCAL_LEADERBOARD_LIMIT`] scores. Returns the stored list.
///
/// # Errors
///
/// Returns `StorageError` if the local store cannot be read or written.
pub async fn push_local_leaderboard(
    store: &dyn LocalStore,
    entry: LeaderboardEntry,
) -> Result<Vec<LeaderboardEntry>, StorageError> {
    let mut entries = load_local_leaderboard(store).await?;
    insert_ranked(&mut entries, entry, LOCAL_LEADERBOARD_LIMIT);
    let raw = serde_json::to_string(&entries)?;
    store.set_item(LOCAL_LEADERBOARD_KEY, &raw).await?;
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;
    use quest_core::time::fixed_now;

    #[tokio::test]
    async fn keeps_best_ten_scores() {
        let store = InMemoryRepository::new();
        let now = fixed_now();
        for score in 0..15_u32 {
            push_local_leaderboard(&store, LeaderboardEntry::new("p", score * 10, now))
                .await
                .unwrap();
        }
        let entries = load_local_leaderboard(&store).await.unwrap();
        assert_eq!(entries.len(), LOCAL_LEADERBOARD_LIMIT);
        assert_eq!(entries.first().map(|e| e.score), Some(140));
        assert_eq!(entries.last().map(|e| e.score), Some(50));
    }

    #[tokio::test]
    async fn garbage_is_treated_as_empty() {
        let store = InMemoryRepository::new();
        store
            .set_item(LOCAL_LEADERBOARD_KEY, "{not json")
            .await
            .unwrap();
        assert!(load_local_leaderboard(&store).await.unwrap().is_empty());

        let entries = push_local_leaderboard(&store, LeaderboardEntry::new("a", 5, fixed_now()))
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
    }
}
