use std::sync::Arc;

use quest_core::model::LeaderboardEntry;
use serde::Serialize;
use storage::local::{load_local_leaderboard, push_local_leaderboard};
use storage::repository::{LeaderboardRepository, LocalStore};
use tracing::{info, warn};

use crate::error::LeaderboardError;

/// Where leaderboard data was read from or written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Remote,
    Local,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardSnapshot {
    pub entries: Vec<LeaderboardEntry>,
    pub source: Source,
}

/// Remote leaderboard with an on-device fallback list.
#[derive(Clone)]
pub struct LeaderboardService {
    remote: Arc<dyn LeaderboardRepository>,
    local: Arc<dyn LocalStore>,
}

impl LeaderboardService {
    #[must_use]
    pub fn new(remote: Arc<dyn LeaderboardRepository>, local: Arc<dyn LocalStore>) -> Self {
        Self { remote, local }
    }

    /// Record a score remotely, or locally when the remote store fails.
    ///
    /// # Errors
    ///
    /// Returns `LeaderboardError` only when the local fallback fails as well.
    pub async fn submit(&self, entry: LeaderboardEntry) -> Result<Source, LeaderboardError> {
        match self.remote.add_entry(&entry).await {
            Ok(()) => {
                info!(player = %entry.player_name, score = entry.score, "leaderboard entry stored");
                Ok(Source::Remote)
            }
            Err(err) => {
                warn!(error = %err, "remote leaderboard unavailable, saving locally");
                push_local_leaderboard(self.local.as_ref(), entry).await?;
                Ok(Source::Local)
            }
        }
    }

    /// Best `limit` scores, from the remote store when reachable.
    ///
    /// # Errors
    ///
    /// Returns `LeaderboardError` only when the local fallback fails as well.
    pub async fn top(&self, limit: u32) -> Result<LeaderboardSnapshot, LeaderboardError> {
        match self.remote.top_entries(limit).await {
            Ok(entries) => Ok(LeaderboardSnapshot {
                entries,
                source: Source::Remote,
            }),
            Err(err) => {
                warn!(error = %err, "remote leaderboard unavailable, reading local list");
                let mut entries = load_local_leaderboard(self.local.as_ref()).await?;
                entries.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
                Ok(LeaderboardSnapshot {
                    entries,
                    source: Source::Local,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quest_core::model::LOCAL_LEADERBOARD_LIMIT;
    use quest_core::time::fixed_now;
    use storage::repository::{InMemoryRepository, StorageError};

    struct Offline;

    #[async_trait]
    impl LeaderboardRepository for Offline {
        async fn add_entry(&self, _entry: &LeaderboardEntry) -> Result<(), StorageError> {
            Err(StorageError::Status(503))
        }

        async fn top_entries(&self, _limit: u32) -> Result<Vec<LeaderboardEntry>, StorageError> {
            Err(StorageError::Connection("offline".into()))
        }
    }

    #[tokio::test]
    async fn online_submissions_go_remote() {
        let repo = InMemoryRepository::new();
        let svc = LeaderboardService::new(Arc::new(repo.clone()), Arc::new(repo.clone()));
        let source = svc
            .submit(LeaderboardEntry::new("ada", 120, fixed_now()))
            .await
            .unwrap();
        assert_eq!(source, Source::Remote);

        let snapshot = svc.top(5).await.unwrap();
        assert_eq!(snapshot.source, Source::Remote);
        assert_eq!(snapshot.entries.len(), 1);
    }

    #[tokio::test]
    async fn offline_submissions_fall_back_to_capped_local_list() {
        let local = InMemoryRepository::new();
        let svc = LeaderboardService::new(Arc::new(Offline), Arc::new(local));

        for score in 1..=12_u32 {
            let source = svc
                .submit(LeaderboardEntry::new(format!("p{score}"), score, fixed_now()))
                .await
                .unwrap();
            assert_eq!(source, Source::Local);
        }

        let snapshot = svc.top(50).await.unwrap();
        assert_eq!(snapshot.source, Source::Local);
        assert_eq!(snapshot.entries.len(), LOCAL_LEADERBOARD_LIMIT);
        assert_eq!(snapshot.entries[0].score, 12);

        let top_three = svc.top(3).await.unwrap();
        let scores: Vec<u32> = top_three.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![12, 11, 10]);
    }
}
