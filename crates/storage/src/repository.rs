use async_trait::async_trait;
use quest_core::model::leaderboard::{insert_ranked, rank_entries};
use quest_core::model::{CareerStats, LeaderboardEntry};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("remote store answered with status {0}")]
    Status(u16),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Document store for career stats, addressed by a sanitized student key.
#[async_trait]
pub trait CareerStatsRepository: Send + Sync {
    /// Fetch the document for `key`, or `None` if the student has no record yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be reached or the document is unreadable.
    async fn get_stats(&self, key: &str) -> Result<Option<CareerStats>, StorageError>;

    /// Replace the document for `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be written.
    async fn put_stats(&self, key: &str, stats: &CareerStats) -> Result<(), StorageError>;
}

#[async_trait]
pub trait LeaderboardRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the entry cannot be stored.
    async fn add_entry(&self, entry: &LeaderboardEntry) -> Result<(), StorageError>;

    /// Highest scores first, at most `limit` entries.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if entries cannot be read.
    async fn top_entries(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, StorageError>;
}

/// String key/value store used as the offline fallback.
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be removed.
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory backend for tests and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    stats: Arc<Mutex<HashMap<String, CareerStats>>>,
    leaderboard: Arc<Mutex<Vec<LeaderboardEntry>>>,
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl CareerStatsRepository for InMemoryRepository {
    async fn get_stats(&self, key: &str) -> Result<Option<CareerStats>, StorageError> {
        let guard = self.stats.lock().map_err(poisoned)?;
        Ok(guard.get(key).cloned())
    }

    async fn put_stats(&self, key: &str, stats: &CareerStats) -> Result<(), StorageError> {
        let mut guard = self.stats.lock().map_err(poisoned)?;
        guard.insert(key.to_string(), stats.clone());
        Ok(())
    }
}

#[async_trait]
impl LeaderboardRepository for InMemoryRepository {
    async fn add_entry(&self, entry: &LeaderboardEntry) -> Result<(), StorageError> {
        let mut guard = self.leaderboard.lock().map_err(poisoned)?;
        insert_ranked(&mut guard, entry.clone(), usize::MAX);
        Ok(())
    }

    async fn top_entries(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, StorageError> {
        let guard = self.leaderboard.lock().map_err(poisoned)?;
        let mut entries = guard.clone();
        rank_entries(&mut entries);
        entries.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(entries)
    }
}

#[async_trait]
impl LocalStore for InMemoryRepository {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self.items.lock().map_err(poisoned)?;
        Ok(guard.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self.items.lock().map_err(poisoned)?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self.items.lock().map_err(poisoned)?;
        guard.remove(key);
        Ok(())
    }
}

/// Repositories behind trait objects so backends can be swapped.
///
/// `career_stats` and `leaderboard` are the primary (possibly remote) stores;
/// `local` is always on-device and serves as the fallback.
#[derive(Clone)]
pub struct Storage {
    pub career_stats: Arc<dyn CareerStatsRepository>,
    pub leaderboard: Arc<dyn LeaderboardRepository>,
    pub local: Arc<dyn LocalStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let career_stats: Arc<dyn CareerStatsRepository> = Arc::new(repo.clone());
        let leaderboard: Arc<dyn LeaderboardRepository> = Arc::new(repo.clone());
        let local: Arc<dyn LocalStore> = Arc::new(repo);
        Self {
            career_stats,
            leaderboard,
            local,
        }
    }

    /// Route stats and leaderboard traffic to `remote`, keeping the local store.
    #[must_use]
    pub fn with_remote<R>(mut self, remote: R) -> Self
    where
        R: CareerStatsRepository + LeaderboardRepository + Clone + 'static,
    {
        self.career_stats = Arc::new(remote.clone());
        self.leaderboard = Arc::new(remote);
        self
    }
}
