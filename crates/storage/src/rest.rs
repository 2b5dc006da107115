//! Hosted real-time document store reached over its REST interface.
//!
//! Paths follow the `{base}/{collection}/{key}.json` convention; `null`
//! bodies mean "no document". Auth tokens travel as the `auth` query parameter.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use quest_core::model::leaderboard::rank_entries;
use quest_core::model::{CareerStats, LeaderboardEntry, sanitize_key};
use reqwest::{Client, RequestBuilder, Response};
use tracing::debug;

use crate::repository::{CareerStatsRepository, LeaderboardRepository, StorageError};

const STATS_COLLECTION: &str = "careerStats";
const LEADERBOARD_COLLECTION: &str = "leaderboard";

#[derive(Clone)]
pub struct RestRepository {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl RestRepository {
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, StorageError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_token: None,
        })
    }

    #[must_use]
    pub fn with_auth_token(mut self, token: Option<String>) -> Self {
        self.auth_token = token.filter(|t| !t.trim().is_empty());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}.json", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.query(&[("auth", token.as_str())]),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StorageError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::Status(status.as_u16()));
        }
        Ok(response)
    }

    fn stats_path(key: &str) -> String {
        format!("{STATS_COLLECTION}/{}", sanitize_key(key))
    }
}

fn decode<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

#[async_trait]
impl CareerStatsRepository for RestRepository {
    async fn get_stats(&self, key: &str) -> Result<Option<CareerStats>, StorageError> {
        let url = self.url(&Self::stats_path(key));
        debug!(%url, "fetching career stats");
        let response = self.send(self.client.get(url)).await?;
        response
            .json::<Option<CareerStats>>()
            .await
            .map_err(decode)
    }

    async fn put_stats(&self, key: &str, stats: &CareerStats) -> Result<(), StorageError> {
        let url = self.url(&Self::stats_path(key));
        debug!(%url, "writing career stats");
        self.send(self.client.put(url).json(stats)).await?;
        Ok(())
    }
}

#[async_trait]
impl LeaderboardRepository for RestRepository {
    async fn add_entry(&self, entry: &LeaderboardEntry) -> Result<(), StorageError> {
        let url = self.url(LEADERBOARD_COLLECTION);
        self.send(self.client.post(url).json(entry)).await?;
        Ok(())
    }

    async fn top_entries(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, StorageError> {
        let url = self.url(LEADERBOARD_COLLECTION);
        let request = self.client.get(url).query(&[
            ("orderBy", "\"score\"".to_string()),
            ("limitToLast", limit.to_string()),
        ]);
        let response = self.send(request).await?;
        let by_push_id = response
            .json::<Option<HashMap<String, LeaderboardEntry>>>()
            .await
            .map_err(decode)?
            .unwrap_or_default();

        let mut entries: Vec<LeaderboardEntry> = by_push_id.into_values().collect();
        rank_entries(&mut entries);
        entries.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(entries)
    }
}
