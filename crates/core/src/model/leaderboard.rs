use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lenient::{de_text, de_topic, de_u32, unknown_topic};

/// Entries kept in the local leaderboard fallback.
pub const LOCAL_LEADERBOARD_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    #[serde(default, deserialize_with = "de_text")]
    pub player_name: String,
    #[serde(default, deserialize_with = "de_u32")]
    pub score: u32,
    #[serde(default = "unknown_topic", deserialize_with = "de_topic")]
    pub course_topic: String,
    #[serde(default, deserialize_with = "de_u32")]
    pub accuracy: u32,
    pub recorded_at: DateTime<Utc>,
}

impl LeaderboardEntry {
    #[must_use]
    pub fn new(player_name: impl Into<String>, score: u32, recorded_at: DateTime<Utc>) -> Self {
        Self {
            player_name: player_name.into(),
            score,
            course_topic: unknown_topic(),
            accuracy: 0,
            recorded_at,
        }
    }

    #[must_use]
    pub fn with_course(mut self, topic: impl Into<String>) -> Self {
        self.course_topic = topic.into();
        self
    }

    #[must_use]
    pub fn with_accuracy(mut self, accuracy: u32) -> Self {
        self.accuracy = accuracy.min(100);
        self
    }
}

/// Sort entries by score descending; equal scores keep the earlier entry first.
pub fn rank_entries(entries: &mut [LeaderboardEntry]) {
    entries.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.recorded_at.cmp(&b.recorded_at))
    });
}

/// Insert `entry`, rank, and cap the list at `limit`.
pub fn insert_ranked(entries: &mut Vec<LeaderboardEntry>, entry: LeaderboardEntry, limit: usize) {
    entries.push(entry);
    rank_entries(entries);
    entries.truncate(limit);
}
