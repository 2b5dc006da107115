use std::sync::Arc;

use async_trait::async_trait;
use quest_core::model::{CareerStats, SessionSubmission, StudentId, sanitize_key};
use serde_json::Value;
use storage::repository::CareerStatsRepository;
use tracing::{error, info};

use crate::Clock;
use crate::error::StatsServiceError;

/// The only surface the game needs from stats persistence.
#[async_trait]
pub trait StatsGateway: Send + Sync {
    /// Fold `submission` into the student's totals and return the stored result.
    ///
    /// # Errors
    ///
    /// Returns `StatsServiceError` if the document cannot be read or written.
    async fn submit_session(
        &self,
        student: &StudentId,
        submission: SessionSubmission,
    ) -> Result<CareerStats, StatsServiceError>;

    /// Current totals; a student without a record gets empty stats.
    ///
    /// # Errors
    ///
    /// Returns `StatsServiceError` if the document cannot be read.
    async fn fetch_stats(&self, student: &StudentId) -> Result<CareerStats, StatsServiceError>;
}

/// Read-modify-write accumulation over a [`CareerStatsRepository`].
///
/// There is no transaction: two concurrent submissions for the same student
/// can both read the old document, and the later write wins.
#[derive(Clone)]
pub struct CareerStatsService {
    clock: Clock,
    repo: Arc<dyn CareerStatsRepository>,
}

impl CareerStatsService {
    #[must_use]
    pub fn new(clock: Clock, repo: Arc<dyn CareerStatsRepository>) -> Self {
        Self { clock, repo }
    }

    /// Submit a loosely typed payload, coercing malformed fields.
    ///
    /// # Errors
    ///
    /// Returns `StatsServiceError::Submission` if the payload is not an object,
    /// or storage errors from [`StatsGateway::submit_session`].
    pub async fn submit_raw(
        &self,
        student: &StudentId,
        payload: Value,
    ) -> Result<CareerStats, StatsServiceError> {
        let submission = SessionSubmission::from_json(payload)?;
        self.submit_session(student, submission).await
    }
}

#[async_trait]
impl StatsGateway for CareerStatsService {
    async fn submit_session(
        &self,
        student: &StudentId,
        submission: SessionSubmission,
    ) -> Result<CareerStats, StatsServiceError> {
        let key = sanitize_key(student.as_str());

        let mut stats = match self.repo.get_stats(&key).await {
            Ok(found) => found.unwrap_or_default(),
            Err(err) => {
                error!(%key, error = %err, "failed to read career stats");
                return Err(err.into());
            }
        };

        stats.accumulate(&submission, self.clock.now());

        if let Err(err) = self.repo.put_stats(&key, &stats).await {
            error!(%key, error = %err, "failed to write career stats");
            return Err(err.into());
        }

        info!(
            %key,
            topic = %submission.course_topic,
            points = submission.points,
            total_sessions = stats.total_sessions,
            "session recorded"
        );
        Ok(stats)
    }

    async fn fetch_stats(&self, student: &StudentId) -> Result<CareerStats, StatsServiceError> {
        let key = sanitize_key(student.as_str());
        match self.repo.get_stats(&key).await {
            Ok(found) => Ok(found.unwrap_or_default()),
            Err(err) => {
                error!(%key, error = %err, "failed to fetch career stats");
                Err(err.into())
            }
        }
    }
}
