//! Shared error types for the services crate.

use thiserror::Error;

use quest_core::model::{CourseError, SessionSubmissionError};
use quest_core::notify::NotifyError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `CareerStatsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StatsServiceError {
    #[error(transparent)]
    Submission(#[from] SessionSubmissionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `LeaderboardService` once the local fallback also failed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LeaderboardError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the quiz workflow.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("unknown course: {0}")]
    UnknownCourse(String),
    #[error("chapter has no questions")]
    NoQuestions,
    #[error("quiz already finished")]
    Finished,
    #[error("choice {index} is out of range for {len} choices")]
    InvalidChoice { index: usize, len: usize },
    #[error(transparent)]
    Course(#[from] CourseError),
    #[error(transparent)]
    Stats(#[from] StatsServiceError),
}

/// Errors emitted by the notification center.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NotificationError {
    #[error(transparent)]
    Queue(#[from] NotifyError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Course(#[from] CourseError),
}
