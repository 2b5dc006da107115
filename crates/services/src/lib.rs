#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog;
pub mod error;
pub mod leaderboard_service;
pub mod notifications;
pub mod quiz;
pub mod stats_service;

pub use quest_core::Clock;

pub use app_services::{AppServices, RemoteConfig};
pub use catalog::{Catalog, builtin_catalog};
pub use error::{
    AppServicesError, LeaderboardError, NotificationError, QuizError, StatsServiceError,
};
pub use leaderboard_service::{LeaderboardService, LeaderboardSnapshot, Source};
pub use notifications::{
    BlockingDialog, LogDialog, NotificationCenter, NotificationHandle, NotificationSnapshot,
};
pub use quiz::{AnswerOutcome, QuizConfig, QuizReport, QuizRun, QuizService, TimeAdjustment};
pub use stats_service::{CareerStatsService, StatsGateway};
