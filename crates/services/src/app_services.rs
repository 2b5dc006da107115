use std::sync::Arc;

use quest_core::model::StudentId;
use storage::repository::Storage;
use storage::rest::RestRepository;
use tracing::info;

use crate::Clock;
use crate::catalog::{Catalog, builtin_catalog};
use crate::error::AppServicesError;
use crate::leaderboard_service::LeaderboardService;
use crate::notifications::NotificationCenter;
use crate::quiz::QuizService;
use crate::stats_service::{CareerStatsService, StatsGateway};

/// Hosted document store used instead of `SQLite` for stats and leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub base_url: String,
    pub auth_token: Option<String>,
}

/// Assembles app-facing services for one signed-in student.
#[derive(Clone)]
pub struct AppServices {
    student: StudentId,
    catalog: Arc<Catalog>,
    stats: Arc<CareerStatsService>,
    leaderboard: Arc<LeaderboardService>,
    quiz: Arc<QuizService>,
    notifications: NotificationCenter,
}

impl AppServices {
    /// # Errors
    ///
    /// Returns `AppServicesError::Course` if the bundled catalog is invalid.
    pub fn from_storage(
        storage: &Storage,
        clock: Clock,
        student: StudentId,
    ) -> Result<Self, AppServicesError> {
        let catalog = Arc::new(builtin_catalog()?);
        let stats = Arc::new(CareerStatsService::new(
            clock,
            Arc::clone(&storage.career_stats),
        ));
        let leaderboard = Arc::new(LeaderboardService::new(
            Arc::clone(&storage.leaderboard),
            Arc::clone(&storage.local),
        ));
        let quiz = Arc::new(QuizService::new(
            clock,
            Arc::clone(&catalog),
            Arc::clone(&stats) as Arc<dyn StatsGateway>,
            LeaderboardService::clone(&leaderboard),
        ));

        Ok(Self {
            student,
            catalog,
            stats,
            leaderboard,
            quiz,
            notifications: NotificationCenter::new(clock),
        })
    }

    /// Build services backed by `SQLite`, optionally routing stats and
    /// leaderboard traffic to a remote store.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        remote: Option<RemoteConfig>,
        clock: Clock,
        student: StudentId,
    ) -> Result<Self, AppServicesError> {
        let mut storage = Storage::sqlite(db_url).await?;
        if let Some(remote) = remote {
            info!(base_url = %remote.base_url, "using remote document store");
            let repo = RestRepository::new(remote.base_url)?.with_auth_token(remote.auth_token);
            storage = storage.with_remote(repo);
        }
        Self::from_storage(&storage, clock, student)
    }

    #[must_use]
    pub fn student(&self) -> &StudentId {
        &self.student
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn stats(&self) -> Arc<CareerStatsService> {
        Arc::clone(&self.stats)
    }

    #[must_use]
    pub fn leaderboard(&self) -> Arc<LeaderboardService> {
        Arc::clone(&self.leaderboard)
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn notifications(&self) -> NotificationCenter {
        self.notifications.clone()
    }
}
