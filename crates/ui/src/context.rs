use std::sync::Arc;

use quest_core::model::StudentId;
use services::{
    AppServices, Catalog, LeaderboardService, NotificationCenter, QuizService, StatsGateway,
};

pub trait UiApp: Send + Sync {
    fn student(&self) -> StudentId;
    fn catalog(&self) -> Arc<Catalog>;
    fn quiz(&self) -> Arc<QuizService>;
    fn stats(&self) -> Arc<dyn StatsGateway>;
    fn leaderboard(&self) -> Arc<LeaderboardService>;
    fn notifications(&self) -> NotificationCenter;
}

impl UiApp for AppServices {
    fn student(&self) -> StudentId {
        AppServices::student(self).clone()
    }

    fn catalog(&self) -> Arc<Catalog> {
        AppServices::catalog(self)
    }

    fn quiz(&self) -> Arc<QuizService> {
        AppServices::quiz(self)
    }

    fn stats(&self) -> Arc<dyn StatsGateway> {
        AppServices::stats(self)
    }

    fn leaderboard(&self) -> Arc<LeaderboardService> {
        AppServices::leaderboard(self)
    }

    fn notifications(&self) -> NotificationCenter {
        AppServices::notifications(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    student: StudentId,
    catalog: Arc<Catalog>,
    quiz: Arc<QuizService>,
    stats: Arc<dyn StatsGateway>,
    leaderboard: Arc<LeaderboardService>,
    notifications: NotificationCenter,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            student: app.student(),
            catalog: app.catalog(),
            quiz: app.quiz(),
            stats: app.stats(),
            leaderboard: app.leaderboard(),
            notifications: app.notifications(),
        }
    }

    #[must_use]
    pub fn student(&self) -> &StudentId {
        &self.student
    }

    /// Name shown on the leaderboard.
    #[must_use]
    pub fn player_name(&self) -> String {
        self.student.to_string()
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn stats(&self) -> Arc<dyn StatsGateway> {
        Arc::clone(&self.stats)
    }

    #[must_use]
    pub fn leaderboard(&self) -> Arc<LeaderboardService> {
        Arc::clone(&self.leaderboard)
    }

    #[must_use]
    pub fn notifications(&self) -> NotificationCenter {
        self.notifications.clone()
    }
}

// Provided by the composition root in `crates/app`.

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
