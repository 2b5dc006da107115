use std::sync::Arc;

use quest_core::model::{CareerStats, CourseId, LeaderboardEntry, SessionSubmission, StudentId};
use tracing::{info, warn};

use super::run::{QuizConfig, QuizRun};
use crate::Clock;
use crate::catalog::Catalog;
use crate::error::QuizError;
use crate::leaderboard_service::{LeaderboardService, Source};
use crate::stats_service::StatsGateway;

/// What happened when a finished run was recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizReport {
    pub submission: SessionSubmission,
    pub stats: CareerStats,
    /// `None` when neither the remote nor the local leaderboard accepted the score.
    pub leaderboard: Option<Source>,
}

/// Starts chapter quizzes and records their results.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    catalog: Arc<Catalog>,
    stats: Arc<dyn StatsGateway>,
    leaderboard: LeaderboardService,
    config: QuizConfig,
}

impl QuizService {
    #[must_use]
    pub fn new(
        clock: Clock,
        catalog: Arc<Catalog>,
        stats: Arc<dyn StatsGateway>,
        leaderboard: LeaderboardService,
    ) -> Self {
        Self {
            clock,
            catalog,
            stats,
            leaderboard,
            config: QuizConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: QuizConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// # Errors
    ///
    /// Returns `QuizError::UnknownCourse` for an id missing from the catalog,
    /// or the errors of [`QuizRun::start`].
    pub fn start(&self, course_id: &CourseId, chapter: usize) -> Result<QuizRun, QuizError> {
        let course = self
            .catalog
            .get(course_id)
            .ok_or_else(|| QuizError::UnknownCourse(course_id.to_string()))?;
        let run = QuizRun::start(course, chapter, self.config)?;
        info!(course = %course_id, chapter, questions = run.total_questions(), "quiz started");
        Ok(run)
    }

    /// Finish `run`, fold it into the student's career stats and post the score.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Stats` if the career stats cannot be updated. A
    /// leaderboard failure is logged and reported through `QuizReport::leaderboard`.
    pub async fn complete(
        &self,
        run: &mut QuizRun,
        student: &StudentId,
        player_name: &str,
    ) -> Result<QuizReport, QuizError> {
        let submission = SessionSubmission {
            student_name: player_name.to_string(),
            ..run.finish()
        };

        let stats = self
            .stats
            .submit_session(student, submission.clone())
            .await?;

        let entry = LeaderboardEntry::new(player_name, submission.points, self.clock.now())
            .with_course(submission.course_topic.clone())
            .with_accuracy(submission.accuracy());
        let leaderboard = match self.leaderboard.submit(entry).await {
            Ok(source) => Some(source),
            Err(err) => {
                warn!(error = %err, "score was not recorded on any leaderboard");
                None
            }
        };

        Ok(QuizReport {
            submission,
            stats,
            leaderboard,
        })
    }
}
