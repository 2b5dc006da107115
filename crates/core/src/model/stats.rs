use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::key::sanitize_key;
use super::lenient::{de_bool, de_text, de_topic, de_u32, de_u64, unknown_topic};
use super::session::{SessionSubmission, accuracy_percent};

/// How many recent sessions a career document keeps.
pub const RECENT_SESSION_LIMIT: usize = 3;

/// Per-course counters inside a career document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseStats {
    #[serde(default, deserialize_with = "de_text")]
    pub title: String,
    #[serde(default, deserialize_with = "de_bool")]
    pub completed: bool,
    #[serde(default, deserialize_with = "de_u32")]
    pub sessions: u32,
    #[serde(default, deserialize_with = "de_u64")]
    pub points: u64,
    #[serde(default, deserialize_with = "de_u32")]
    pub correct: u32,
    #[serde(default, deserialize_with = "de_u32")]
    pub wrong: u32,
    #[serde(default, deserialize_with = "de_u32")]
    pub best_score: u32,
}

impl CourseStats {
    #[must_use]
    pub fn accuracy(&self) -> u32 {
        accuracy_percent(
            u64::from(self.correct),
            u64::from(self.correct) + u64::from(self.wrong),
        )
    }
}

/// Condensed entry in the recent-session list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSession {
    #[serde(default = "unknown_topic", deserialize_with = "de_topic")]
    pub course_topic: String,
    #[serde(default, deserialize_with = "de_text")]
    pub course_title: String,
    #[serde(default, deserialize_with = "de_u32")]
    pub points: u32,
    #[serde(default, deserialize_with = "de_u32")]
    pub correct: u32,
    #[serde(default, deserialize_with = "de_u32")]
    pub wrong: u32,
    #[serde(default, deserialize_with = "de_u32")]
    pub accuracy: u32,
    #[serde(default, deserialize_with = "de_bool")]
    pub completed: bool,
    #[serde(default)]
    pub played_at: Option<DateTime<Utc>>,
}

/// Aggregated career document for one student.
///
/// Counters only grow through [`CareerStats::accumulate`]; `accuracy` is
/// recomputed from the totals on every accumulation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerStats {
    #[serde(default, deserialize_with = "de_text")]
    pub student_name: String,
    #[serde(default, deserialize_with = "de_u32")]
    pub total_sessions: u32,
    #[serde(default, deserialize_with = "de_u64")]
    pub total_points: u64,
    #[serde(default, deserialize_with = "de_u64")]
    pub total_correct: u64,
    #[serde(default, deserialize_with = "de_u64")]
    pub total_wrong: u64,
    #[serde(default, deserialize_with = "de_u32")]
    pub accuracy: u32,
    #[serde(default, deserialize_with = "de_u32")]
    pub best_streak: u32,
    #[serde(default, deserialize_with = "de_u64")]
    pub total_time_secs: u64,
    #[serde(default)]
    pub courses: BTreeMap<String, CourseStats>,
    #[serde(default)]
    pub recent_sessions: Vec<RecentSession>,
    #[serde(default)]
    pub last_played_at: Option<DateTime<Utc>>,
}

impl CareerStats {
    /// Fold one session into the document.
    pub fn accumulate(&mut self, submission: &SessionSubmission, at: DateTime<Utc>) {
        let submission = submission.clone().normalized();

        if !submission.student_name.trim().is_empty() {
            self.student_name = submission.student_name.trim().to_string();
        }
        self.total_sessions = self.total_sessions.saturating_add(1);
        self.total_points = self
            .total_points
            .saturating_add(u64::from(submission.points));
        self.total_correct = self
            .total_correct
            .saturating_add(u64::from(submission.correct));
        self.total_wrong = self.total_wrong.saturating_add(u64::from(submission.wrong));
        self.accuracy = accuracy_percent(
            self.total_correct,
            self.total_correct.saturating_add(self.total_wrong),
        );
        self.best_streak = self.best_streak.max(submission.max_streak);
        self.total_time_secs = self
            .total_time_secs
            .saturating_add(u64::from(submission.time_spent_secs));
        self.last_played_at = Some(at);

        let course = self
            .courses
            .entry(sanitize_key(&submission.course_topic))
            .or_default();
        if !submission.course_title.is_empty() {
            course.title.clone_from(&submission.course_title);
        }
        course.completed |= submission.completed;
        course.sessions = course.sessions.saturating_add(1);
        course.points = course.points.saturating_add(u64::from(submission.points));
        course.correct = course.correct.saturating_add(submission.correct);
        course.wrong = course.wrong.saturating_add(submission.wrong);
        course.best_score = course.best_score.max(submission.points);

        self.recent_sessions.insert(
            0,
            RecentSession {
                course_topic: submission.course_topic.clone(),
                course_title: submission.course_title.clone(),
                points: submission.points,
                correct: submission.correct,
                wrong: submission.wrong,
                accuracy: submission.accuracy(),
                completed: submission.completed,
                played_at: Some(at),
            },
        );
        self.recent_sessions.truncate(RECENT_SESSION_LIMIT);
    }

    #[must_use]
    pub fn completed_courses(&self) -> usize {
        self.courses.values().filter(|c| c.completed).count()
    }

    #[must_use]
    pub fn course(&self, topic: &str) -> Option<&CourseStats> {
        self.courses.get(&sanitize_key(topic))
    }
}
