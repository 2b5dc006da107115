use quest_core::model::{CareerStats, LeaderboardEntry};
use services::{LeaderboardSnapshot, Source};

use super::time_fmt::{format_datetime, format_duration};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseRowVm {
    pub title: String,
    pub status: &'static str,
    pub sessions: u32,
    pub accuracy_label: String,
    pub best_score: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecentRowVm {
    pub title: String,
    pub points: u32,
    pub result_label: String,
    pub played_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CareerVm {
    pub sessions_label: String,
    pub points_label: String,
    pub accuracy_label: String,
    pub best_streak_label: String,
    pub time_label: String,
    pub courses: Vec<CourseRowVm>,
    pub recent: Vec<RecentRowVm>,
    pub is_empty: bool,
}

#[must_use]
pub fn map_career(stats: &CareerStats) -> CareerVm {
    let mut courses: Vec<CourseRowVm> = stats
        .courses
        .iter()
        .map(|(topic, course)| CourseRowVm {
            title: if course.title.is_empty() {
                topic.clone()
            } else {
                course.title.clone()
            },
            status: if course.completed {
                "Completed"
            } else {
                "In progress"
            },
            sessions: course.sessions,
            accuracy_label: format!("{}%", course.accuracy()),
            best_score: course.best_score,
        })
        .collect();
    courses.sort_by(|a, b| b.best_score.cmp(&a.best_score).then_with(|| a.title.cmp(&b.title)));

    let recent = stats
        .recent_sessions
        .iter()
        .map(|session| RecentRowVm {
            title: if session.course_title.is_empty() {
                session.course_topic.clone()
            } else {
                session.course_title.clone()
            },
            points: session.points,
            result_label: format!(
                "{}/{} correct ({}%)",
                session.correct,
                session.correct.saturating_add(session.wrong),
                session.accuracy
            ),
            played_at: session
                .played_at
                .map_or_else(|| "-".to_string(), format_datetime),
        })
        .collect();

    CareerVm {
        sessions_label: format!("{} sessions", stats.total_sessions),
        points_label: format!("{} points", stats.total_points),
        accuracy_label: format!("{}% accuracy", stats.accuracy),
        best_streak_label: format!("Best streak: {}", stats.best_streak),
        time_label: format_duration(stats.total_time_secs),
        courses,
        recent,
        is_empty: stats.total_sessions == 0,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardRowVm {
    pub rank: usize,
    pub player_name: String,
    pub score: u32,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardVm {
    pub rows: Vec<LeaderboardRowVm>,
    /// Shown when the list came from this device instead of the shared board.
    pub offline_notice: Option<&'static str>,
}

fn map_entry(rank: usize, entry: &LeaderboardEntry) -> LeaderboardRowVm {
    LeaderboardRowVm {
        rank,
        player_name: if entry.player_name.trim().is_empty() {
            "Anonymous".to_string()
        } else {
            entry.player_name.clone()
        },
        score: entry.score,
        detail: format!("{} · {}%", entry.course_topic, entry.accuracy),
    }
}

#[must_use]
pub fn map_leaderboard(snapshot: &LeaderboardSnapshot) -> LeaderboardVm {
    LeaderboardVm {
        rows: snapshot
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| map_entry(i + 1, entry))
            .collect(),
        offline_notice: match snapshot.source {
            Source::Remote => None,
            Source::Local => Some("Offline: showing scores saved on this device."),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quest_core::model::SessionSubmission;
    use quest_core::time::fixed_now;

    #[test]
    fn empty_stats_are_flagged() {
        let vm = map_career(&CareerStats::default());
        assert!(vm.is_empty);
        assert!(vm.courses.is_empty());
        assert_eq!(vm.time_label, "0m 00s");
    }

    #[test]
    fn courses_and_recent_sessions_are_mapped() {
        let mut stats = CareerStats::default();
        let submission = SessionSubmission {
            course_title: "Space Explorers".into(),
            points: 40,
            correct: 3,
            wrong: 1,
            time_spent_secs: 75,
            completed: true,
            ..SessionSubmission::new(Some("space"))
        };
        stats.accumulate(&submission, fixed_now());

        let vm = map_career(&stats);
        assert_eq!(vm.sessions_label, "1 sessions");
        assert_eq!(vm.accuracy_label, "75% accuracy");
        assert_eq!(vm.courses[0].title, "Space Explorers");
        assert_eq!(vm.courses[0].status, "Completed");
        assert_eq!(vm.recent[0].result_label, "3/4 correct (75%)");
        assert_eq!(vm.recent[0].played_at, "2023-11-14 22:13");
    }

    #[test]
    fn local_leaderboard_shows_offline_notice() {
        let snapshot = LeaderboardSnapshot {
            entries: vec![
                LeaderboardEntry::new("", 90, fixed_now()).with_course("space"),
                LeaderboardEntry::new("Bo", 40, fixed_now()),
            ],
            source: Source::Local,
        };
        let vm = map_leaderboard(&snapshot);
        assert!(vm.offline_notice.is_some());
        assert_eq!(vm.rows[0].rank, 1);
        assert_eq!(vm.rows[0].player_name, "Anonymous");
        assert_eq!(vm.rows[1].rank, 2);
    }
}
