mod course;
mod ids;
pub mod key;
pub mod leaderboard;
pub mod lenient;
mod session;
mod stats;

pub use ids::{CourseId, ParseIdError, StudentId};

pub use course::{Chapter, Course, CourseError, Question};
pub use key::sanitize_key;
pub use leaderboard::{LOCAL_LEADERBOARD_LIMIT, LeaderboardEntry};
pub use lenient::UNKNOWN_TOPIC;
pub use session::{SessionSubmission, SessionSubmissionError, accuracy_percent};
pub use stats::{CareerStats, CourseStats, RECENT_SESSION_LIMIT, RecentSession};
