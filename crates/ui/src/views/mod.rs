mod career;
mod components;
mod course_select;
mod leaderboard;
mod notification_host;
mod quiz;
mod state;
mod story;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use career::CareerView;
pub use components::{ComboMeter, TimerBadge};
pub use course_select::CourseSelectView;
pub use leaderboard::LeaderboardView;
pub use notification_host::NotificationHost;
pub use quiz::QuizView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use story::StoryView;
