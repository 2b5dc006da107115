mod combo_vm;
mod quiz_vm;
mod stats_vm;
mod time_fmt;
mod timer_vm;

pub use combo_vm::{ComboVm, combo_message, map_combo};
pub use quiz_vm::{FeedbackVm, QuestionVm, ResultVm, map_feedback, map_question, map_result};
pub use stats_vm::{
    CareerVm, CourseRowVm, LeaderboardRowVm, LeaderboardVm, RecentRowVm, map_career,
    map_leaderboard,
};
pub use time_fmt::{format_clock, format_datetime, format_duration};
pub use timer_vm::{TimerVm, map_timer};
