mod run;
mod service;

pub use run::{
    AnswerOutcome, BASE_POINTS, CORRECT_BONUS_SECS, DEFAULT_QUIZ_SECONDS, QuizConfig, QuizRun,
    TimeAdjustment, WRONG_PENALTY_SECS,
};
pub use service::{QuizReport, QuizService};
