use services::{AnswerOutcome, QuizReport, QuizRun, Source, TimeAdjustment};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub progress_label: String,
    pub prompt: String,
    pub choices: Vec<String>,
}

#[must_use]
pub fn map_question(run: &QuizRun) -> Option<QuestionVm> {
    let question = run.current_question()?;
    Some(QuestionVm {
        progress_label: format!(
            "Question {} of {}",
            run.position() + 1,
            run.total_questions()
        ),
        prompt: question.prompt().to_string(),
        choices: question.choices().to_vec(),
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub class: &'static str,
    pub headline: String,
    pub time_label: String,
    pub explanation: Option<String>,
}

#[must_use]
pub fn map_feedback(outcome: &AnswerOutcome) -> FeedbackVm {
    let headline = if outcome.correct {
        format!("Correct! +{} points", outcome.points)
    } else {
        "Not quite.".to_string()
    };
    let time_label = match outcome.time {
        TimeAdjustment::Bonus(secs) => format!("+{secs}s"),
        TimeAdjustment::Penalty(secs) => format!("-{secs}s"),
    };
    FeedbackVm {
        class: if outcome.correct {
            "feedback feedback--correct"
        } else {
            "feedback feedback--wrong"
        },
        headline,
        time_label,
        explanation: outcome.explanation.clone(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub headline: &'static str,
    pub score_label: String,
    pub answers_label: String,
    pub streak_label: String,
    pub leaderboard_label: &'static str,
}

#[must_use]
pub fn map_result(report: &QuizReport) -> ResultVm {
    let submission = &report.submission;
    ResultVm {
        headline: if submission.completed {
            "Chapter complete!"
        } else {
            "Time's up!"
        },
        score_label: format!("{} points", submission.points),
        answers_label: format!(
            "{} of {} correct",
            submission.correct,
            submission.answered()
        ),
        streak_label: format!("Best streak: {}", submission.max_streak),
        leaderboard_label: match report.leaderboard {
            Some(Source::Remote) => "Score posted to the leaderboard.",
            Some(Source::Local) => "Offline: score saved on this device.",
            None => "Score could not be saved.",
        },
    }
}
