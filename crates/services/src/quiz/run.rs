use quest_core::combo::{ComboTracker, ComboUpdate};
use quest_core::model::{Course, CourseId, Question, SessionSubmission};
use quest_core::timer::{GameTimer, TimerEvent, TimerReadout};
use rand::seq::SliceRandom;

use crate::error::QuizError;

/// Time limit for one chapter quiz.
pub const DEFAULT_QUIZ_SECONDS: u32 = 60;
/// Points for a correct answer before the combo multiplier.
pub const BASE_POINTS: u32 = 10;
pub const CORRECT_BONUS_SECS: u32 = 3;
pub const WRONG_PENALTY_SECS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizConfig {
    pub time_limit_secs: u32,
    pub shuffle: bool,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: DEFAULT_QUIZ_SECONDS,
            shuffle: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeAdjustment {
    Bonus(u32),
    Penalty(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_choice: usize,
    pub points: u32,
    pub combo: ComboUpdate,
    pub time: TimeAdjustment,
    pub timer: TimerReadout,
    pub explanation: Option<String>,
    pub finished: bool,
}

/// One pass through a chapter's questions against the clock.
#[derive(Debug)]
pub struct QuizRun {
    course_id: CourseId,
    topic: String,
    course_title: String,
    chapter_title: String,
    questions: Vec<Question>,
    position: usize,
    correct: u32,
    wrong: u32,
    points: u32,
    combo: ComboTracker,
    timer: GameTimer,
    time_limit: u32,
    seconds_played: u32,
    finished: bool,
}

impl QuizRun {
    /// Prepare and start the timer for chapter `chapter` of `course`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Course` for an unknown chapter and
    /// `QuizError::NoQuestions` when the chapter has none.
    pub fn start(course: &Course, chapter: usize, config: QuizConfig) -> Result<Self, QuizError> {
        let source = course.chapter(chapter)?;
        if source.questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }

        let mut questions = source.questions.clone();
        if config.shuffle {
            questions.shuffle(&mut rand::rng());
        }

        let mut timer = GameTimer::new();
        timer.start(config.time_limit_secs);

        Ok(Self {
            course_id: course.id().clone(),
            topic: course.topic().to_string(),
            course_title: course.title().to_string(),
            chapter_title: source.title.clone(),
            questions,
            position: 0,
            correct: 0,
            wrong: 0,
            points: 0,
            combo: ComboTracker::new(),
            timer,
            time_limit: config.time_limit_secs,
            seconds_played: 0,
            finished: false,
        })
    }

    #[must_use]
    pub fn course_id(&self) -> &CourseId {
        &self.course_id
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn course_title(&self) -> &str {
        &self.course_title
    }

    #[must_use]
    pub fn chapter_title(&self) -> &str {
        &self.chapter_title
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.is_finished() {
            return None;
        }
        self.questions.get(self.position)
    }

    /// Zero-based index of the current question.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn wrong(&self) -> u32 {
        self.wrong
    }

    /// Points earned so far, without the end-of-run combo bonus.
    #[must_use]
    pub fn points(&self) -> u32 {
        self.points
    }

    #[must_use]
    pub fn combo(&self) -> &ComboTracker {
        &self.combo
    }

    #[must_use]
    pub fn timer(&self) -> TimerReadout {
        self.timer.readout()
    }

    /// Every question has been answered, whether or not time ran out.
    #[must_use]
    pub fn all_answered(&self) -> bool {
        self.position >= self.questions.len()
    }

    /// Every question was answered before time ran out.
    #[must_use]
    pub fn completed(&self) -> bool {
        self.all_answered() && !self.timer.is_expired()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished || self.all_answered() || self.timer.is_expired()
    }

    /// # Errors
    ///
    /// Returns `QuizError::Finished` once the run is over and
    /// `QuizError::InvalidChoice` for an index past the last choice.
    pub fn answer(&mut self, choice: usize) -> Result<AnswerOutcome, QuizError> {
        let question = self.current_question().ok_or(QuizError::Finished)?;
        let len = question.choices().len();
        if choice >= len {
            return Err(QuizError::InvalidChoice { index: choice, len });
        }
        let correct = question.is_correct(choice);
        let correct_choice = question.answer();
        let explanation = question.explanation().map(str::to_string);

        let combo = self.combo.record(correct);
        let (points, time) = if correct {
            self.correct += 1;
            let points = scaled_points(combo.multiplier);
            self.points = self.points.saturating_add(points);
            self.timer.add_time(CORRECT_BONUS_SECS, self.time_limit);
            (points, TimeAdjustment::Bonus(CORRECT_BONUS_SECS))
        } else {
            self.wrong += 1;
            self.timer.subtract_time(WRONG_PENALTY_SECS);
            (0, TimeAdjustment::Penalty(WRONG_PENALTY_SECS))
        };

        self.position += 1;
        if self.all_answered() && !self.timer.is_expired() {
            self.timer.stop();
        }

        Ok(AnswerOutcome {
            correct,
            correct_choice,
            points,
            combo,
            time,
            timer: self.timer.readout(),
            explanation,
            finished: self.is_finished(),
        })
    }

    /// One second of wall-clock time. Returns `None` while paused or finished.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        let event = self.timer.tick()?;
        self.seconds_played = self.seconds_played.saturating_add(1);
        Some(event)
    }

    pub fn pause(&mut self) -> bool {
        self.timer.pause()
    }

    pub fn resume(&mut self) -> bool {
        self.timer.resume()
    }

    /// Callback fired once when the countdown reaches zero.
    pub fn on_time_up(&mut self, callback: impl FnMut() + Send + 'static) {
        self.timer.on_expire(callback);
    }

    /// Close the run and build its submission, combo bonus included.
    pub fn finish(&mut self) -> SessionSubmission {
        self.finished = true;
        if !self.timer.is_expired() {
            self.timer.stop();
        }

        SessionSubmission {
            course_title: self.course_title.clone(),
            points: self
                .points
                .saturating_add(self.combo.total_combo_score()),
            correct: self.correct,
            wrong: self.wrong,
            max_streak: self.combo.max(),
            time_spent_secs: self.seconds_played,
            completed: self.completed(),
            ..SessionSubmission::new(Some(&self.topic))
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scaled_points(multiplier: f64) -> u32 {
    (f64::from(BASE_POINTS) * multiplier).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_catalog;
    use quest_core::model::{Chapter, CourseError};
    use quest_core::timer::TimerPhase;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

    fn course() -> Course {
        builtin_catalog()
            .unwrap()
            .get(&CourseId::new("fractions"))
            .unwrap()
            .clone()
    }

    fn answers(run: &QuizRun) -> usize {
        run.current_question().map(Question::answer).unwrap()
    }

    fn wrong_choice(run: &QuizRun) -> usize {
        let answer = answers(run);
        usize::from(answer == 0)
    }

    #[test]
    fn correct_answers_score_with_multiplier_and_bonus() {
        let mut run = QuizRun::start(&course(), 0, QuizConfig::default()).unwrap();
        for _ in 0..5 {
            run.tick();
        }
        assert_eq!(run.timer().remaining, 55);

        let first = run.answer(answers(&run)).unwrap();
        assert!(first.correct);
        assert_eq!(first.points, 10);
        assert_eq!(first.time, TimeAdjustment::Bonus(3));
        assert_eq!(first.timer.remaining, 58);

        run.answer(answers(&run)).unwrap();
        let third = run.answer(answers(&run)).unwrap();
        assert_eq!(third.points, 15);
        assert_eq!(third.combo.milestone, Some(3));
        assert!(third.finished);
        assert_eq!(run.timer().phase, TimerPhase::Idle);

        let submission = run.finish();
        assert_eq!(submission.course_topic, "fractions");
        assert_eq!(submission.points, 10 + 10 + 15 + 3 * 10);
        assert_eq!(submission.max_streak, 3);
        assert_eq!(submission.time_spent_secs, 5);
        assert!(submission.completed);
    }

    #[test]
    fn bonus_time_is_capped_at_the_limit() {
        let mut run = QuizRun::start(&course(), 0, QuizConfig::default()).unwrap();
        let outcome = run.answer(answers(&run)).unwrap();
        assert_eq!(outcome.timer.remaining, DEFAULT_QUIZ_SECONDS);
    }

    #[test]
    fn wrong_answers_cost_time_and_reset_combo() {
        let mut run = QuizRun::start(&course(), 1, QuizConfig::default()).unwrap();
        run.answer(answers(&run)).unwrap();
        let outcome = run.answer(wrong_choice(&run)).unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.points, 0);
        assert_eq!(outcome.combo.current, 0);
        assert_eq!(outcome.time, TimeAdjustment::Penalty(5));
        assert_eq!(outcome.timer.remaining, 55);
    }

    #[test]
    fn time_running_out_ends_the_run_incomplete() {
        let config = QuizConfig {
            time_limit_secs: 6,
            shuffle: false,
        };
        let mut run = QuizRun::start(&course(), 0, config).unwrap();
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);
        run.on_time_up(move || flag.store(true, Ordering::SeqCst));

        run.answer(wrong_choice(&run)).unwrap();
        assert_eq!(run.tick(), Some(TimerEvent::Expired));
        assert!(fired.load(Ordering::SeqCst));
        assert!(run.is_finished());
        assert!(matches!(run.answer(0), Err(QuizError::Finished)));

        let submission = run.finish();
        assert!(!submission.completed);
        assert_eq!(submission.wrong, 1);
    }

    #[test]
    fn penalty_on_the_last_question_can_end_the_run_incomplete() {
        let config = QuizConfig {
            time_limit_secs: 5,
            shuffle: false,
        };
        let mut run = QuizRun::start(&course(), 0, config).unwrap();
        let fired = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&fired);
        run.on_time_up(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        run.answer(answers(&run)).unwrap();
        run.answer(answers(&run)).unwrap();
        let last = run.answer(wrong_choice(&run)).unwrap();
        assert!(last.finished);
        assert_eq!(last.timer.remaining, 0);
        assert_eq!(last.timer.phase, TimerPhase::Expired);
        assert_eq!(run.timer().phase, TimerPhase::Expired);
        assert!(run.all_answered());
        assert!(!run.completed());

        let submission = run.finish();
        assert!(!submission.completed);
        assert_eq!(submission.correct, 2);
        assert_eq!(submission.wrong, 1);
        assert_eq!(run.timer().phase, TimerPhase::Expired);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn paused_runs_do_not_lose_time() {
        let mut run = QuizRun::start(&course(), 0, QuizConfig::default()).unwrap();
        assert!(run.pause());
        for _ in 0..10 {
            assert_eq!(run.tick(), None);
        }
        assert!(run.resume());
        assert_eq!(run.timer().remaining, DEFAULT_QUIZ_SECONDS);
    }

    #[test]
    fn invalid_choices_are_rejected() {
        let mut run = QuizRun::start(&course(), 0, QuizConfig::default()).unwrap();
        let err = run.answer(99).unwrap_err();
        assert!(matches!(err, QuizError::InvalidChoice { index: 99, .. }));
        assert_eq!(run.position(), 0);
    }

    #[test]
    fn shuffle_keeps_the_same_questions() {
        let config = QuizConfig {
            shuffle: true,
            ..QuizConfig::default()
        };
        let course = course();
        let run = QuizRun::start(&course, 0, config).unwrap();
        let mut shuffled: Vec<&str> = run.questions.iter().map(Question::prompt).collect();
        let mut original: Vec<&str> = course.chapters()[0]
            .questions
            .iter()
            .map(Question::prompt)
            .collect();
        shuffled.sort_unstable();
        original.sort_unstable();
        assert_eq!(shuffled, original);
    }

    #[test]
    fn empty_and_missing_chapters_fail() {
        let empty = Course::new(
            CourseId::new("empty"),
            "empty",
            "Empty",
            "",
            vec![Chapter::new("Nothing", Vec::new(), Vec::new())],
        )
        .unwrap();
        assert!(matches!(
            QuizRun::start(&empty, 0, QuizConfig::default()),
            Err(QuizError::NoQuestions)
        ));
        assert!(matches!(
            QuizRun::start(&empty, 3, QuizConfig::default()),
            Err(QuizError::Course(CourseError::UnknownChapter { index: 3 }))
        ));
    }
}
