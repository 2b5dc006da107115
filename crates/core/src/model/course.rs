use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::CourseId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseError {
    #[error("question prompt is empty")]
    EmptyPrompt,

    #[error("question needs at least two choices, got {len}")]
    TooFewChoices { len: usize },

    #[error("answer index {index} is out of range for {len} choices")]
    AnswerOutOfRange { index: usize, len: usize },

    #[error("chapter {index} does not exist")]
    UnknownChapter { index: usize },

    #[error("course has no chapters")]
    NoChapters,
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    prompt: String,
    choices: Vec<String>,
    answer: usize,
    explanation: Option<String>,
}

impl Question {
    /// # Errors
    ///
    /// Returns `CourseError` when the prompt is blank, fewer than two choices are
    /// given, or `answer` does not index into `choices`.
    pub fn new(
        prompt: impl Into<String>,
        choices: Vec<String>,
        answer: usize,
    ) -> Result<Self, CourseError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(CourseError::EmptyPrompt);
        }
        if choices.len() < 2 {
            return Err(CourseError::TooFewChoices { len: choices.len() });
        }
        if answer >= choices.len() {
            return Err(CourseError::AnswerOutOfRange {
                index: answer,
                len: choices.len(),
            });
        }
        Ok(Self {
            prompt,
            choices,
            answer,
            explanation: None,
        })
    }

    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    #[must_use]
    pub fn answer(&self) -> usize {
        self.answer
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    #[must_use]
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.answer
    }
}

/// Story chapter: a few paragraphs of narrative followed by a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub title: String,
    pub story: Vec<String>,
    pub questions: Vec<Question>,
}

impl Chapter {
    #[must_use]
    pub fn new(title: impl Into<String>, story: Vec<String>, questions: Vec<Question>) -> Self {
        Self {
            title: title.into(),
            story,
            questions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    id: CourseId,
    topic: String,
    title: String,
    description: String,
    chapters: Vec<Chapter>,
}

impl Course {
    /// # Errors
    ///
    /// Returns `CourseError::NoChapters` if `chapters` is empty.
    pub fn new(
        id: CourseId,
        topic: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        chapters: Vec<Chapter>,
    ) -> Result<Self, CourseError> {
        if chapters.is_empty() {
            return Err(CourseError::NoChapters);
        }
        Ok(Self {
            id,
            topic: topic.into(),
            title: title.into(),
            description: description.into(),
            chapters,
        })
    }

    #[must_use]
    pub fn id(&self) -> &CourseId {
        &self.id
    }

    /// Short subject tag used as the per-course key in career stats.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// # Errors
    ///
    /// Returns `CourseError::UnknownChapter` for an out-of-range index.
    pub fn chapter(&self, index: usize) -> Result<&Chapter, CourseError> {
        self.chapters
            .get(index)
            .ok_or(CourseError::UnknownChapter { index })
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.chapters.iter().map(|c| c.questions.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choices(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn question_rejects_bad_answer_index() {
        let err = Question::new("2 + 2?", choices(&["3", "4"]), 2).unwrap_err();
        assert_eq!(err, CourseError::AnswerOutOfRange { index: 2, len: 2 });
    }

    #[test]
    fn question_rejects_single_choice() {
        let err = Question::new("Pick", choices(&["only"]), 0).unwrap_err();
        assert_eq!(err, CourseError::TooFewChoices { len: 1 });
    }

    #[test]
    fn course_requires_chapters_and_counts_questions() {
        assert_eq!(
            Course::new(CourseId::new("x"), "x", "X", "", Vec::new()).unwrap_err(),
            CourseError::NoChapters
        );

        let q = Question::new("2 + 2?", choices(&["3", "4"]), 1).unwrap();
        let chapter = Chapter::new("One", vec!["Once upon a time".into()], vec![q.clone(), q]);
        let course = Course::new(CourseId::new("math"), "math", "Math", "", vec![chapter]).unwrap();
        assert_eq!(course.question_count(), 2);
        assert!(course.chapter(0).unwrap().questions[0].is_correct(1));
        assert!(course.chapter(3).is_err());
    }
}
