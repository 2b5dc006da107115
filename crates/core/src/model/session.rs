use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::lenient::{self, de_bool, de_text, de_topic, de_u32, unknown_topic};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionSubmissionError {
    #[error("session payload must be a JSON object")]
    NotAnObject,

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Summary of one completed quiz attempt, as handed to the stats service.
///
/// Deserialization is lenient: numeric fields that are missing or malformed
/// become zero and a blank course topic becomes `"unknown"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSubmission {
    #[serde(default, deserialize_with = "de_text")]
    pub student_name: String,
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
    pub max_streak: u32,
    #[serde(default, deserialize_with = "de_u32")]
    pub time_spent_secs: u32,
    #[serde(default, deserialize_with = "de_bool")]
    pub completed: bool,
}

impl SessionSubmission {
    #[must_use]
    pub fn new(course_topic: Option<&str>) -> Self {
        Self {
            student_name: String::new(),
            course_topic: lenient::normalize_topic(course_topic),
            course_title: String::new(),
            points: 0,
            correct: 0,
            wrong: 0,
            max_streak: 0,
            time_spent_secs: 0,
            completed: false,
        }
    }

    /// Decode a loosely typed payload.
    ///
    /// # Errors
    ///
    /// Returns `SessionSubmissionError::NotAnObject` unless `value` is a JSON object.
    pub fn from_json(value: Value) -> Result<Self, SessionSubmissionError> {
        if !value.is_object() {
            return Err(SessionSubmissionError::NotAnObject);
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Re-applies the topic fallback for values built by hand.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.course_topic = lenient::normalize_topic(Some(&self.course_topic));
        self
    }

    #[must_use]
    pub fn answered(&self) -> u32 {
        self.correct.saturating_add(self.wrong)
    }

    /// Percentage of correct answers, rounded to the nearest integer.
    #[must_use]
    pub fn accuracy(&self) -> u32 {
        accuracy_percent(u64::from(self.correct), u64::from(self.answered()))
    }
}

/// Rounded percentage of `correct` out of `answered`; zero when nothing was answered.
#[must_use]
pub fn accuracy_percent(correct: u64, answered: u64) -> u32 {
    if answered == 0 {
        return 0;
    }
    let pct = (correct.min(answered) * 100 + answered / 2) / answered;
    u32::try_from(pct).unwrap_or(100)
}
