//! Consecutive-correct-answer tracking and the score multiplier it drives.

use serde::{Deserialize, Serialize};

/// Streak lengths where the multiplier steps up, paired with the new multiplier.
pub const MULTIPLIER_BREAKPOINTS: [(u32, f64); 4] = [(10, 3.0), (7, 2.5), (5, 2.0), (3, 1.5)];

/// Score multiplier for a streak of `current` correct answers.
#[must_use]
pub fn multiplier(current: u32) -> f64 {
    MULTIPLIER_BREAKPOINTS
        .iter()
        .find(|(threshold, _)| current >= *threshold)
        .map_or(1.0, |(_, m)| *m)
}

/// Bonus points per streak step, chosen by the bracket of the best streak.
#[must_use]
pub fn combo_weight(max: u32) -> u32 {
    match max {
        10.. => 30,
        7..=9 => 20,
        5..=6 => 15,
        3..=4 => 10,
        _ => 5,
    }
}

/// Result of recording a single answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComboUpdate {
    pub current: u32,
    pub max: u32,
    pub multiplier: f64,
    /// Set when `current` landed exactly on a multiplier breakpoint.
    pub milestone: Option<u32>,
    /// Set when a streak of at least 3 was lost; carries the lost length.
    pub broken: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboTracker {
    current: u32,
    max: u32,
}

impl ComboTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> u32 {
        self.current
    }

    #[must_use]
    pub fn max(&self) -> u32 {
        self.max
    }

    #[must_use]
    pub fn multiplier(&self) -> f64 {
        multiplier(self.current)
    }

    pub fn record(&mut self, correct: bool) -> ComboUpdate {
        let mut broken = None;
        if correct {
            self.current = self.current.saturating_add(1);
            self.max = self.max.max(self.current);
        } else {
            if self.current >= 3 {
                broken = Some(self.current);
            }
            self.current = 0;
        }

        let milestone = MULTIPLIER_BREAKPOINTS
            .iter()
            .any(|(threshold, _)| correct && self.current == *threshold)
            .then_some(self.current);

        ComboUpdate {
            current: self.current,
            max: self.max,
            multiplier: self.multiplier(),
            milestone,
            broken,
        }
    }

    /// End-of-run bonus: the best streak times its bracket weight.
    #[must_use]
    pub fn total_combo_score(&self) -> u32 {
        self.max.saturating_mul(combo_weight(self.max))
    }

    /// Clears the current streak and the best streak.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
