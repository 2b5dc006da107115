use chrono::{DateTime, Duration, Utc};

/// Source of "now" for services and tests.
///
/// Quiz runs, notification deadlines and persisted session timestamps all read
/// time through a `Clock` so tests can pin it.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Move a fixed clock forward. System clocks are left alone.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }

    /// Whole seconds elapsed since `since`, never negative.
    #[must_use]
    pub fn elapsed_secs(&self, since: DateTime<Utc>) -> u32 {
        let secs = (self.now() - since).num_seconds().max(0);
        u32::try_from(secs).unwrap_or(u32::MAX)
    }
}

/// Deterministic timestamp for tests (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_advances_and_reports_elapsed() {
        let mut clock = fixed_clock();
        let start = clock.now();
        clock.advance(Duration::seconds(42));
        assert_eq!(clock.elapsed_secs(start), 42);
    }

    #[test]
    fn elapsed_is_clamped_for_future_start() {
        let clock = fixed_clock();
        let future = clock.now() + Duration::seconds(10);
        assert_eq!(clock.elapsed_secs(future), 0);
    }
}
