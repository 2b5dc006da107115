//! Quiz countdown timer.
//!
//! The timer owns no thread or interval. A driver calls [`GameTimer::tick`]
//! once per wall-clock second; pausing only changes the phase so ticks become
//! no-ops, the driver keeps ticking.
//!
//! ```text
//! Idle -> Running <-> Paused
//!            \         /
//!             Expired
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
    Expired,
}

/// Colour band for the countdown display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerBand {
    Normal,
    Warning,
    Danger,
    Critical,
}

impl TimerBand {
    #[must_use]
    pub fn for_remaining(remaining: u32) -> Self {
        match remaining {
            0..=5 => Self::Critical,
            6..=10 => Self::Danger,
            11..=20 => Self::Warning,
            _ => Self::Normal,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Critical => "critical",
        }
    }
}

/// What a tick or mutation did, for drivers that need to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Ticked { remaining: u32 },
    Expired,
}

/// Read-only view of the timer used by the UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerReadout {
    pub phase: TimerPhase,
    pub remaining: u32,
    pub max: u32,
    pub fraction: f64,
    pub band: TimerBand,
}

/// Terminal callback, invoked once each time a run expires.
pub type ExpireCallback = Box<dyn FnMut() + Send + 'static>;

pub struct GameTimer {
    phase: TimerPhase,
    remaining: u32,
    max: u32,
    on_expire: Option<ExpireCallback>,
}

impl fmt::Debug for GameTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameTimer")
            .field("phase", &self.phase)
            .field("remaining", &self.remaining)
            .field("max", &self.max)
            .field("armed", &self.on_expire.is_some())
            .finish()
    }
}

impl Default for GameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl GameTimer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: TimerPhase::Idle,
            remaining: 0,
            max: 0,
            on_expire: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn max(&self) -> u32 {
        self.max
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.phase == TimerPhase::Expired
    }

    /// Remaining time as a fraction of `max`; zero for an unset timer.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.max == 0 {
            return 0.0;
        }
        f64::from(self.remaining) / f64::from(self.max)
    }

    #[must_use]
    pub fn band(&self) -> TimerBand {
        TimerBand::for_remaining(self.remaining)
    }

    #[must_use]
    pub fn readout(&self) -> TimerReadout {
        TimerReadout {
            phase: self.phase,
            remaining: self.remaining,
            max: self.max,
            fraction: self.fraction(),
            band: self.band(),
        }
    }

    /// Register the callback fired when a run expires.
    ///
    /// It stays registered across restarts and replaces any earlier callback.
    pub fn on_expire(&mut self, callback: impl FnMut() + Send + 'static) {
        self.on_expire = Some(Box::new(callback));
    }

    /// Begin a run of `duration` seconds. Ignored while running or paused.
    ///
    /// Returns `true` when a new run started. A zero duration expires at once.
    pub fn start(&mut self, duration: u32) -> bool {
        match self.phase {
            TimerPhase::Idle | TimerPhase::Expired => {
                self.max = duration;
                self.remaining = duration;
                self.phase = TimerPhase::Running;
                if duration == 0 {
                    self.expire();
                }
                true
            }
            TimerPhase::Running | TimerPhase::Paused => false,
        }
    }

    pub fn pause(&mut self) -> bool {
        if self.phase == TimerPhase::Running {
            self.phase = TimerPhase::Paused;
            return true;
        }
        false
    }

    pub fn resume(&mut self) -> bool {
        if self.phase == TimerPhase::Paused {
            self.phase = TimerPhase::Running;
            return true;
        }
        false
    }

    /// Abandon the run without firing the callback.
    pub fn stop(&mut self) {
        self.phase = TimerPhase::Idle;
    }

    /// Advance one second. No-op unless running.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if self.phase != TimerPhase::Running {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.expire();
            return Some(TimerEvent::Expired);
        }
        Some(TimerEvent::Ticked {
            remaining: self.remaining,
        })
    }

    /// Add `seconds`, never going above `cap`. Never lowers the remaining time.
    ///
    /// A `cap` above the current `max` raises `max` so the remaining time
    /// still fits the bar. Expired timers are left alone.
    pub fn add_time(&mut self, seconds: u32, cap: u32) {
        if self.phase == TimerPhase::Expired {
            return;
        }
        if cap > self.max {
            self.max = cap;
        }
        let raised = self.remaining.saturating_add(seconds).min(cap);
        self.remaining = self.remaining.max(raised);
    }

    /// Remove `seconds`; reaching zero during a run expires the timer.
    pub fn subtract_time(&mut self, seconds: u32) -> Option<TimerEvent> {
        if self.phase == TimerPhase::Expired {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(seconds);
        let in_run = matches!(self.phase, TimerPhase::Running | TimerPhase::Paused);
        if in_run && self.remaining == 0 {
            self.expire();
            return Some(TimerEvent::Expired);
        }
        None
    }

    fn expire(&mut self) {
        self.remaining = 0;
        self.phase = TimerPhase::Expired;
        if let Some(callback) = self.on_expire.as_mut() {
            callback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn counting_timer() -> (GameTimer, Arc<AtomicU32>) {
        let fired = Arc::new(AtomicU32::new(0));
        let mut timer = GameTimer::new();
        let counter = Arc::clone(&fired);
        timer.on_expire(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (timer, fired)
    }

    #[test]
    fn pause_freezes_remaining() {
        let mut timer = GameTimer::new();
        timer.start(30);
        assert!(timer.pause());
        for _ in 0..5 {
            assert_eq!(timer.tick(), None);
        }
        assert!(timer.resume());
        assert_eq!(timer.remaining(), 30);
        assert_eq!(timer.phase(), TimerPhase::Running);
    }

    #[test]
    fn expires_exactly_once() {
        let (mut timer, fired) = counting_timer();
        timer.start(3);

        let mut last = timer.remaining();
        let mut events = Vec::new();
        for _ in 0..10 {
            if let Some(event) = timer.tick() {
                events.push(event);
            }
            assert!(timer.remaining() <= last);
            last = timer.remaining();
        }

        assert_eq!(
            events,
            vec![
                TimerEvent::Ticked { remaining: 2 },
                TimerEvent::Ticked { remaining: 1 },
                TimerEvent::Expired,
            ]
        );
        assert_eq!(timer.remaining(), 0);
        assert!(timer.is_expired());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn subtraction_to_zero_expires_once() {
        let (mut timer, fired) = counting_timer();
        timer.start(10);
        assert_eq!(timer.subtract_time(25), Some(TimerEvent::Expired));
        assert_eq!(timer.subtract_time(5), None);
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.remaining(), 0);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn subtraction_while_paused_expires() {
        let (mut timer, fired) = counting_timer();
        timer.start(5);
        timer.pause();
        assert_eq!(timer.subtract_time(5), Some(TimerEvent::Expired));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn add_time_respects_cap() {
        let mut timer = GameTimer::new();
        timer.start(20);
        timer.tick();
        timer.add_time(5, 20);
        assert_eq!(timer.remaining(), 20);

        timer.add_time(15, 30);
        assert_eq!(timer.remaining(), 30);
        assert_eq!(timer.max(), 30);
        assert!(timer.remaining() <= timer.max());
    }

    #[test]
    fn add_time_never_lowers_remaining() {
        let mut timer = GameTimer::new();
        timer.start(20);
        timer.add_time(3, 10);
        assert_eq!(timer.remaining(), 20);
        timer.add_time(5, 0);
        assert_eq!(timer.remaining(), 20);
        assert!(timer.is_running());
    }

    #[test]
    fn stopped_run_does_not_fire() {
        let (mut timer, fired) = counting_timer();
        timer.start(1);
        timer.stop();
        assert_eq!(timer.tick(), None);
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        timer.start(1);
        assert_eq!(timer.tick(), Some(TimerEvent::Expired));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn every_run_fires_once_without_re_registering() {
        let (mut timer, fired) = counting_timer();
        timer.start(1);
        timer.tick();
        assert!(!timer.resume());
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        assert!(timer.start(2));
        for _ in 0..5 {
            timer.tick();
        }
        assert_eq!(fired.load(Ordering::SeqCst), 2);

        timer.start(3);
        timer.subtract_time(10);
        timer.subtract_time(10);
        assert_eq!(fired.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn start_is_ignored_mid_run() {
        let mut timer = GameTimer::new();
        assert!(timer.start(10));
        timer.tick();
        assert!(!timer.start(60));
        assert_eq!(timer.remaining(), 9);
    }

    #[test]
    fn zero_duration_expires_immediately() {
        let (mut timer, fired) = counting_timer();
        timer.start(0);
        assert!(timer.is_expired());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn bands_follow_thresholds() {
        assert_eq!(TimerBand::for_remaining(30), TimerBand::Normal);
        assert_eq!(TimerBand::for_remaining(21), TimerBand::Normal);
        assert_eq!(TimerBand::for_remaining(20), TimerBand::Warning);
        assert_eq!(TimerBand::for_remaining(11), TimerBand::Warning);
        assert_eq!(TimerBand::for_remaining(10), TimerBand::Danger);
        assert_eq!(TimerBand::for_remaining(6), TimerBand::Danger);
        assert_eq!(TimerBand::for_remaining(5), TimerBand::Critical);
        assert_eq!(TimerBand::for_remaining(0), TimerBand::Critical);
    }

    #[test]
    fn readout_reports_fraction() {
        let mut timer = GameTimer::new();
        assert!(timer.fraction().abs() < f64::EPSILON);
        timer.start(40);
        for _ in 0..10 {
            timer.tick();
        }
        let readout = timer.readout();
        assert_eq!(readout.remaining, 30);
        assert!((readout.fraction - 0.75).abs() < f64::EPSILON);
        assert_eq!(readout.band, TimerBand::Normal);
    }
}
