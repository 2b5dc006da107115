use quest_core::timer::{TimerPhase, TimerReadout};

use super::time_fmt::format_clock;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimerVm {
    pub label: String,
    pub band_class: String,
    /// Width of the progress bar, 0..=100.
    pub percent: u32,
    pub paused: bool,
    pub expired: bool,
}

#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn map_timer(readout: &TimerReadout) -> TimerVm {
    let percent = (readout.fraction.clamp(0.0, 1.0) * 100.0).round() as u32;
    TimerVm {
        label: format_clock(readout.remaining),
        band_class: format!("timer timer--{}", readout.band.as_str()),
        percent,
        paused: readout.phase == TimerPhase::Paused,
        expired: readout.phase == TimerPhase::Expired,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quest_core::timer::GameTimer;

    #[test]
    fn running_timer_maps_to_normal_band() {
        let mut timer = GameTimer::new();
        timer.start(60);
        timer.tick();
        let vm = map_timer(&timer.readout());
        assert_eq!(vm.label, "0:59");
        assert_eq!(vm.band_class, "timer timer--normal");
        assert_eq!(vm.percent, 98);
        assert!(!vm.paused);
    }

    #[test]
    fn low_time_is_critical_and_pause_is_flagged() {
        let mut timer = GameTimer::new();
        timer.start(5);
        timer.pause();
        let vm = map_timer(&timer.readout());
        assert_eq!(vm.band_class, "timer timer--critical");
        assert!(vm.paused);
        assert_eq!(vm.percent, 100);
    }

    #[test]
    fn expired_timer_is_empty() {
        let mut timer = GameTimer::new();
        timer.start(1);
        timer.tick();
        let vm = map_timer(&timer.readout());
        assert!(vm.expired);
        assert_eq!(vm.percent, 0);
        assert_eq!(vm.label, "0:00");
    }
}
