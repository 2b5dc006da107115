use quest_core::combo::{ComboTracker, ComboUpdate};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComboVm {
    pub current: u32,
    pub max: u32,
    pub multiplier_label: String,
    pub level_class: &'static str,
    /// Set right after a breakpoint was reached so the meter can flash.
    pub flash: bool,
}

fn level_class(current: u32) -> &'static str {
    match current {
        10.. => "combo combo--blazing",
        7..=9 => "combo combo--hot",
        5..=6 => "combo combo--warm",
        3..=4 => "combo combo--on",
        _ => "combo",
    }
}

#[must_use]
pub fn map_combo(tracker: &ComboTracker, last: Option<&ComboUpdate>) -> ComboVm {
    ComboVm {
        current: tracker.current(),
        max: tracker.max(),
        multiplier_label: format!("x{}", tracker.multiplier()),
        level_class: level_class(tracker.current()),
        flash: last.is_some_and(|u| u.milestone.is_some()),
    }
}

/// Toast text for streak events, if the update deserves one.
#[must_use]
pub fn combo_message(update: &ComboUpdate) -> Option<String> {
    if let Some(streak) = update.milestone {
        return Some(format!("{streak} in a row! Points x{}", update.multiplier));
    }
    update
        .broken
        .map(|lost| format!("Streak of {lost} lost. Keep going!"))
}
