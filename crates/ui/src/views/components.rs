use dioxus::prelude::*;

use crate::vm::{ComboVm, TimerVm};

#[component]
pub fn TimerBadge(timer: TimerVm) -> Element {
    rsx! {
        div { class: "{timer.band_class}",
            span { class: "timer-label", "{timer.label}" }
            if timer.paused {
                span { class: "timer-paused", "Paused" }
            }
            div { class: "timer-bar",
                div { class: "timer-fill", style: "width: {timer.percent}%" }
            }
        }
    }
}

#[component]
pub fn ComboMeter(combo: ComboVm) -> Element {
    let flash = if combo.flash { " combo--flash" } else { "" };
    rsx! {
        div { class: "{combo.level_class}{flash}",
            span { class: "combo-count", "Combo {combo.current}" }
            span { class: "combo-multiplier", "{combo.multiplier_label}" }
            span { class: "combo-best muted", "Best {combo.max}" }
        }
    }
}
