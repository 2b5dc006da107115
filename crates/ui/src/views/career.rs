use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{CareerVm, map_career};

#[component]
pub fn CareerView() -> Element {
    let ctx = use_context::<AppContext>();
    let stats = ctx.stats();
    let student = ctx.student().clone();

    let mut resource = use_resource(move || {
        let stats = stats.clone();
        let student = student.clone();
        async move {
            let career = stats
                .fetch_stats(&student)
                .await
                .map_err(|_| ViewError::Unavailable)?;
            Ok::<CareerVm, ViewError>(map_career(&career))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "My Stats" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(vm) => rsx! {
                    if vm.is_empty {
                        p { "No adventures played yet. Pick one to get started!" }
                    } else {
                        CareerSummary { vm }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button { class: "button", onclick: move |_| resource.restart(), "Retry" }
                },
            }
        }
    }
}

#[component]
fn CareerSummary(vm: CareerVm) -> Element {
    rsx! {
        div { class: "stat-tiles",
            div { class: "stat-tile", "{vm.sessions_label}" }
            div { class: "stat-tile", "{vm.points_label}" }
            div { class: "stat-tile", "{vm.accuracy_label}" }
            div { class: "stat-tile", "{vm.best_streak_label}" }
            div { class: "stat-tile", "Played {vm.time_label}" }
        }

        h3 { "Courses" }
        table { class: "course-table",
            thead {
                tr {
                    th { "Course" }
                    th { "Status" }
                    th { "Sessions" }
                    th { "Accuracy" }
                    th { "Best" }
                }
            }
            tbody {
                for row in vm.courses {
                    tr { key: "{row.title}",
                        td { "{row.title}" }
                        td { "{row.status}" }
                        td { "{row.sessions}" }
                        td { "{row.accuracy_label}" }
                        td { "{row.best_score}" }
                    }
                }
            }
        }

        h3 { "Recent sessions" }
        ul { class: "recent-list",
            for (index, session) in vm.recent.into_iter().enumerate() {
                li { key: "{index}",
                    span { class: "recent-title", "{session.title}" }
                    span { " · {session.points} pts · {session.result_label}" }
                    span { class: "muted", " {session.played_at}" }
                }
            }
        }
    }
}
