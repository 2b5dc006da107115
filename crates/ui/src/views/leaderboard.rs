use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{LeaderboardVm, map_leaderboard};

const LEADERBOARD_SIZE: u32 = 10;

#[component]
pub fn LeaderboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let leaderboard = ctx.leaderboard();

    let mut resource = use_resource(move || {
        let leaderboard = leaderboard.clone();
        async move {
            let snapshot = leaderboard
                .top(LEADERBOARD_SIZE)
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok::<LeaderboardVm, ViewError>(map_leaderboard(&snapshot))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Leaderboard" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(vm) => rsx! {
                    if let Some(notice) = vm.offline_notice {
                        p { class: "notice", "{notice}" }
                    }
                    if vm.rows.is_empty() {
                        p { "No scores yet. Be the first!" }
                    } else {
                        ol { class: "leaderboard",
                            for row in vm.rows {
                                li { key: "{row.rank}",
                                    span { class: "rank", "#{row.rank}" }
                                    span { class: "player", "{row.player_name}" }
                                    span { class: "score", "{row.score}" }
                                    span { class: "muted", "{row.detail}" }
                                }
                            }
                        }
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
