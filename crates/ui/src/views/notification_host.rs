use std::time::Duration;

use dioxus::prelude::*;
use quest_core::notify::{Dismissal, NotificationId};
use services::NotificationCenter;
use tracing::warn;

use crate::context::AppContext;

const POLL_INTERVAL_MS: u64 = 100;

fn dismiss(center: &NotificationCenter, id: NotificationId, how: Dismissal) {
    if let Err(err) = center.dismiss(id, how) {
        warn!(%id, error = %err, "stale notification dismissal");
    }
}

/// Renders the active modal and toasts; while mounted, requests are routed
/// here instead of the blocking fallback.
#[component]
pub fn NotificationHost() -> Element {
    let ctx = use_context::<AppContext>();
    let center = ctx.notifications();

    use_hook({
        let center = center.clone();
        move || center.attach_host()
    });
    use_drop({
        let center = center.clone();
        move || center.detach_host()
    });

    let mut snapshot = use_signal({
        let center = center.clone();
        move || center.snapshot()
    });

    use_future({
        let center = center.clone();
        move || {
            let mut rx = center.subscribe();
            async move {
                while rx.changed().await.is_ok() {
                    let next = rx.borrow_and_update().clone();
                    snapshot.set(next);
                }
            }
        }
    });

    use_future({
        let center = center.clone();
        move || {
            let center = center.clone();
            async move {
                let mut interval = tokio::time::interval(Duration::from_millis(POLL_INTERVAL_MS));
                loop {
                    interval.tick().await;
                    center.poll();
                }
            }
        }
    });

    let current = snapshot();

    rsx! {
        div { class: "toasts",
            for toast in current.toasts {
                div {
                    key: "{toast.id}",
                    class: "toast toast--{toast.request.kind.as_str()}",
                    onclick: {
                        let center = center.clone();
                        move |_| dismiss(&center, toast.id, Dismissal::Button(0))
                    },
                    "{toast.request.message}"
                }
            }
        }

        if let Some(active) = current.active {
            div {
                class: "modal-backdrop",
                onclick: {
                    let center = center.clone();
                    move |_| dismiss(&center, active.id, Dismissal::Backdrop)
                },
                div {
                    class: "modal modal--{active.request.kind.as_str()}",
                    role: "dialog",
                    tabindex: 0,
                    autofocus: true,
                    onclick: move |evt: MouseEvent| evt.stop_propagation(),
                    onkeydown: {
                        let center = center.clone();
                        move |evt: KeyboardEvent| {
                            if evt.key() == Key::Escape {
                                dismiss(&center, active.id, Dismissal::Escape);
                            }
                        }
                    },
                    if let Some(title) = &active.request.title {
                        h3 { "{title}" }
                    }
                    p { "{active.request.message}" }
                    div { class: "modal-buttons",
                        for (index, action) in active.request.buttons.iter().enumerate() {
                            button {
                                key: "{index}",
                                class: "button",
                                onclick: {
                                    let center = center.clone();
                                    move |_| dismiss(&center, active.id, Dismissal::Button(index))
                                },
                                "{action.label}"
                            }
                        }
                    }
                }
            }
        }
    }
}
