use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use quest_core::model::CourseId;
use quest_core::timer::TimerEvent;
use services::{AnswerOutcome, QuizReport, QuizRun};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;
use crate::views::components::{ComboMeter, TimerBadge};
use crate::vm::{combo_message, map_combo, map_feedback, map_question, map_result, map_timer};

#[component]
pub fn QuizView(course_id: String, chapter: usize) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();

    let mut run = use_signal({
        let quiz = ctx.quiz();
        let course_id = course_id.clone();
        move || quiz.start(&CourseId::new(course_id), chapter).ok()
    });
    let mut last_outcome = use_signal(|| None::<AnswerOutcome>);
    let mut report = use_signal(|| None::<Result<QuizReport, ViewError>>);
    let mut saving = use_signal(|| false);

    let finish = use_callback({
        let ctx = ctx.clone();
        move |()| {
            if saving() || report.peek().is_some() {
                return;
            }
            let Some(mut finished) = run.write().take() else {
                return;
            };
            saving.set(true);
            let quiz = ctx.quiz();
            let student = ctx.student().clone();
            let name = ctx.player_name();
            spawn(async move {
                let result = quiz.complete(&mut finished, &student, &name).await;
                run.set(Some(finished));
                saving.set(false);
                report.set(Some(result.map_err(|_| ViewError::Unavailable)));
            });
        }
    });

    // Suspension is a phase check inside the run, so the interval keeps going.
    use_future(move || async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        interval.tick().await;
        loop {
            interval.tick().await;
            if report.peek().is_some() {
                break;
            }
            let event = run.write().as_mut().and_then(QuizRun::tick);
            if event == Some(TimerEvent::Expired) {
                finish.call(());
            }
        }
    });

    let on_answer = use_callback({
        let notifications = ctx.notifications();
        move |choice: usize| {
            let outcome = match run.write().as_mut().map(|r| r.answer(choice)) {
                Some(Ok(outcome)) => outcome,
                _ => return,
            };
            if let Some(message) = combo_message(&outcome.combo) {
                // Toasts expire on their own; nothing waits on the result.
                let toast = if outcome.combo.milestone.is_some() {
                    notifications.success(message)
                } else {
                    notifications.warning(message)
                };
                drop(toast);
            }
            let finished = outcome.finished;
            last_outcome.set(Some(outcome));
            if finished {
                finish.call(());
            }
        }
    });

    let toggle_pause = move |_: MouseEvent| {
        if let Some(active) = run.write().as_mut() {
            if !active.pause() {
                active.resume();
            }
        }
    };

    let quit = use_callback({
        let notifications = ctx.notifications();
        move |()| {
            let notifications = notifications.clone();
            spawn(async move {
                let was_running = run.write().as_mut().is_some_and(QuizRun::pause);
                let leave = notifications
                    .confirm("Leave this challenge? Your progress will be lost.")
                    .await;
                if leave {
                    navigator.push(Route::Home {});
                } else if was_running {
                    if let Some(active) = run.write().as_mut() {
                        active.resume();
                    }
                }
            });
        }
    });

    if let Some(result) = report() {
        return match result {
            Ok(report) => {
                let vm = map_result(&report);
                rsx! {
                    div { class: "page quiz-result",
                        h2 { "{vm.headline}" }
                        p { class: "score", "{vm.score_label}" }
                        p { "{vm.answers_label}" }
                        p { "{vm.streak_label}" }
                        p { class: "muted", "{vm.leaderboard_label}" }
                        div { class: "actions",
                            Link { class: "button primary", to: Route::Career {}, "See my stats" }
                            Link { class: "button", to: Route::Leaderboard {}, "Leaderboard" }
                            Link { class: "button", to: Route::Home {}, "More adventures" }
                        }
                    }
                }
            }
            Err(err) => rsx! {
                div { class: "page quiz-result",
                    p { "{err.message()}" }
                    Link { class: "button", to: Route::Home {}, "Back to adventures" }
                }
            },
        };
    }

    if saving() {
        return rsx! {
            div { class: "page", p { "Saving your score..." } }
        };
    }

    let screen = run.read().as_ref().map(|active| {
        (
            active.chapter_title().to_string(),
            map_timer(&active.timer()),
            map_combo(active.combo(), last_outcome.read().as_ref().map(|o| &o.combo)),
            map_question(active),
            active.points(),
        )
    });
    let Some((chapter_title, timer, combo, question, points)) = screen else {
        return rsx! {
            div { class: "page",
                p { "{ViewError::NotFound.message()}" }
                Link { to: Route::Home {}, "Back to adventures" }
            }
        };
    };
    let feedback = last_outcome.read().as_ref().map(map_feedback);
    let pause_label = if timer.paused { "Resume" } else { "Pause" };

    rsx! {
        div { class: "page quiz",
            header { class: "quiz-header",
                h2 { "{chapter_title}" }
                TimerBadge { timer: timer.clone() }
                ComboMeter { combo }
                span { class: "quiz-points", "{points} pts" }
            }

            if let Some(question) = question {
                section { class: "question",
                    p { class: "muted", "{question.progress_label}" }
                    h3 { "{question.prompt}" }
                    div { class: "choices",
                        for (index, choice) in question.choices.iter().enumerate() {
                            button {
                                key: "{index}",
                                class: "choice",
                                disabled: timer.paused,
                                onclick: move |_| on_answer.call(index),
                                "{choice}"
                            }
                        }
                    }
                }
            }

            if let Some(feedback) = feedback {
                div { class: "{feedback.class}",
                    strong { "{feedback.headline}" }
                    span { class: "feedback-time", " {feedback.time_label}" }
                    if let Some(explanation) = &feedback.explanation {
                        p { "{explanation}" }
                    }
                }
            }

            div { class: "actions",
                button { class: "button", onclick: toggle_pause, "{pause_label}" }
                button { class: "button", onclick: move |_| quit.call(()), "Quit" }
            }
        }
    }
}
