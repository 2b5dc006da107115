use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{CareerView, CourseSelectView, LeaderboardView, NotificationHost, QuizView, StoryView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", CourseSelectView)] Home {},
        #[route("/course/:course_id/chapter/:chapter", StoryView)] Story { course_id: String, chapter: usize },
        #[route("/course/:course_id/chapter/:chapter/quiz", QuizView)] Quiz { course_id: String, chapter: usize },
        #[route("/career", CareerView)] Career {},
        #[route("/leaderboard", LeaderboardView)] Leaderboard {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
            NotificationHost {}
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Quiz Quest" }
            ul {
                li { Link { to: Route::Home {}, "Adventures" } }
                li { Link { to: Route::Career {}, "My Stats" } }
                li { Link { to: Route::Leaderboard {}, "Leaderboard" } }
            }
        }
    }
}
