use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quest_core::model::StudentId;
use quest_core::time::fixed_clock;
use services::AppServices;
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::{CareerView, CourseSelectView, LeaderboardView, QuizView, StoryView};

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    CourseSelect,
    Story { course_id: String, chapter: usize },
    Quiz { course_id: String, chapter: usize },
    Career,
    Leaderboard,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<AppServices>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    match use_context::<ViewKind>() {
        ViewKind::CourseSelect => rsx! { CourseSelectView {} },
        ViewKind::Story { course_id, chapter } => rsx! { StoryView { course_id, chapter } },
        ViewKind::Quiz { course_id, chapter } => rsx! { QuizView { course_id, chapter } },
        ViewKind::Career => rsx! { CareerView {} },
        ViewKind::Leaderboard => rsx! { LeaderboardView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub app: Arc<AppServices>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild and let pending resources resolve before rendering.
    pub async fn render_settled(&mut self) -> String {
        self.rebuild();
        for _ in 0..3 {
            self.drive_async().await;
        }
        self.render()
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_storage(view, &Storage::in_memory())
}

pub fn setup_view_harness_with_storage(view: ViewKind, storage: &Storage) -> ViewHarness {
    let app = Arc::new(
        AppServices::from_storage(storage, fixed_clock(), StudentId::new("ada"))
            .expect("build services"),
    );
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::clone(&app),
            view,
        },
    );
    ViewHarness { dom, app }
}
