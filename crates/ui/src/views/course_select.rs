use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn CourseSelectView() -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();

    rsx! {
        div { class: "page",
            h2 { "Choose your adventure" }
            p { class: "muted", "Playing as {ctx.student()}" }
            div { class: "course-grid",
                for course in catalog.courses().iter().cloned() {
                    article { class: "course-card", key: "{course.id()}",
                        h3 { "{course.title()}" }
                        p { "{course.description()}" }
                        ol { class: "chapter-list",
                            for (index, chapter) in course.chapters().iter().enumerate() {
                                li { key: "{index}",
                                    Link {
                                        to: Route::Story {
                                            course_id: course.id().to_string(),
                                            chapter: index,
                                        },
                                        "{chapter.title}"
                                    }
                                    span { class: "muted", " ({chapter.questions.len()} questions)" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
