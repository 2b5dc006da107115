use dioxus::prelude::*;
use dioxus_router::Link;
use quest_core::model::CourseId;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;

#[component]
pub fn StoryView(course_id: String, chapter: usize) -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();

    let found = catalog
        .get(&CourseId::new(course_id.clone()))
        .and_then(|course| Some((course.title().to_string(), course.chapter(chapter).ok()?.clone())));
    let Some((course_title, section)) = found else {
        return rsx! {
            div { class: "page",
                p { "{ViewError::NotFound.message()}" }
                Link { to: Route::Home {}, "Back to adventures" }
            }
        };
    };

    rsx! {
        div { class: "page story",
            p { class: "muted", "{course_title}" }
            h2 { "{section.title}" }
            for (index, paragraph) in section.story.iter().enumerate() {
                p { key: "{index}", class: "story-paragraph", "{paragraph}" }
            }
            div { class: "actions",
                Link {
                    class: "button primary",
                    to: Route::Quiz { course_id: course_id.clone(), chapter },
                    "Start the challenge"
                }
                Link { class: "button", to: Route::Home {}, "Back" }
            }
        }
    }
}
