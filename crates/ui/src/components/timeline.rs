use dioxus::prelude::*;

use crate::vm::TimelineItemVm;

#[component]
pub fn Timeline(items: Vec<TimelineItemVm>, on_select: Callback<usize>) -> Element {
    rsx! {
        ol { class: "timeline", aria_label: "Flashcards",
            for item in items {
                TimelineButton { key: "{item.index}", item, on_select }
            }
        }
    }
}

#[component]
fn TimelineButton(item: TimelineItemVm, on_select: Callback<usize>) -> Element {
    let class = if item.is_current {
        format!("timeline-item {} current", item.status_class)
    } else {
        format!("timeline-item {}", item.status_class)
    };
    let index = item.index;
    let aria_current = if item.is_current { "step" } else { "false" };

    rsx! {
        li {
            button {
                class: "{class}",
                r#type: "button",
                aria_current: aria_current,
                disabled: !item.reachable || item.is_current,
                onclick: move |_| on_select.call(index),
                "{item.label}"
            }
        }
    }
}
