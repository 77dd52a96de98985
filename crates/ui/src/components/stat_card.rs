use dioxus::prelude::*;

use crate::vm::StatCardVm;

#[component]
pub fn StatCard(card: StatCardVm) -> Element {
    rsx! {
        div { class: "stat-card",
            span { class: "stat-label", "{card.label}" }
            strong { class: "stat-value", "{card.value}" }
            if let Some(hint) = card.hint {
                span { class: "stat-hint", "{hint}" }
            }
        }
    }
}
