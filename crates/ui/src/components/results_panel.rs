use dioxus::prelude::*;

use crate::vm::ResultVm;

/// Score header plus per-question breakdown of a finished test.
#[component]
pub fn ResultsPanel(result: ResultVm) -> Element {
    rsx! {
        section { class: "results", aria_label: "Test results",
            header { class: "results-header",
                strong { class: "results-score", "{result.score_label}" }
                h3 { class: "results-headline", "{result.headline}" }
                p { class: "results-summary", "{result.summary_label}" }
                if let Some(skipped) = result.skipped_label.as_ref() {
                    p { class: "results-skipped", "{skipped}" }
                }
                if let Some(duration) = result.duration_label.as_ref() {
                    p { class: "results-duration", "{duration}" }
                }
            }
            table { class: "results-breakdown",
                thead {
                    tr {
                        th { "#" }
                        th { "Question" }
                        th { "Your answer" }
                        th { "Correct answer" }
                        th { "Result" }
                    }
                }
                tbody {
                    for row in result.rows {
                        tr { key: "{row.flashcard_id}", class: "{row.verdict_class}",
                            td { "{row.number}" }
                            td { "{row.question}" }
                            td { "{row.user_answer}" }
                            td { "{row.correct_answer}" }
                            td {
                                "{row.verdict_label}"
                                if let Some(feedback) = row.feedback.as_ref() {
                                    small { class: "results-feedback", "{feedback}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
