use dioxus::prelude::*;

use crate::vm::AnswerInputKind;

fn choice_class(selected: bool) -> &'static str {
    if selected {
        "answer-choice selected"
    } else {
        "answer-choice"
    }
}

/// Blank input goes through "I don't know", never through Submit or Enter.
fn can_submit(value: &str, disabled: bool) -> bool {
    !disabled && !value.trim().is_empty()
}

/// Controlled answer box. `on_submit` receives the raw text to format.
#[component]
pub fn AnswerInput(
    kind: AnswerInputKind,
    value: String,
    disabled: bool,
    on_change: Callback<String>,
    on_submit: Callback<String>,
    on_dont_know: Callback<()>,
) -> Element {
    let submit_disabled = !can_submit(&value, disabled);
    let on_enter_value = value.clone();
    let on_click_value = value.clone();

    let field = match kind {
        AnswerInputKind::Text => rsx! {
            input {
                id: "answer-text",
                class: "answer-text",
                r#type: "text",
                placeholder: "Type your answer",
                value: "{value}",
                disabled: disabled,
                oninput: move |evt| on_change.call(evt.value()),
                onkeydown: move |evt| {
                    if evt.data.key() == Key::Enter {
                        evt.prevent_default();
                        if can_submit(&on_enter_value, disabled) {
                            on_submit.call(on_enter_value.clone());
                        }
                    }
                },
            }
        },
        AnswerInputKind::Code { lang } => {
            let lang = lang.unwrap_or_default();
            rsx! {
                textarea {
                    id: "answer-code",
                    class: "answer-code",
                    "data-lang": "{lang}",
                    spellcheck: "false",
                    rows: "8",
                    value: "{value}",
                    disabled: disabled,
                    oninput: move |evt| on_change.call(evt.value()),
                }
            }
        }
        AnswerInputKind::Choice { options } => {
            let choices: Vec<(String, &'static str)> = options
                .into_iter()
                .map(|option| {
                    let class = choice_class(option == value);
                    (option, class)
                })
                .collect();
            rsx! {
                div { class: "answer-choices", role: "radiogroup",
                    for (option, class) in choices {
                        button {
                            key: "{option}",
                            class: "{class}",
                            r#type: "button",
                            disabled: disabled,
                            onclick: {
                                let option = option.clone();
                                move |_| on_change.call(option.clone())
                            },
                            "{option}"
                        }
                    }
                }
            }
        }
        AnswerInputKind::TrueFalse => {
            let choices = [("True", "true"), ("False", "false")]
                .map(|(label, raw)| (label, raw, choice_class(value == raw)));
            rsx! {
                div { class: "answer-choices", role: "radiogroup",
                    for (label, raw, class) in choices {
                        button {
                            key: "{raw}",
                            class: "{class}",
                            r#type: "button",
                            disabled: disabled,
                            onclick: move |_| on_change.call(raw.to_string()),
                            "{label}"
                        }
                    }
                }
            }
        }
    };

    rsx! {
        div { class: "answer-input",
            {field}
            div { class: "answer-actions",
                button {
                    id: "answer-submit",
                    class: "primary",
                    r#type: "button",
                    disabled: submit_disabled,
                    onclick: move |_| on_submit.call(on_click_value.clone()),
                    "Submit"
                }
                button {
                    id: "answer-dont-know",
                    r#type: "button",
                    disabled: disabled,
                    onclick: move |_| on_dont_know.call(()),
                    "I don't know"
                }
            }
        }
    }
}
