use dioxus::prelude::*;

use exam_core::model::ChoiceId;
use page::dom::{
    ANSWERED_CLASS, CHOICE_OPTION_CLASS, CSRF_FIELD, CURRENT_CLASS, FINAL_SUBMIT_FORM_ID,
    NAV_BUTTON_CLASS, PROGRESS_BAR_ID, PROGRESS_TEXT_ID, SELECTED_CLASS, SUBMIT_CONFIRMATION,
    SUBMIT_FIELD, TIME_REMAINING_ID, TIMER_ID,
};
use page::{ChoiceOption, DocumentSnapshot, NavButton};

fn choice_class(choice: &ChoiceOption) -> String {
    if choice.selected {
        format!("{CHOICE_OPTION_CLASS} {SELECTED_CLASS}")
    } else {
        CHOICE_OPTION_CLASS.to_string()
    }
}

fn nav_class(button: &NavButton) -> String {
    let mut class = NAV_BUTTON_CLASS.to_string();
    if button.answered {
        class.push(' ');
        class.push_str(ANSWERED_CLASS);
    }
    if button.current {
        class.push(' ');
        class.push_str(CURRENT_CLASS);
    }
    class
}

/// Renders the exam page following the template's element ids and classes.
#[component]
pub fn ExamView(
    snapshot: DocumentSnapshot,
    on_select: EventHandler<ChoiceId>,
    on_submit: EventHandler<()>,
) -> Element {
    let submitted = snapshot.is_submitted();
    let notice = snapshot.alerts.last().cloned();
    let question_heading = snapshot
        .question
        .as_ref()
        .map(|q| format!("Question {}: {}", q.number, q.text));
    let csrf_token = snapshot.csrf_token.clone().unwrap_or_default();

    rsx! {
        div { class: "exam-page",
            header { class: "exam-header",
                h1 { class: "exam-title", "{snapshot.title}" }
                if let Some(timer_class) = snapshot.timer_class.clone() {
                    div { class: "{timer_class}", id: TIMER_ID,
                        if let Some(text) = snapshot.time_remaining.clone() {
                            span { id: TIME_REMAINING_ID, "{text}" }
                        }
                    }
                }
            }

            if let Some(message) = notice {
                div { class: "exam-notice", "{message}" }
            }

            div { class: "progress",
                if let Some(width) = snapshot.progress_bar_width.clone() {
                    div { class: "progress-bar", id: PROGRESS_BAR_ID, style: "width: {width}" }
                }
            }
            if let Some(text) = snapshot.progress_text.clone() {
                p { id: PROGRESS_TEXT_ID, "{text}" }
            }

            nav { class: "question-nav",
                for item in snapshot.nav.iter() {
                    span { key: "{item.question_id}", class: "{nav_class(item)}", "{item.number}" }
                }
            }

            section { class: "question",
                if let Some(heading) = question_heading {
                    h2 { class: "question-text", "{heading}" }
                }
                for choice in snapshot.choices.iter().cloned() {
                    ChoiceRow {
                        key: "{choice.choice_id}",
                        choice,
                        disabled: submitted,
                        on_select,
                    }
                }
            }

            if snapshot.has_final_form {
                form { id: FINAL_SUBMIT_FORM_ID, method: "post",
                    input { r#type: "hidden", name: CSRF_FIELD, value: "{csrf_token}" }
                    input { r#type: "hidden", name: SUBMIT_FIELD, value: "1" }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: submitted,
                        onclick: move |_| on_submit.call(()),
                        if submitted { "Submitted" } else { "Submit Exam" }
                    }
                }
            }
        }
    }
}

#[component]
fn ChoiceRow(choice: ChoiceOption, disabled: bool, on_select: EventHandler<ChoiceId>) -> Element {
    let class = choice_class(&choice);
    let choice_id = choice.choice_id;
    rsx! {
        label {
            class: "{class}",
            onclick: move |_| {
                if !disabled {
                    on_select.call(choice_id);
                }
            },
            input {
                r#type: "radio",
                name: "choice",
                value: "{choice_id}",
                checked: choice.checked,
                disabled: disabled,
            }
            span { class: "choice-label", "{choice.label}" }
        }
    }
}

/// Modal asking the user to confirm the final submission.
#[component]
pub fn ConfirmSubmit(on_confirm: EventHandler<()>, on_cancel: EventHandler<()>) -> Element {
    rsx! {
        div { class: "exam-confirm",
            div { class: "exam-confirm__dialog",
                p { "{SUBMIT_CONFIRMATION}" }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| on_confirm.call(()),
                    "Submit"
                }
            }
        }
    }
}
