use dioxus::prelude::*;
use exam_core::model::{ChoiceId, QuestionId};
use page::{ChoiceOption, DocumentSnapshot, NavButton, QuestionPanel};

use super::{ConfirmSubmit, ExamView};

#[component]
fn ExamHarness(snapshot: DocumentSnapshot) -> Element {
    rsx! {
        ExamView {
            snapshot,
            on_select: move |_| {},
            on_submit: move |_| {},
        }
    }
}

fn render(snapshot: DocumentSnapshot) -> String {
    let mut dom = VirtualDom::new_with_props(ExamHarness, ExamHarnessProps { snapshot });
    dom.rebuild_in_place();
    dioxus_ssr::render(&dom)
}

fn sample() -> DocumentSnapshot {
    let mut picked = ChoiceOption::new(ChoiceId::new(21), "Paris");
    picked.selected = true;
    picked.checked = true;
    DocumentSnapshot {
        title: "Geography".to_string(),
        time_remaining: Some("04:59".to_string()),
        timer_class: Some("timer-display timer-danger".to_string()),
        question: Some(QuestionPanel {
            question_id: QuestionId::new(2),
            number: 2,
            text: "Capital of France?".to_string(),
        }),
        choices: vec![ChoiceOption::new(ChoiceId::new(20), "Lyon"), picked],
        nav: vec![
            NavButton {
                question_id: QuestionId::new(1),
                number: 1,
                answered: true,
                current: false,
            },
            NavButton {
                question_id: QuestionId::new(2),
                number: 2,
                answered: true,
                current: true,
            },
        ],
        progress_bar_width: Some("100%".to_string()),
        progress_text: Some("2 of 2 answered".to_string()),
        ..DocumentSnapshot::default()
    }
}

#[test]
fn renders_timer_with_tier_class() {
    let html = render(sample());
    assert!(html.contains("id=\"time-remaining\""), "missing display in {html}");
    assert!(html.contains("04:59"), "missing time in {html}");
    assert!(html.contains("timer-display timer-danger"), "missing tier in {html}");
}

#[test]
fn renders_choices_and_navigator_classes() {
    let html = render(sample());
    assert!(html.contains("choice-option selected"), "missing selection in {html}");
    assert!(html.contains("Capital of France?"), "missing question in {html}");
    assert!(
        html.contains("question-num-btn answered current"),
        "missing current button in {html}"
    );
}

#[test]
fn renders_progress_and_submit_form() {
    let html = render(sample());
    assert!(html.contains("2 of 2 answered"), "missing progress text in {html}");
    assert!(html.contains("width: 100%"), "missing bar width in {html}");
    assert!(html.contains("final-submit-form"), "missing form in {html}");
    assert!(html.contains("Submit Exam"), "missing submit label in {html}");
}

#[test]
fn absent_elements_are_not_rendered() {
    let html = render(DocumentSnapshot {
        time_remaining: None,
        timer_class: None,
        progress_text: None,
        has_final_form: false,
        ..sample()
    });
    assert!(!html.contains("time-remaining"), "unexpected display in {html}");
    assert!(!html.contains("progress-text"), "unexpected text node in {html}");
    assert!(!html.contains("final-submit-form"), "unexpected form in {html}");
}

#[test]
fn submitted_page_shows_notice() {
    let html = render(DocumentSnapshot {
        alerts: vec!["Time is up! Your exam will be submitted automatically.".to_string()],
        submit_count: 1,
        ..sample()
    });
    assert!(html.contains("Time is up!"), "missing notice in {html}");
    assert!(html.contains("Submitted"), "missing submitted label in {html}");
}

#[test]
fn confirm_dialog_renders_prompt() {
    #[allow(non_snake_case)]
    fn Harness() -> Element {
        rsx! {
            ConfirmSubmit { on_confirm: move |_| {}, on_cancel: move |_| {} }
        }
    }
    let mut dom = VirtualDom::new(Harness);
    dom.rebuild_in_place();
    let html = dioxus_ssr::render(&dom);
    assert!(html.contains("You cannot make changes after submission."), "{html}");
}
