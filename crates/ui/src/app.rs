use std::time::Duration;

use dioxus::prelude::*;
use exam_core::model::ChoiceId;

use crate::context::ExamContext;
use crate::views::{ConfirmSubmit, ExamView};

const EXAM_CSS: &str = include_str!("../assets/exam.css");

/// How often the view re-reads the shared document written by the timer task.
const REFRESH_PERIOD: Duration = Duration::from_millis(200);

#[component]
pub fn App() -> Element {
    let ctx = use_context::<ExamContext>();
    let mut snapshot = use_signal(|| ctx.snapshot());
    let mut confirming = use_signal(|| false);

    let poll_ctx = ctx.clone();
    use_future(move || {
        let ctx = poll_ctx.clone();
        async move {
            loop {
                tokio::time::sleep(REFRESH_PERIOD).await;
                let next = ctx.snapshot();
                if *snapshot.peek() != next {
                    snapshot.set(next);
                }
            }
        }
    });

    let select_ctx = ctx.clone();
    let on_select = move |choice_id: ChoiceId| {
        // The save runs in the background; its outcome only matters on expiry.
        let _ = select_ctx.page().select_choice(choice_id);
        snapshot.set(select_ctx.snapshot());
    };

    let submit_ctx = ctx.clone();
    let on_confirm = move |()| {
        confirming.set(false);
        submit_ctx.page().submit_confirmed();
        snapshot.set(submit_ctx.snapshot());
    };

    rsx! {
        document::Title { "Exam" }
        style { "{EXAM_CSS}" }

        ExamView {
            snapshot: snapshot(),
            on_select,
            on_submit: move |()| confirming.set(true),
        }
        if confirming() {
            ConfirmSubmit {
                on_confirm,
                on_cancel: move |()| confirming.set(false),
            }
        }
    }
}
