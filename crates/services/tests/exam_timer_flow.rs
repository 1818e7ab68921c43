use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use exam_core::model::{
    AnswerSubmission, ChoiceId, EXAM_TIME_EXPIRED, ExamId, QuestionId, SaveAnswerResponse,
};
use page::dom::TIMEOUT_NOTICE;
use page::{DocumentSnapshot, ExamDocument, InMemoryDocument};
use reqwest::StatusCode;
use services::{ExamClientError, ExamGateway, ExamTimer, SaveOutcome};
use tokio::time::sleep;

#[derive(Debug, Clone, PartialEq)]
struct SaveCall {
    exam_id: ExamId,
    submission: AnswerSubmission,
    csrf_token: Option<String>,
}

/// Replies with a fixed response, or fails at the transport level when `None`.
struct StubGateway {
    reply: Option<SaveAnswerResponse>,
    calls: Mutex<Vec<SaveCall>>,
}

impl StubGateway {
    fn replying(reply: SaveAnswerResponse) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn offline() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<SaveCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExamGateway for StubGateway {
    async fn save_answer(
        &self,
        exam_id: ExamId,
        submission: &AnswerSubmission,
        csrf_token: Option<&str>,
    ) -> Result<SaveAnswerResponse, ExamClientError> {
        self.calls.lock().unwrap().push(SaveCall {
            exam_id,
            submission: *submission,
            csrf_token: csrf_token.map(str::to_string),
        });
        self.reply
            .clone()
            .ok_or(ExamClientError::HttpStatus(StatusCode::SERVICE_UNAVAILABLE))
    }

    async fn submit_exam(
        &self,
        _exam_id: ExamId,
        _csrf_token: Option<&str>,
    ) -> Result<(), ExamClientError> {
        Ok(())
    }
}

fn document() -> InMemoryDocument {
    InMemoryDocument::new(DocumentSnapshot {
        csrf_token: Some("csrf-abc".to_string()),
        ..DocumentSnapshot::default()
    })
}

fn shown_time(doc: &InMemoryDocument) -> String {
    doc.snapshot().time_remaining.unwrap_or_default()
}

#[tokio::test(start_paused = true)]
async fn countdown_runs_down_and_submits_once() {
    let doc = document();
    let gateway = StubGateway::replying(SaveAnswerResponse::ok());
    let timer = ExamTimer::new(ExamId::new(1), 3, Arc::new(doc.clone()), gateway);

    timer.start();
    assert_eq!(shown_time(&doc), "00:03");
    assert!(timer.is_running());

    sleep(Duration::from_millis(1_500)).await;
    assert_eq!(shown_time(&doc), "00:02");
    assert_eq!(doc.snapshot().submit_count, 0);

    sleep(Duration::from_secs(3)).await;
    let snapshot = doc.snapshot();
    assert_eq!(shown_time(&doc), "00:00");
    assert_eq!(snapshot.submit_count, 1);
    assert_eq!(snapshot.alerts, vec![TIMEOUT_NOTICE.to_string()]);
    assert!(timer.is_finished());
    assert!(!timer.is_running());

    sleep(Duration::from_secs(30)).await;
    assert_eq!(doc.snapshot().submit_count, 1);
    assert_eq!(timer.remaining_seconds(), 0);
}

#[tokio::test(start_paused = true)]
async fn tier_escalates_while_ticking() {
    let doc = document();
    let timer = ExamTimer::new(
        ExamId::new(1),
        602,
        Arc::new(doc.clone()),
        StubGateway::replying(SaveAnswerResponse::ok()),
    );

    timer.start();
    assert_eq!(doc.snapshot().timer_class.as_deref(), Some("timer-display"));

    sleep(Duration::from_millis(2_500)).await;
    assert_eq!(shown_time(&doc), "10:00");
    assert_eq!(
        doc.snapshot().timer_class.as_deref(),
        Some("timer-display timer-warning")
    );

    sleep(Duration::from_secs(300)).await;
    assert_eq!(shown_time(&doc), "05:00");
    assert_eq!(
        doc.snapshot().timer_class.as_deref(),
        Some("timer-display timer-danger")
    );
    timer.stop();
}

#[tokio::test(start_paused = true)]
async fn expired_save_stops_tick_and_submits() {
    let doc = document();
    let gateway = StubGateway::replying(SaveAnswerResponse::failed(EXAM_TIME_EXPIRED));
    let timer = ExamTimer::new(ExamId::new(7), 900, Arc::new(doc.clone()), gateway.clone());
    timer.start();

    let outcome = timer
        .save_answer(QuestionId::new(2), ChoiceId::new(5))
        .await;
    assert_eq!(outcome, SaveOutcome::Expired);
    assert!(!outcome.is_saved());
    assert!(!timer.is_running());
    assert_eq!(timer.remaining_seconds(), 0);
    assert_eq!(doc.snapshot().submit_count, 1);

    // A second expired reply and later ticks do not submit again.
    let again = timer
        .save_answer(QuestionId::new(3), ChoiceId::new(6))
        .await;
    assert_eq!(again, SaveOutcome::Expired);
    sleep(Duration::from_secs(5)).await;
    assert_eq!(doc.snapshot().submit_count, 1);
    assert_eq!(shown_time(&doc), "00:00");

    let calls = gateway.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].exam_id, ExamId::new(7));
    assert_eq!(
        calls[0].submission,
        AnswerSubmission::select(QuestionId::new(2), ChoiceId::new(5))
    );
    assert_eq!(calls[0].csrf_token.as_deref(), Some("csrf-abc"));
}

#[tokio::test]
async fn plain_rejection_is_reported_but_not_escalated() {
    let doc = document();
    let timer = ExamTimer::new(
        ExamId::new(1),
        120,
        Arc::new(doc.clone()),
        StubGateway::replying(SaveAnswerResponse {
            success: false,
            error: None,
        }),
    );

    let outcome = timer
        .save_answer(QuestionId::new(1), ChoiceId::new(1))
        .await;
    assert_eq!(outcome, SaveOutcome::Rejected { reason: None });
    assert!(!outcome.is_saved());
    assert!(!timer.is_finished());
    assert_eq!(doc.snapshot().submit_count, 0);

    let timer = ExamTimer::new(
        ExamId::new(1),
        120,
        Arc::new(doc.clone()),
        StubGateway::replying(SaveAnswerResponse::failed("No active attempt found")),
    );
    let outcome = timer
        .save_answer(QuestionId::new(1), ChoiceId::new(1))
        .await;
    assert_eq!(
        outcome,
        SaveOutcome::Rejected {
            reason: Some("No active attempt found".to_string())
        }
    );
    assert_eq!(doc.snapshot().submit_count, 0);
}

#[tokio::test]
async fn successful_and_failed_transport_saves() {
    let doc = document();
    let ok = ExamTimer::new(
        ExamId::new(1),
        120,
        Arc::new(doc.clone()),
        StubGateway::replying(SaveAnswerResponse::ok()),
    );
    assert!(ok.save_answer(QuestionId::new(1), ChoiceId::new(2)).await.is_saved());

    let offline = ExamTimer::new(ExamId::new(1), 120, Arc::new(doc.clone()), StubGateway::offline());
    let outcome = offline.save_answer(QuestionId::new(1), ChoiceId::new(2)).await;
    assert_eq!(outcome, SaveOutcome::TransportFailed);
    assert!(!offline.is_finished());
}

#[tokio::test]
async fn clear_answer_sends_null_choice() {
    let gateway = StubGateway::replying(SaveAnswerResponse::ok());
    let timer = ExamTimer::new(ExamId::new(1), 60, Arc::new(document()), gateway.clone());

    assert!(timer.clear_answer(QuestionId::new(4)).await.is_saved());
    assert_eq!(
        gateway.calls()[0].submission,
        AnswerSubmission::clear(QuestionId::new(4))
    );
}

#[tokio::test(start_paused = true)]
async fn stop_and_drop_end_the_tick_without_submitting() {
    let doc = document();
    let timer = ExamTimer::new(
        ExamId::new(1),
        10,
        Arc::new(doc.clone()),
        StubGateway::replying(SaveAnswerResponse::ok()),
    );
    timer.start();
    sleep(Duration::from_millis(1_500)).await;
    timer.stop();
    assert!(!timer.is_running());
    assert!(timer.is_finished());
    sleep(Duration::from_secs(20)).await;
    assert_eq!(shown_time(&doc), "00:09");
    assert_eq!(doc.snapshot().submit_count, 0);

    // No pause/resume: starting again after a stop only re-renders.
    timer.start();
    assert!(!timer.is_running());
    sleep(Duration::from_secs(3)).await;
    assert_eq!(shown_time(&doc), "00:09");
    assert_eq!(timer.remaining_seconds(), 9);

    let doc = document();
    let timer = ExamTimer::new(
        ExamId::new(1),
        10,
        Arc::new(doc.clone()),
        StubGateway::replying(SaveAnswerResponse::ok()),
    );
    timer.start();
    drop(timer);
    sleep(Duration::from_secs(20)).await;
    assert_eq!(shown_time(&doc), "00:10");
    assert_eq!(doc.snapshot().submit_count, 0);
}

#[tokio::test]
async fn expired_reply_after_stop_does_not_submit() {
    let doc = document();
    let timer = ExamTimer::new(
        ExamId::new(4),
        600,
        Arc::new(doc.clone()),
        StubGateway::replying(SaveAnswerResponse::failed(EXAM_TIME_EXPIRED)),
    );
    timer.start();
    assert!(doc.submit_final_form());
    timer.stop();

    let outcome = timer
        .save_answer(QuestionId::new(1), ChoiceId::new(2))
        .await;
    assert_eq!(outcome, SaveOutcome::Expired);
    let snapshot = doc.snapshot();
    assert_eq!(snapshot.submit_count, 1);
    assert!(snapshot.alerts.is_empty());
}

#[tokio::test(start_paused = true)]
async fn zero_remaining_submits_on_first_tick() {
    let doc = document();
    let timer = ExamTimer::new(
        ExamId::new(1),
        0,
        Arc::new(doc.clone()),
        StubGateway::replying(SaveAnswerResponse::ok()),
    );
    timer.start();
    assert_eq!(shown_time(&doc), "00:00");
    assert_eq!(doc.snapshot().submit_count, 0);

    sleep(Duration::from_millis(1_500)).await;
    assert_eq!(doc.snapshot().submit_count, 1);
}
