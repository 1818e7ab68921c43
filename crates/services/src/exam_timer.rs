use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use exam_core::model::{AnswerSubmission, ChoiceId, ExamId, QuestionId};
use exam_core::{Countdown, TickOutcome};
use page::ExamDocument;
use page::dom::TIMEOUT_NOTICE;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, error, info, warn};

use crate::exam_client::ExamGateway;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Result of one save-answer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// The server answered `success: false` for a reason other than expiry.
    Rejected { reason: Option<String> },
    /// The server reported the attempt deadline has passed.
    Expired,
    /// Network, HTTP status or decoding failure.
    TransportFailed,
}

impl SaveOutcome {
    #[must_use]
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// Countdown and answer auto-save for a single exam page.
///
/// Construct it once per page load, call [`ExamTimer::start`], and drop it (or
/// call [`ExamTimer::stop`]) when leaving the page.
pub struct ExamTimer {
    exam_id: ExamId,
    countdown: Mutex<Countdown>,
    document: Arc<dyn ExamDocument>,
    gateway: Arc<dyn ExamGateway>,
    csrf_token: Option<String>,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

impl ExamTimer {
    #[must_use]
    pub fn new(
        exam_id: ExamId,
        remaining_secs: u64,
        document: Arc<dyn ExamDocument>,
        gateway: Arc<dyn ExamGateway>,
    ) -> Arc<Self> {
        let csrf_token = document.csrf_token();
        Arc::new(Self {
            exam_id,
            countdown: Mutex::new(Countdown::new(remaining_secs)),
            document,
            gateway,
            csrf_token,
            ticker: Mutex::new(None),
        })
    }

    fn countdown(&self) -> MutexGuard<'_, Countdown> {
        self.countdown.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ticker(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.ticker.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn exam_id(&self) -> ExamId {
        self.exam_id
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> u64 {
        self.countdown().remaining()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.countdown().is_finished()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.ticker()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Renders the current time and spawns the one-second tick.
    ///
    /// Must be called from within a Tokio runtime. Calling it again while the
    /// tick is alive, or after the timer was stopped or concluded, only
    /// re-renders.
    pub fn start(self: &Arc<Self>) {
        self.render();
        if self.is_finished() {
            return;
        }
        let mut slot = self.ticker();
        if slot.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return;
        }

        let weak = Arc::downgrade(self);
        *slot = Some(tokio::spawn(run_ticks(weak)));
        info!(exam_id = %self.exam_id, remaining = self.remaining_seconds(), "exam timer started");
    }

    /// Ends the countdown without submitting anything.
    ///
    /// Terminal: the timer cannot be started again and a later expiry
    /// report from the server no longer forces a submission.
    pub fn stop(&self) {
        if self.countdown().finish() {
            debug!(exam_id = %self.exam_id, "exam timer stopped");
        }
        if let Some(handle) = self.ticker().take() {
            handle.abort();
        }
    }

    /// Advances the countdown by one period.
    pub fn tick(&self) -> TickOutcome {
        let outcome = self.countdown().tick();
        match outcome {
            TickOutcome::Running(_) => self.render(),
            TickOutcome::Expired => self.conclude(),
            TickOutcome::Stopped => {}
        }
        outcome
    }

    /// Writes the formatted time and severity tier into the page.
    pub fn render(&self) {
        let (text, tier) = {
            let countdown = self.countdown();
            (countdown.display(), countdown.tier())
        };
        self.document.set_time_remaining(&text);
        self.document.set_timer_tier(tier);
    }

    /// Ends the exam from outside the tick. Does nothing if it already ended.
    pub fn on_timeout(&self) {
        if self.countdown().expire() {
            self.render();
            self.conclude();
        }
    }

    fn conclude(&self) {
        self.stop();
        info!(exam_id = %self.exam_id, "exam time is up, submitting");
        self.document.alert(TIMEOUT_NOTICE);
        if !self.document.submit_final_form() {
            warn!(exam_id = %self.exam_id, "final submit form missing; nothing submitted");
        }
    }

    /// Sends the chosen answer to the server.
    pub async fn save_answer(&self, question_id: QuestionId, choice_id: ChoiceId) -> SaveOutcome {
        self.send(AnswerSubmission::select(question_id, choice_id))
            .await
    }

    /// Clears the stored answer for a question.
    pub async fn clear_answer(&self, question_id: QuestionId) -> SaveOutcome {
        self.send(AnswerSubmission::clear(question_id)).await
    }

    async fn send(&self, submission: AnswerSubmission) -> SaveOutcome {
        let response = self
            .gateway
            .save_answer(self.exam_id, &submission, self.csrf_token.as_deref())
            .await;

        match response {
            Ok(body) if body.success => {
                debug!(question_id = %submission.question_id, "answer saved");
                SaveOutcome::Saved
            }
            Ok(body) if body.is_time_expired() => {
                error!(question_id = %submission.question_id, "failed to save answer: exam time expired");
                self.on_timeout();
                SaveOutcome::Expired
            }
            Ok(body) => {
                error!(
                    question_id = %submission.question_id,
                    reason = body.error.as_deref().unwrap_or("unknown"),
                    "failed to save answer"
                );
                SaveOutcome::Rejected { reason: body.error }
            }
            Err(err) => {
                error!(question_id = %submission.question_id, error = %err, "error saving answer");
                SaveOutcome::TransportFailed
            }
        }
    }
}

impl Drop for ExamTimer {
    fn drop(&mut self) {
        let slot = self
            .ticker
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = slot.take() {
            handle.abort();
        }
    }
}

async fn run_ticks(weak: Weak<ExamTimer>) {
    let mut ticks = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticks.tick().await;
        let Some(timer) = weak.upgrade() else {
            break;
        };
        match timer.tick() {
            TickOutcome::Running(_) => {}
            TickOutcome::Expired | TickOutcome::Stopped => break,
        }
    }
}
