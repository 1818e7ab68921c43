use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use exam_core::ExamProgress;
use exam_core::model::{ChoiceId, ExamId, QuestionId};
use page::ExamDocument;
use page::dom::{LEAVE_WARNING, SUBMIT_CONFIRMATION};
use services::{ExamGateway, ExamTimer, SaveOutcome};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Page-level state and event handlers for one loaded exam page.
///
/// Owns the countdown for its lifetime; dropping the page clears the tick.
pub struct ExamPage {
    document: Arc<dyn ExamDocument>,
    timer: Option<Arc<ExamTimer>>,
    current_question: Option<QuestionId>,
    submitted: AtomicBool,
}

impl ExamPage {
    #[must_use]
    pub fn new(
        document: Arc<dyn ExamDocument>,
        timer: Option<Arc<ExamTimer>>,
        current_question: Option<QuestionId>,
    ) -> Self {
        Self {
            document,
            timer,
            current_question,
            submitted: AtomicBool::new(false),
        }
    }

    /// Builds the timer, starts the countdown and renders initial progress.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn load(
        exam_id: ExamId,
        remaining_secs: u64,
        current_question: Option<QuestionId>,
        document: Arc<dyn ExamDocument>,
        gateway: Arc<dyn ExamGateway>,
    ) -> Self {
        let timer = ExamTimer::new(exam_id, remaining_secs, Arc::clone(&document), gateway);
        timer.start();
        let page = Self::new(document, Some(timer), current_question);
        page.update_progress();
        info!(%exam_id, remaining_secs, "exam page loaded");
        page
    }

    #[must_use]
    pub fn timer(&self) -> Option<&Arc<ExamTimer>> {
        self.timer.as_ref()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<QuestionId> {
        self.current_question
    }

    /// Highlights `choice_id` as the only pick, persists it and refreshes progress.
    ///
    /// Returns the in-flight save, if one was started.
    pub fn select_choice(&self, choice_id: ChoiceId) -> Option<JoinHandle<SaveOutcome>> {
        for choice in self.document.choices() {
            let picked = choice.choice_id == choice_id;
            self.document.set_choice_state(choice.choice_id, picked, picked);
        }

        let save = match (&self.timer, self.current_question) {
            (Some(timer), Some(question_id)) => {
                let timer = Arc::clone(timer);
                spawn_save(async move { timer.save_answer(question_id, choice_id).await })
            }
            _ => None,
        };

        self.update_progress();
        save
    }

    /// Unselects every option and clears the stored answer.
    pub fn clear_choice(&self) -> Option<JoinHandle<SaveOutcome>> {
        for choice in self.document.choices() {
            self.document.set_choice_state(choice.choice_id, false, false);
        }

        let save = match (&self.timer, self.current_question) {
            (Some(timer), Some(question_id)) => {
                let timer = Arc::clone(timer);
                spawn_save(async move { timer.clear_answer(question_id).await })
            }
            _ => None,
        };

        self.update_progress();
        save
    }

    /// Recounts answered questions from the page and writes the progress bar.
    pub fn update_progress(&self) -> ExamProgress {
        let nav = self.document.nav_buttons();
        let current_answered = self.document.checked_choice().is_some();
        self.document.set_current_answered(current_answered);

        let others_answered = nav.iter().filter(|b| b.answered && !b.current).count();
        let progress = ExamProgress::compute(others_answered, current_answered, nav.len());
        self.document
            .set_progress(&progress.bar_width(), &progress.summary());
        progress
    }

    /// Asks the user to confirm, then submits. Declining changes nothing.
    pub fn submit_exam(&self) -> bool {
        if !self.document.confirm(SUBMIT_CONFIRMATION) {
            return false;
        }
        self.submit_confirmed()
    }

    /// Submits after the caller already obtained confirmation.
    pub fn submit_confirmed(&self) -> bool {
        // The countdown ends before the form goes out, so a late expiry
        // reply cannot submit a second time.
        self.teardown();
        let submitted = self.document.submit_final_form();
        if submitted {
            self.submitted.store(true, Ordering::Release);
        } else {
            warn!("final submit form missing; exam not submitted");
        }
        submitted
    }

    /// Prompt to show when the user tries to leave, if leaving needs confirmation.
    #[must_use]
    pub fn before_unload(&self) -> Option<&'static str> {
        if self.submitted.load(Ordering::Acquire) {
            return None;
        }
        self.timer
            .as_ref()
            .filter(|timer| timer.remaining_seconds() > 0)
            .map(|_| LEAVE_WARNING)
    }

    /// Clears the tick. Safe to call repeatedly.
    pub fn teardown(&self) {
        if let Some(timer) = &self.timer {
            timer.stop();
        }
    }
}

impl Drop for ExamPage {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn spawn_save<F>(save: F) -> Option<JoinHandle<SaveOutcome>>
where
    F: Future<Output = SaveOutcome> + Send + 'static,
{
    match Handle::try_current() {
        Ok(handle) => Some(handle.spawn(save)),
        Err(_) => {
            warn!("no async runtime available; answer not saved");
            None
        }
    }
}
