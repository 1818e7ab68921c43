use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use exam_core::SeverityTier;
use exam_core::model::{ChoiceId, QuestionId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::{ChoiceOption, ExamDocument, NavButton};
use crate::dom::TIMER_BASE_CLASS;

type SubmitHook = Arc<dyn Fn() + Send + Sync>;

/// The visible question's heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPanel {
    pub question_id: QuestionId,
    pub number: usize,
    pub text: String,
}

/// Plain copy of everything the page shows. `None` means the element is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub title: String,
    pub time_remaining: Option<String>,
    pub timer_class: Option<String>,
    pub question: Option<QuestionPanel>,
    pub choices: Vec<ChoiceOption>,
    pub nav: Vec<NavButton>,
    pub progress_bar_width: Option<String>,
    pub progress_text: Option<String>,
    pub has_final_form: bool,
    pub csrf_token: Option<String>,
    pub alerts: Vec<String>,
    pub submit_count: usize,
}

impl Default for DocumentSnapshot {
    fn default() -> Self {
        Self {
            title: String::new(),
            time_remaining: Some(String::new()),
            timer_class: Some(TIMER_BASE_CLASS.to_string()),
            question: None,
            choices: Vec::new(),
            nav: Vec::new(),
            progress_bar_width: Some("0%".to_string()),
            progress_text: Some(String::new()),
            has_final_form: true,
            csrf_token: None,
            alerts: Vec::new(),
            submit_count: 0,
        }
    }
}

impl DocumentSnapshot {
    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.submit_count > 0
    }

    #[must_use]
    pub fn current_question_id(&self) -> Option<QuestionId> {
        self.question
            .as_ref()
            .map(|q| q.question_id)
            .or_else(|| self.nav.iter().find(|b| b.current).map(|b| b.question_id))
    }
}

struct DocumentState {
    snapshot: DocumentSnapshot,
    confirm_reply: bool,
    confirm_prompts: Vec<String>,
    on_submit: Option<SubmitHook>,
}

/// Shared, thread-safe page model used headless and behind the desktop view.
#[derive(Clone)]
pub struct InMemoryDocument {
    state: Arc<Mutex<DocumentState>>,
}

impl Default for InMemoryDocument {
    fn default() -> Self {
        Self::new(DocumentSnapshot::default())
    }
}

impl fmt::Debug for InMemoryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryDocument")
            .field("snapshot", &self.snapshot())
            .finish_non_exhaustive()
    }
}

impl InMemoryDocument {
    #[must_use]
    pub fn new(snapshot: DocumentSnapshot) -> Self {
        Self {
            state: Arc::new(Mutex::new(DocumentState {
                snapshot,
                confirm_reply: true,
                confirm_prompts: Vec::new(),
                on_submit: None,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DocumentState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn snapshot(&self) -> DocumentSnapshot {
        self.lock().snapshot.clone()
    }

    /// Applies an arbitrary edit, e.g. to simulate server-rendered markup.
    pub fn update(&self, edit: impl FnOnce(&mut DocumentSnapshot)) {
        edit(&mut self.lock().snapshot);
    }

    /// Answer returned by subsequent `confirm` prompts.
    pub fn set_confirm_reply(&self, reply: bool) {
        self.lock().confirm_reply = reply;
    }

    #[must_use]
    pub fn confirm_prompts(&self) -> Vec<String> {
        self.lock().confirm_prompts.clone()
    }

    /// Called after each successful form submission, outside the lock.
    pub fn set_on_submit(&self, hook: impl Fn() + Send + Sync + 'static) {
        self.lock().on_submit = Some(Arc::new(hook));
    }
}

impl ExamDocument for InMemoryDocument {
    fn set_time_remaining(&self, text: &str) -> bool {
        let mut state = self.lock();
        match state.snapshot.time_remaining.as_mut() {
            Some(slot) => {
                text.clone_into(slot);
                true
            }
            None => false,
        }
    }

    fn set_timer_tier(&self, tier: SeverityTier) -> bool {
        let mut state = self.lock();
        let Some(class) = state.snapshot.timer_class.as_mut() else {
            return false;
        };
        *class = match tier.modifier_class() {
            Some(modifier) => format!("{TIMER_BASE_CLASS} {modifier}"),
            None => TIMER_BASE_CLASS.to_string(),
        };
        true
    }

    fn alert(&self, message: &str) {
        debug!(notice = message, "page alert");
        self.lock().snapshot.alerts.push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        let mut state = self.lock();
        state.confirm_prompts.push(message.to_string());
        state.confirm_reply
    }

    fn submit_final_form(&self) -> bool {
        let hook = {
            let mut state = self.lock();
            if !state.snapshot.has_final_form {
                return false;
            }
            state.snapshot.submit_count += 1;
            state.on_submit.clone()
        };
        if let Some(hook) = hook {
            hook();
        }
        true
    }

    fn csrf_token(&self) -> Option<String> {
        self.lock().snapshot.csrf_token.clone()
    }

    fn choices(&self) -> Vec<ChoiceOption> {
        self.lock().snapshot.choices.clone()
    }

    fn set_choice_state(&self, choice_id: ChoiceId, selected: bool, checked: bool) {
        let mut state = self.lock();
        for choice in state
            .snapshot
            .choices
            .iter_mut()
            .filter(|c| c.choice_id == choice_id)
        {
            choice.selected = selected;
            choice.checked = checked;
        }
    }

    fn nav_buttons(&self) -> Vec<NavButton> {
        self.lock().snapshot.nav.clone()
    }

    fn set_current_answered(&self, answered: bool) -> bool {
        let mut state = self.lock();
        match state.snapshot.nav.iter_mut().find(|b| b.current) {
            Some(button) => {
                button.answered = answered;
                true
            }
            None => false,
        }
    }

    fn set_progress(&self, bar_width: &str, text: &str) -> bool {
        let mut state = self.lock();
        let snapshot = &mut state.snapshot;
        match (
            snapshot.progress_bar_width.as_mut(),
            snapshot.progress_text.as_mut(),
        ) {
            (Some(width), Some(summary)) => {
                bar_width.clone_into(width);
                text.clone_into(summary);
                true
            }
            _ => false,
        }
    }
}
