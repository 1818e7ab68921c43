use exam_core::SeverityTier;
use exam_core::model::{ChoiceId, QuestionId};
use serde::{Deserialize, Serialize};

/// One rendered `.choice-option` together with its radio input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub choice_id: ChoiceId,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub checked: bool,
}

impl ChoiceOption {
    #[must_use]
    pub fn new(choice_id: ChoiceId, label: impl Into<String>) -> Self {
        Self {
            choice_id,
            label: label.into(),
            selected: false,
            checked: false,
        }
    }
}

/// One `.question-num-btn` in the question navigator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavButton {
    pub question_id: QuestionId,
    pub number: usize,
    #[serde(default)]
    pub answered: bool,
    #[serde(default)]
    pub current: bool,
}

/// Read/write surface of the exam page.
///
/// Every element may be missing from a given page. Writers report whether the
/// target existed; callers are expected to skip silently when it did not.
pub trait ExamDocument: Send + Sync {
    /// Writes the formatted countdown into `#time-remaining`.
    fn set_time_remaining(&self, text: &str) -> bool;

    /// Sets the `#timer` container class for the given tier.
    fn set_timer_tier(&self, tier: SeverityTier) -> bool;

    /// Blocking notice to the user.
    fn alert(&self, message: &str);

    /// Blocking yes/no prompt.
    fn confirm(&self, message: &str) -> bool;

    /// Submits `#final-submit-form`. Returns `false` when the form is absent.
    fn submit_final_form(&self) -> bool;

    /// Value of the hidden anti-forgery field.
    fn csrf_token(&self) -> Option<String>;

    fn choices(&self) -> Vec<ChoiceOption>;

    /// Sets the option's `selected` class and its radio's `checked` state.
    fn set_choice_state(&self, choice_id: ChoiceId, selected: bool, checked: bool);

    fn nav_buttons(&self) -> Vec<NavButton>;

    /// Toggles `answered` on the `.current` navigator button, if there is one.
    fn set_current_answered(&self, answered: bool) -> bool;

    /// Writes the fill width and the summary text. Both nodes must exist,
    /// otherwise nothing is written and `false` is returned.
    fn set_progress(&self, bar_width: &str, text: &str) -> bool;

    fn checked_choice(&self) -> Option<ChoiceId> {
        self.choices()
            .into_iter()
            .find(|choice| choice.checked)
            .map(|choice| choice.choice_id)
    }
}
