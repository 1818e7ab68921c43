//! Element ids, classes and field names the exam template exposes.

pub const TIME_REMAINING_ID: &str = "time-remaining";
pub const TIMER_ID: &str = "timer";
pub const TIMER_BASE_CLASS: &str = "timer-display";
pub const FINAL_SUBMIT_FORM_ID: &str = "final-submit-form";
pub const PROGRESS_BAR_ID: &str = "progress-bar";
pub const PROGRESS_TEXT_ID: &str = "progress-text";

pub const CHOICE_OPTION_CLASS: &str = "choice-option";
pub const SELECTED_CLASS: &str = "selected";
pub const NAV_BUTTON_CLASS: &str = "question-num-btn";
pub const ANSWERED_CLASS: &str = "answered";
pub const CURRENT_CLASS: &str = "current";

/// Name of the hidden anti-forgery field.
pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";
/// Header the server reads the anti-forgery token from.
pub const CSRF_HEADER: &str = "X-CSRFToken";
/// Form field marking a final submission.
pub const SUBMIT_FIELD: &str = "submit_exam";

pub const TIMEOUT_NOTICE: &str = "Time is up! Your exam will be submitted automatically.";
pub const SUBMIT_CONFIRMATION: &str =
    "Are you sure you want to submit the exam? You cannot make changes after submission.";
pub const LEAVE_WARNING: &str = "Your exam is in progress. Are you sure you want to leave?";
