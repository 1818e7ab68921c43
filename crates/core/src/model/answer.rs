use serde::{Deserialize, Serialize};

use super::ids::{ChoiceId, QuestionId};

/// Error string the server returns once the attempt deadline has passed.
pub const EXAM_TIME_EXPIRED: &str = "Exam time expired";

/// Body of a save-answer request.
///
/// A `None` choice is sent as `null` and clears the stored answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub question_id: QuestionId,
    pub choice_id: Option<ChoiceId>,
}

impl AnswerSubmission {
    #[must_use]
    pub fn select(question_id: QuestionId, choice_id: ChoiceId) -> Self {
        Self {
            question_id,
            choice_id: Some(choice_id),
        }
    }

    #[must_use]
    pub fn clear(question_id: QuestionId) -> Self {
        Self {
            question_id,
            choice_id: None,
        }
    }
}

/// Server reply to a save-answer request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveAnswerResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SaveAnswerResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }

    /// True only for a rejection carrying the exact expiry reason.
    #[must_use]
    pub fn is_time_expired(&self) -> bool {
        !self.success && self.error.as_deref() == Some(EXAM_TIME_EXPIRED)
    }
}
