use chrono::{DateTime, Utc};
use exam_core::Clock;
use exam_core::model::{ExamId, QuestionId};
use serde::{Deserialize, Serialize};

use crate::document::{ChoiceOption, NavButton};
use crate::memory::{DocumentSnapshot, InMemoryDocument, QuestionPanel};

/// Server-rendered state of the exam page, as loaded by the desktop client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSeed {
    pub exam_id: ExamId,
    #[serde(default)]
    pub title: String,
    /// Seconds left when the page was rendered.
    #[serde(default)]
    pub time_remaining: Option<u64>,
    /// Attempt deadline; takes precedence over `time_remaining` when present.
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    pub current_question: Option<QuestionPanel>,
    #[serde(default)]
    pub choices: Vec<ChoiceOption>,
    #[serde(default)]
    pub nav: Vec<NavButton>,
    #[serde(default)]
    pub csrf_token: Option<String>,
}

impl PageSeed {
    /// Remaining seconds as seen from `clock`.
    #[must_use]
    pub fn remaining_seconds(&self, clock: &Clock) -> u64 {
        match self.deadline {
            Some(deadline) => clock.seconds_until(deadline),
            None => self.time_remaining.unwrap_or(0),
        }
    }

    #[must_use]
    pub fn current_question_id(&self) -> Option<QuestionId> {
        self.current_question.as_ref().map(|q| q.question_id)
    }

    #[must_use]
    pub fn into_document(self) -> InMemoryDocument {
        let choices = self
            .choices
            .into_iter()
            .map(|mut choice| {
                // The template only renders `checked`; the highlight is derived from it.
                choice.selected = choice.checked;
                choice
            })
            .collect();
        InMemoryDocument::new(DocumentSnapshot {
            title: self.title,
            question: self.current_question,
            choices,
            nav: self.nav,
            csrf_token: self.csrf_token,
            ..DocumentSnapshot::default()
        })
    }
}
