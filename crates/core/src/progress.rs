/// Answered-question progress, derived fresh from the page on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExamProgress {
    pub answered: usize,
    pub total: usize,
}

impl ExamProgress {
    /// Combines the answered flags of the other questions with the state of
    /// the visible one.
    ///
    /// `others_answered` must not include the current question's flag, so a
    /// current question that is both flagged and checked is counted once.
    #[must_use]
    pub fn compute(others_answered: usize, current_answered: bool, total: usize) -> Self {
        let answered = (others_answered + usize::from(current_answered)).min(total);
        Self { answered, total }
    }

    /// Percentage in `[0, 100]`. An exam without questions reports 0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.answered as f64 / self.total as f64) * 100.0
    }

    /// CSS width value for the progress-bar fill, e.g. `"40%"`.
    #[must_use]
    pub fn bar_width(&self) -> String {
        format!("{}%", self.percentage())
    }

    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} of {} answered", self.answered, self.total)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.answered == self.total
    }
}
