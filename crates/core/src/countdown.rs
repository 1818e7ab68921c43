//! Countdown state machine mirrored from the server-held attempt deadline.

/// Remaining time at or below which the timer turns to the warning tier.
pub const WARNING_THRESHOLD_SECS: u64 = 600;
/// Remaining time at or below which the timer turns to the danger tier.
pub const DANGER_THRESHOLD_SECS: u64 = 300;

/// Visual classification of the remaining time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SeverityTier {
    #[default]
    Normal,
    Warning,
    Danger,
}

impl SeverityTier {
    /// Pure function of the remaining seconds.
    #[must_use]
    pub const fn for_remaining(remaining_secs: u64) -> Self {
        if remaining_secs <= DANGER_THRESHOLD_SECS {
            Self::Danger
        } else if remaining_secs <= WARNING_THRESHOLD_SECS {
            Self::Warning
        } else {
            Self::Normal
        }
    }

    /// Modifier class added next to `timer-display`, if any.
    #[must_use]
    pub const fn modifier_class(self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            Self::Warning => Some("timer-warning"),
            Self::Danger => Some("timer-danger"),
        }
    }
}

/// Formats seconds as `MM:SS`, or `HH:MM:SS` once at least an hour remains.
#[must_use]
pub fn format_remaining(remaining_secs: u64) -> String {
    let hours = remaining_secs / 3600;
    let minutes = (remaining_secs % 3600) / 60;
    let seconds = remaining_secs % 60;
    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// What a single tick did to the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Decremented; carries the new remaining seconds.
    Running(u64),
    /// The tick found zero remaining and concluded the countdown.
    Expired,
    /// The countdown had already concluded; nothing changed.
    Stopped,
}

/// Remaining seconds plus a terminal flag.
///
/// Remaining time only decreases. Once finished the countdown never resumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u64,
    finished: bool,
}

impl Countdown {
    #[must_use]
    pub const fn new(remaining_secs: u64) -> Self {
        Self {
            remaining: remaining_secs,
            finished: false,
        }
    }

    #[must_use]
    pub const fn remaining(&self) -> u64 {
        self.remaining
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub const fn tier(&self) -> SeverityTier {
        SeverityTier::for_remaining(self.remaining)
    }

    #[must_use]
    pub fn display(&self) -> String {
        format_remaining(self.remaining)
    }

    /// Advances one second.
    ///
    /// A tick that finds zero remaining concludes the countdown, so the tick
    /// after `1 -> 0` is the one reporting [`TickOutcome::Expired`].
    pub fn tick(&mut self) -> TickOutcome {
        if self.finished {
            return TickOutcome::Stopped;
        }
        if self.remaining == 0 {
            self.finished = true;
            return TickOutcome::Expired;
        }
        self.remaining -= 1;
        TickOutcome::Running(self.remaining)
    }

    /// Concludes the countdown from outside the tick (server reported expiry).
    ///
    /// Returns `true` only for the call that performed the transition.
    pub fn expire(&mut self) -> bool {
        if !self.finish() {
            return false;
        }
        self.remaining = 0;
        true
    }

    /// Concludes the countdown keeping the remaining time as it is (the exam
    /// was submitted or the page left before time ran out).
    ///
    /// Returns `true` only for the call that performed the transition.
    pub fn finish(&mut self) -> bool {
        if self.finished {
            return false;
        }
        self.finished = true;
        true
    }
}
