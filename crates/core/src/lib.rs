#![forbid(unsafe_code)]

pub mod countdown;
pub mod error;
pub mod model;
pub mod progress;
pub mod time;

pub use countdown::{Countdown, SeverityTier, TickOutcome, format_remaining};
pub use progress::ExamProgress;
pub use time::Clock;
