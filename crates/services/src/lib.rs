#![forbid(unsafe_code)]

pub mod error;
pub mod exam_client;
pub mod exam_timer;

pub use exam_core::Clock;

pub use error::ExamClientError;
pub use exam_client::{ExamClientConfig, ExamGateway, HttpExamClient};
pub use exam_timer::{ExamTimer, SaveOutcome, TICK_PERIOD};
