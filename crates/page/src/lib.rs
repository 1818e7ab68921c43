#![forbid(unsafe_code)]

pub mod document;
pub mod dom;
pub mod memory;
pub mod seed;

pub use document::{ChoiceOption, ExamDocument, NavButton};
pub use memory::{DocumentSnapshot, InMemoryDocument, QuestionPanel};
pub use seed::PageSeed;
