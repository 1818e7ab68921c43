mod exam;

#[cfg(test)]
mod view_smoke;

pub use exam::{ConfirmSubmit, ExamView};
