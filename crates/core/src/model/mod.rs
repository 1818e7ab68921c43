mod answer;
mod ids;

pub use answer::{AnswerSubmission, EXAM_TIME_EXPIRED, SaveAnswerResponse};
pub use ids::{ChoiceId, ExamId, QuestionId};
