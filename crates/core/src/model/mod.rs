pub mod ids;
pub mod quiz;

pub use ids::{ParseIdError, QuizId};
pub use quiz::{Quiz, QuizDraft, QuizValidationError, ValidatedQuiz};
