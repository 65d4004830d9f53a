#![forbid(unsafe_code)]

pub mod error;
pub mod play;
pub mod quiz_service;

pub use quiz_core::Clock;

pub use error::{PlayError, QuizServiceError};
pub use play::{AnswerVerdict, PlayOutcome, PlaySession};
pub use quiz_service::QuizService;
