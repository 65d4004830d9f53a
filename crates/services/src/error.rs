//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::QuizValidationError;
use storage::repository::StorageError;

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error("quiz not found")]
    NotFound,
    #[error(transparent)]
    Validation(#[from] QuizValidationError),
    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for QuizServiceError {
    fn from(err: StorageError) -> Self {
        // A repository-level miss and a missing id mean the same thing to
        // the command boundary.
        match err {
            StorageError::NotFound => Self::NotFound,
            other => Self::Storage(other),
        }
    }
}

/// Errors emitted by `PlaySession`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlayError {
    #[error("play session already finished")]
    Finished,
    #[error("no question pending an answer")]
    NoQuestionPending,
}
