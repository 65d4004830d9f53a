use std::sync::Arc;

use quiz_core::model::{Quiz, QuizDraft, QuizId};
use storage::repository::{NewQuizRecord, QuizRepository};

use crate::Clock;
use crate::error::QuizServiceError;

/// Orchestrates quiz creation, lookup, editing, and answer checking.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    quizzes: Arc<dyn QuizRepository>,
}

impl QuizService {
    #[must_use]
    pub fn new(clock: Clock, quizzes: Arc<dyn QuizRepository>) -> Self {
        Self { clock, quizzes }
    }

    /// List all quizzes in ascending id order.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if repository access fails.
    pub async fn list_quizzes(&self) -> Result<Vec<Quiz>, QuizServiceError> {
        let quizzes = self.quizzes.list_quizzes().await?;
        Ok(quizzes)
    }

    /// Fetch one quiz by id.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::NotFound` if the id does not exist.
    pub async fn get_quiz(&self, id: QuizId) -> Result<Quiz, QuizServiceError> {
        self.quizzes
            .get_quiz(id)
            .await?
            .ok_or(QuizServiceError::NotFound)
    }

    /// Validate and persist a new quiz. The storage provider assigns the id.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Validation` for blank question/answer text.
    /// Returns `QuizServiceError::Storage` if persistence fails.
    pub async fn add_quiz(
        &self,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<Quiz, QuizServiceError> {
        let validated = QuizDraft::new(question, answer).validate(self.clock.now())?;
        let quiz = self
            .quizzes
            .insert_quiz(NewQuizRecord::from_validated(&validated))
            .await?;
        Ok(quiz)
    }

    /// Overwrite a quiz's question/answer text, preserving its id.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::NotFound` if the id does not exist.
    /// Returns `QuizServiceError::Validation` for blank replacement text.
    pub async fn edit_quiz(
        &self,
        id: QuizId,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<Quiz, QuizServiceError> {
        let current = self.get_quiz(id).await?;
        let updated = current.with_content(question, answer, self.clock.now())?;
        self.quizzes.update_quiz(&updated).await?;
        Ok(updated)
    }

    /// Remove a quiz by id.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::NotFound` if no record was removed.
    pub async fn delete_quiz(&self, id: QuizId) -> Result<(), QuizServiceError> {
        let removed = self.quizzes.delete_quiz(id).await?;
        if !removed {
            return Err(QuizServiceError::NotFound);
        }
        Ok(())
    }

    /// Check a submitted answer against the stored one.
    ///
    /// Comparison is case-insensitive with the submission trimmed. Does not
    /// mutate any persistent state.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::NotFound` if the id does not exist.
    pub async fn check_answer(
        &self,
        id: QuizId,
        submission: &str,
    ) -> Result<bool, QuizServiceError> {
        let quiz = self.get_quiz(id).await?;
        Ok(quiz.check_answer(submission))
    }

    /// Snapshot of all quizzes for a play session.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if repository access fails.
    pub async fn play_snapshot(&self) -> Result<Vec<Quiz>, QuizServiceError> {
        self.list_quizzes().await
    }
}
