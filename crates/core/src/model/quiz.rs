use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::QuizId;

//
// ─── QUIZ TYPES ────────────────────────────────────────────────────────────────
//

/// Unvalidated question/answer text as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizDraft {
    pub question: String,
    pub answer: String,
}

impl QuizDraft {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Checks both texts non-empty and stamps the creation time.
    ///
    /// # Errors
    ///
    /// Returns `QuizValidationError` if the question or answer is blank.
    pub fn validate(self, now: DateTime<Utc>) -> Result<ValidatedQuiz, QuizValidationError> {
        if self.question.trim().is_empty() {
            return Err(QuizValidationError::EmptyQuestion);
        }
        if self.answer.trim().is_empty() {
            return Err(QuizValidationError::EmptyAnswer);
        }

        Ok(ValidatedQuiz {
            question: self.question,
            answer: self.answer,
            created_at: now,
        })
    }
}

/// A draft that passed validation but has no identity yet.
///
/// The storage provider assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuiz {
    question: String,
    answer: String,
    created_at: DateTime<Utc>,
}

impl ValidatedQuiz {
    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn assign_id(self, id: QuizId) -> Quiz {
        Quiz {
            id,
            question: self.question,
            answer: self.answer,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// One question/answer record with a stable integer identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    id: QuizId,
    question: String,
    answer: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Quiz {
    /// Rebuild a quiz from its persisted fields, re-validating the text.
    ///
    /// # Errors
    ///
    /// Returns `QuizValidationError` if the stored question or answer is blank.
    pub fn from_persisted(
        id: QuizId,
        question: String,
        answer: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, QuizValidationError> {
        if question.trim().is_empty() {
            return Err(QuizValidationError::EmptyQuestion);
        }
        if answer.trim().is_empty() {
            return Err(QuizValidationError::EmptyAnswer);
        }

        Ok(Self {
            id,
            question,
            answer,
            created_at,
            updated_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuizId {
        self.id
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replacement copy with new texts. Keeps id and `created_at`.
    ///
    /// # Errors
    ///
    /// Returns `QuizValidationError` if the replacement texts are blank.
    pub fn with_content(
        &self,
        question: impl Into<String>,
        answer: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, QuizValidationError> {
        let question = question.into();
        let answer = answer.into();
        if question.trim().is_empty() {
            return Err(QuizValidationError::EmptyQuestion);
        }
        if answer.trim().is_empty() {
            return Err(QuizValidationError::EmptyAnswer);
        }

        Ok(Self {
            id: self.id,
            question,
            answer,
            created_at: self.created_at,
            updated_at: now,
        })
    }

    /// Compares a submission against the stored answer.
    ///
    /// Case-insensitive; leading/trailing whitespace is trimmed from the
    /// submission only.
    #[must_use]
    pub fn check_answer(&self, submission: &str) -> bool {
        submission.trim().to_lowercase() == self.answer.to_lowercase()
    }
}

//
// ─── QUIZ VALIDATION ERRORS ────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum QuizValidationError {
    #[error("question must not be empty")]
    EmptyQuestion,

    #[error("answer must not be empty")]
    EmptyAnswer,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn quiz_fails_if_question_empty() {
        let draft = QuizDraft::new("   ", "ok");
        let err = draft.validate(fixed_now()).unwrap_err();
        assert_eq!(err, QuizValidationError::EmptyQuestion);
    }

    #[test]
    fn quiz_fails_if_answer_empty() {
        let draft = QuizDraft::new("ok", " ");
        let err = draft.validate(fixed_now()).unwrap_err();
        assert_eq!(err, QuizValidationError::EmptyAnswer);
    }

    #[test]
    fn valid_quiz_validates_and_assigns_id() {
        let now = fixed_now();
        let quiz = QuizDraft::new("Capital of France?", "Paris")
            .validate(now)
            .unwrap()
            .assign_id(QuizId::new(7));

        assert_eq!(quiz.id(), QuizId::new(7));
        assert_eq!(quiz.question(), "Capital of France?");
        assert_eq!(quiz.answer(), "Paris");
        assert_eq!(quiz.created_at(), now);
        assert_eq!(quiz.updated_at(), now);
    }

    #[test]
    fn check_answer_trims_submission_and_ignores_case() {
        let quiz = QuizDraft::new("Capital of France?", "Paris")
            .validate(fixed_now())
            .unwrap()
            .assign_id(QuizId::new(1));

        assert!(quiz.check_answer("  PARIS "));
        assert!(quiz.check_answer("paris"));
        assert!(!quiz.check_answer("London"));
    }

    #[test]
    fn check_answer_does_not_trim_stored_answer() {
        let quiz = Quiz::from_persisted(
            QuizId::new(1),
            "Q".into(),
            "Paris ".into(),
            fixed_now(),
            fixed_now(),
        )
        .unwrap();

        // the stored text is authoritative, whitespace included
        assert!(!quiz.check_answer("Paris"));
        assert!(!quiz.check_answer(" paris "));
    }

    #[test]
    fn with_content_keeps_id_and_created_at() {
        let now = fixed_now();
        let later = now + chrono::Duration::minutes(5);
        let quiz = QuizDraft::new("Q1", "A1")
            .validate(now)
            .unwrap()
            .assign_id(QuizId::new(3));

        let edited = quiz.with_content("Q2", "A2", later).unwrap();
        assert_eq!(edited.id(), QuizId::new(3));
        assert_eq!(edited.question(), "Q2");
        assert_eq!(edited.answer(), "A2");
        assert_eq!(edited.created_at(), now);
        assert_eq!(edited.updated_at(), later);
    }

    #[test]
    fn with_content_rejects_blank_replacement() {
        let quiz = QuizDraft::new("Q1", "A1")
            .validate(fixed_now())
            .unwrap()
            .assign_id(QuizId::new(3));

        let err = quiz.with_content("", "A2", fixed_now()).unwrap_err();
        assert_eq!(err, QuizValidationError::EmptyQuestion);
    }

    #[test]
    fn from_persisted_rejects_blank_text() {
        let err = Quiz::from_persisted(
            QuizId::new(1),
            "Q".into(),
            "  ".into(),
            fixed_now(),
            fixed_now(),
        )
        .unwrap_err();
        assert_eq!(err, QuizValidationError::EmptyAnswer);
    }
}
