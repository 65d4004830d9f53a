use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::model::{Quiz, QuizId, ValidatedQuiz};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Insert shape for a quiz. The repository assigns the id.
#[derive(Debug, Clone)]
pub struct NewQuizRecord {
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewQuizRecord {
    #[must_use]
    pub fn from_validated(quiz: &ValidatedQuiz) -> Self {
        Self {
            question: quiz.question().to_owned(),
            answer: quiz.answer().to_owned(),
            created_at: quiz.created_at(),
            updated_at: quiz.created_at(),
        }
    }
}

/// Repository contract for quizzes.
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// List all quizzes in ascending id order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the scan fails.
    async fn list_quizzes(&self) -> Result<Vec<Quiz>, StorageError>;

    /// Fetch a quiz by id. `None` if no such record exists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn get_quiz(&self, id: QuizId) -> Result<Option<Quiz>, StorageError>;

    /// Insert a new quiz and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn insert_quiz(&self, record: NewQuizRecord) -> Result<Quiz, StorageError>;

    /// Overwrite the stored record with the same id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no row matched the id.
    async fn update_quiz(&self, quiz: &Quiz) -> Result<(), StorageError>;

    /// Remove the quiz with the given id. Returns whether a record was removed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn delete_quiz(&self, id: QuizId) -> Result<bool, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
///
/// A `BTreeMap` keeps iteration in ascending id order, matching the sorted
/// scan of the SQLite backend.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    inner: Arc<Mutex<InMemoryState>>,
}

struct InMemoryState {
    quizzes: BTreeMap<QuizId, Quiz>,
    next_id: u64,
}

impl Default for InMemoryState {
    fn default() -> Self {
        Self {
            quizzes: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, InMemoryState>, StorageError> {
        self.inner
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

#[async_trait]
impl QuizRepository for InMemoryRepository {
    async fn list_quizzes(&self) -> Result<Vec<Quiz>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.quizzes.values().cloned().collect())
    }

    async fn get_quiz(&self, id: QuizId) -> Result<Option<Quiz>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.quizzes.get(&id).cloned())
    }

    async fn insert_quiz(&self, record: NewQuizRecord) -> Result<Quiz, StorageError> {
        let mut guard = self.lock()?;
        let id = QuizId::new(guard.next_id);
        guard.next_id += 1;

        let quiz = Quiz::from_persisted(
            id,
            record.question,
            record.answer,
            record.created_at,
            record.updated_at,
        )
        .map_err(|e| StorageError::Serialization(e.to_string()))?;

        guard.quizzes.insert(id, quiz.clone());
        Ok(quiz)
    }

    async fn update_quiz(&self, quiz: &Quiz) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        match guard.quizzes.get_mut(&quiz.id()) {
            Some(slot) => {
                *slot = quiz.clone();
                Ok(())
            }
            None => Err(StorageError::NotFound),
        }
    }

    async fn delete_quiz(&self, id: QuizId) -> Result<bool, StorageError> {
        let mut guard = self.lock()?;
        Ok(guard.quizzes.remove(&id).is_some())
    }
}

/// Aggregates the quiz repository behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub quizzes: Arc<dyn QuizRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let quizzes: Arc<dyn QuizRepository> = Arc::new(repo);
        Self { quizzes }
    }
}
