use quiz_core::model::{Quiz, QuizId};

use super::{
    SqliteRepository,
    mapping::{map_quiz_row, quiz_id_from_i64, quiz_id_to_i64},
};
use crate::repository::{NewQuizRecord, QuizRepository, StorageError};

#[async_trait::async_trait]
impl QuizRepository for SqliteRepository {
    async fn list_quizzes(&self) -> Result<Vec<Quiz>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, question, answer, created_at, updated_at
            FROM quizzes
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut quizzes = Vec::with_capacity(rows.len());
        for row in rows {
            quizzes.push(map_quiz_row(&row)?);
        }
        Ok(quizzes)
    }

    async fn get_quiz(&self, id: QuizId) -> Result<Option<Quiz>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, question, answer, created_at, updated_at
            FROM quizzes
            WHERE id = ?1
            ",
        )
        .bind(quiz_id_to_i64(id)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.as_ref().map(map_quiz_row).transpose()
    }

    async fn insert_quiz(&self, record: NewQuizRecord) -> Result<Quiz, StorageError> {
        let result = sqlx::query(
            r"
            INSERT INTO quizzes (question, answer, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(&record.question)
        .bind(&record.answer)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let id = quiz_id_from_i64(result.last_insert_rowid())?;
        Quiz::from_persisted(
            id,
            record.question,
            record.answer,
            record.created_at,
            record.updated_at,
        )
        .map_err(|e| StorageError::Serialization(e.to_string()))
    }

    async fn update_quiz(&self, quiz: &Quiz) -> Result<(), StorageError> {
        let result = sqlx::query(
            r"
            UPDATE quizzes
            SET question = ?2, answer = ?3, updated_at = ?4
            WHERE id = ?1
            ",
        )
        .bind(quiz_id_to_i64(quiz.id())?)
        .bind(quiz.question())
        .bind(quiz.answer())
        .bind(quiz.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn delete_quiz(&self, id: QuizId) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM quizzes WHERE id = ?1")
            .bind(quiz_id_to_i64(id)?)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
