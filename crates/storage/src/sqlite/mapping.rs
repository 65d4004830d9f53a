use quiz_core::model::{Quiz, QuizId};
use sqlx::Row;

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn quiz_id_from_i64(v: i64) -> Result<QuizId, StorageError> {
    Ok(QuizId::new(i64_to_u64("quiz_id", v)?))
}

pub(crate) fn quiz_id_to_i64(id: QuizId) -> Result<i64, StorageError> {
    i64::try_from(id.value()).map_err(|_| StorageError::Serialization("quiz_id overflow".into()))
}

pub(crate) fn map_quiz_row(row: &sqlx::sqlite::SqliteRow) -> Result<Quiz, StorageError> {
    let id = quiz_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?;
    let question: String = row.try_get("question").map_err(ser)?;
    let answer: String = row.try_get("answer").map_err(ser)?;
    let created_at = row.try_get("created_at").map_err(ser)?;
    let updated_at = row.try_get("updated_at").map_err(ser)?;

    Quiz::from_persisted(id, question, answer, created_at, updated_at).map_err(ser)
}
