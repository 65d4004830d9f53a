use quiz_core::model::{QuizDraft, QuizId};
use quiz_core::time::fixed_now;
use storage::repository::{NewQuizRecord, QuizRepository, StorageError};
use storage::sqlite::SqliteRepository;

fn record(question: &str, answer: &str) -> NewQuizRecord {
    let validated = QuizDraft::new(question, answer)
        .validate(fixed_now())
        .unwrap();
    NewQuizRecord::from_validated(&validated)
}

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_roundtrip_persists_quiz() {
    let repo = connect("memdb_roundtrip").await;

    let stored = repo
        .insert_quiz(record("Capital of France?", "Paris"))
        .await
        .expect("insert");

    let fetched = repo
        .get_quiz(stored.id())
        .await
        .expect("fetch")
        .expect("present");
    assert_eq!(fetched.question(), "Capital of France?");
    assert_eq!(fetched.answer(), "Paris");
    assert_eq!(fetched.created_at(), fixed_now());
}

#[tokio::test]
async fn sqlite_assigns_increasing_ids_and_lists_in_order() {
    let repo = connect("memdb_ordering").await;

    let a = repo.insert_quiz(record("Q1", "A1")).await.unwrap();
    let b = repo.insert_quiz(record("Q2", "A2")).await.unwrap();
    let c = repo.insert_quiz(record("Q3", "A3")).await.unwrap();
    assert!(a.id() < b.id() && b.id() < c.id());

    let all = repo.list_quizzes().await.unwrap();
    let ids: Vec<_> = all.iter().map(|q| q.id()).collect();
    assert_eq!(ids, vec![a.id(), b.id(), c.id()]);
}

#[tokio::test]
async fn sqlite_delete_by_id_reports_removal() {
    let repo = connect("memdb_delete").await;

    let quiz = repo.insert_quiz(record("Q", "A")).await.unwrap();
    assert!(repo.delete_quiz(quiz.id()).await.unwrap());
    assert!(!repo.delete_quiz(quiz.id()).await.unwrap());
    assert!(repo.get_quiz(quiz.id()).await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_update_overwrites_content_and_keeps_created_at() {
    let repo = connect("memdb_update").await;

    let quiz = repo.insert_quiz(record("Q1", "A1")).await.unwrap();
    let later = fixed_now() + chrono::Duration::minutes(10);
    let edited = quiz.with_content("Q2", "A2", later).unwrap();
    repo.update_quiz(&edited).await.unwrap();

    let fetched = repo.get_quiz(quiz.id()).await.unwrap().unwrap();
    assert_eq!(fetched.question(), "Q2");
    assert_eq!(fetched.answer(), "A2");
    assert_eq!(fetched.created_at(), fixed_now());
    assert_eq!(fetched.updated_at(), later);
}

#[tokio::test]
async fn sqlite_update_missing_row_is_not_found() {
    let repo = connect("memdb_update_missing").await;

    let ghost = quiz_core::model::Quiz::from_persisted(
        QuizId::new(41),
        "Q".into(),
        "A".into(),
        fixed_now(),
        fixed_now(),
    )
    .unwrap();

    let err = repo.update_quiz(&ghost).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}
