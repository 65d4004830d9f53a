use std::sync::Arc;

use quiz_core::time::fixed_now;
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{Clock, PlayOutcome, PlaySession, QuizService};
use storage::repository::InMemoryRepository;

#[tokio::test]
async fn play_drains_a_seeded_store_without_repeats() {
    let repo = InMemoryRepository::new();
    let service = QuizService::new(Clock::fixed(fixed_now()), Arc::new(repo));

    for n in 1..=5 {
        service
            .add_quiz(format!("Q{n}"), format!("A{n}"))
            .await
            .unwrap();
    }

    let snapshot = service.play_snapshot().await.unwrap();
    let mut session = PlaySession::new(snapshot);
    let mut rng = StdRng::seed_from_u64(42);
    let mut asked = Vec::new();

    while let Some(quiz) = session.next_question_with(&mut rng) {
        asked.push(quiz.id());
        let answer = quiz.answer().to_owned();
        session.submit_answer(&answer).unwrap();
    }

    assert_eq!(session.outcome(), Some(PlayOutcome::Won));
    assert_eq!(session.score(), 5);

    let mut unique = asked.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 5);
}

#[tokio::test]
async fn play_snapshot_is_isolated_from_later_mutations() {
    let repo = InMemoryRepository::new();
    let service = QuizService::new(Clock::fixed(fixed_now()), Arc::new(repo));

    service.add_quiz("Q1", "A1").await.unwrap();
    let doomed = service.add_quiz("Q2", "A2").await.unwrap();

    let snapshot = service.play_snapshot().await.unwrap();
    let mut session = PlaySession::new(snapshot);

    // a concurrent client deletes a record mid-session; the snapshot is unaffected
    service.delete_quiz(doomed.id()).await.unwrap();

    let mut rng = StdRng::seed_from_u64(9);
    let mut asked = 0;
    while let Some(quiz) = session.next_question_with(&mut rng) {
        asked += 1;
        let answer = quiz.answer().to_owned();
        session.submit_answer(&answer).unwrap();
    }

    assert_eq!(asked, 2);
    assert_eq!(session.score(), 2);
    assert_eq!(session.outcome(), Some(PlayOutcome::Won));
}

#[tokio::test]
async fn play_over_empty_store_finishes_with_zero_score() {
    let repo = InMemoryRepository::new();
    let service = QuizService::new(Clock::fixed(fixed_now()), Arc::new(repo));

    let session = PlaySession::new(service.play_snapshot().await.unwrap());
    assert!(session.is_finished());
    assert_eq!(session.outcome(), Some(PlayOutcome::Empty));
    assert_eq!(session.score(), 0);
}
