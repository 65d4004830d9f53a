use quiz_core::model::Quiz;
use rand::Rng;

use crate::error::PlayError;

//
// ─── OUTCOME ───────────────────────────────────────────────────────────────────
//

/// Terminal result of a play session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Every question in the snapshot was answered correctly.
    Won,
    /// A submitted answer was wrong.
    Lost,
    /// The snapshot was empty; nothing was ever asked.
    Empty,
}

/// Verdict for one submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerVerdict {
    Correct,
    Incorrect,
}

//
// ─── PLAY SESSION ──────────────────────────────────────────────────────────────
//

/// One run of the play command: a snapshot of all quizzes is drained by
/// uniform random selection without replacement, accumulating one point per
/// correct answer. The first wrong answer ends the session.
///
/// A quiz is removed from the pool the moment it is selected, so it is never
/// presented twice within a session.
pub struct PlaySession {
    remaining: Vec<Quiz>,
    current: Option<Quiz>,
    score: u32,
    outcome: Option<PlayOutcome>,
}

impl PlaySession {
    /// Start a session over a snapshot of the current quizzes.
    ///
    /// An empty snapshot finishes immediately with `PlayOutcome::Empty`.
    #[must_use]
    pub fn new(snapshot: Vec<Quiz>) -> Self {
        let outcome = snapshot.is_empty().then_some(PlayOutcome::Empty);
        Self {
            remaining: snapshot,
            current: None,
            score: 0,
            outcome,
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn outcome(&self) -> Option<PlayOutcome> {
        self.outcome
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Number of quizzes not yet selected.
    #[must_use]
    pub fn remaining_count(&self) -> usize {
        self.remaining.len()
    }

    /// The question currently awaiting an answer, if any.
    #[must_use]
    pub fn current_question(&self) -> Option<&Quiz> {
        self.current.as_ref()
    }

    /// Select the next question using the thread-local RNG.
    pub fn next_question(&mut self) -> Option<&Quiz> {
        let mut rng = rand::rng();
        self.next_question_with(&mut rng)
    }

    /// Select the next question uniformly at random from the remaining pool
    /// and remove it from the pool.
    ///
    /// Returns `None` once the session is finished. Draining the pool with
    /// no wrong answers finishes the session with `PlayOutcome::Won`. If a
    /// question is already awaiting an answer it is returned again.
    pub fn next_question_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&Quiz> {
        if self.outcome.is_some() {
            return None;
        }
        if self.current.is_some() {
            return self.current.as_ref();
        }
        if self.remaining.is_empty() {
            self.outcome = Some(PlayOutcome::Won);
            return None;
        }

        let index = rng.random_range(0..self.remaining.len());
        self.current = Some(self.remaining.swap_remove(index));
        self.current.as_ref()
    }

    /// Score the submission against the pending question.
    ///
    /// Correct answers add one point and return the session to selecting;
    /// a wrong answer finishes it with `PlayOutcome::Lost`.
    ///
    /// # Errors
    ///
    /// Returns `PlayError::Finished` after the session ended and
    /// `PlayError::NoQuestionPending` when nothing was asked.
    pub fn submit_answer(&mut self, submission: &str) -> Result<AnswerVerdict, PlayError> {
        if self.outcome.is_some() {
            return Err(PlayError::Finished);
        }
        let Some(quiz) = self.current.take() else {
            return Err(PlayError::NoQuestionPending);
        };

        if quiz.check_answer(submission) {
            self.score += 1;
            Ok(AnswerVerdict::Correct)
        } else {
            self.outcome = Some(PlayOutcome::Lost);
            Ok(AnswerVerdict::Incorrect)
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    use quiz_core::model::{QuizDraft, QuizId};
    use quiz_core::time::fixed_now;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn build_quiz(id: u64, question: &str, answer: &str) -> Quiz {
        QuizDraft::new(question, answer)
            .validate(fixed_now())
            .unwrap()
            .assign_id(QuizId::new(id))
    }

    fn three_quizzes() -> Vec<Quiz> {
        vec![
            build_quiz(1, "Q1", "A1"),
            build_quiz(2, "Q2", "A2"),
            build_quiz(3, "Q3", "A3"),
        ]
    }

    #[test]
    fn empty_snapshot_finishes_immediately() {
        let mut session = PlaySession::new(Vec::new());

        assert!(session.is_finished());
        assert_eq!(session.outcome(), Some(PlayOutcome::Empty));
        assert_eq!(session.score(), 0);
        assert!(session.next_question().is_none());
    }

    #[test]
    fn answering_everything_correctly_wins_with_full_score() {
        let mut session = PlaySession::new(three_quizzes());
        let mut rng = StdRng::seed_from_u64(7);
        let mut asked = Vec::new();

        while let Some(quiz) = session.next_question_with(&mut rng) {
            asked.push(quiz.id());
            let answer = quiz.answer().to_owned();
            assert_eq!(session.submit_answer(&answer).unwrap(), AnswerVerdict::Correct);
        }

        assert_eq!(session.outcome(), Some(PlayOutcome::Won));
        assert_eq!(session.score(), 3);
        assert_eq!(asked.len(), 3);

        // no repeats
        let mut unique = asked.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn wrong_answer_on_second_question_loses_with_score_one() {
        let mut session = PlaySession::new(three_quizzes());
        let mut rng = StdRng::seed_from_u64(11);

        let first = session.next_question_with(&mut rng).unwrap();
        let answer = first.answer().to_owned();
        assert_eq!(session.submit_answer(&answer).unwrap(), AnswerVerdict::Correct);

        session.next_question_with(&mut rng).unwrap();
        assert_eq!(
            session.submit_answer("definitely wrong").unwrap(),
            AnswerVerdict::Incorrect
        );

        assert_eq!(session.outcome(), Some(PlayOutcome::Lost));
        assert_eq!(session.score(), 1);
        assert!(session.next_question().is_none());
        // the wrong-answered quiz left the pool on selection
        assert_eq!(session.remaining_count(), 1);
        assert!(session.current_question().is_none());
    }

    #[test]
    fn submit_without_pending_question_is_an_error() {
        let mut session = PlaySession::new(three_quizzes());
        assert_eq!(
            session.submit_answer("A1").unwrap_err(),
            PlayError::NoQuestionPending
        );
    }

    #[test]
    fn submit_after_finish_is_an_error() {
        let mut session = PlaySession::new(Vec::new());
        assert_eq!(session.submit_answer("x").unwrap_err(), PlayError::Finished);
    }

    #[test]
    fn pending_question_is_returned_again_not_redrawn() {
        let mut session = PlaySession::new(three_quizzes());
        let mut rng = StdRng::seed_from_u64(3);

        let first = session.next_question_with(&mut rng).unwrap().id();
        let again = session.next_question_with(&mut rng).unwrap().id();
        assert_eq!(first, again);
        assert_eq!(session.remaining_count(), 2);
    }

    #[test]
    fn answers_are_trimmed_and_case_insensitive_in_play() {
        let mut session = PlaySession::new(vec![build_quiz(1, "Capital of France?", "Paris")]);
        let mut rng = StdRng::seed_from_u64(1);

        session.next_question_with(&mut rng).unwrap();
        assert_eq!(
            session.submit_answer("  PARIS ").unwrap(),
            AnswerVerdict::Correct
        );
        assert!(session.next_question_with(&mut rng).is_none());
        assert_eq!(session.outcome(), Some(PlayOutcome::Won));
    }

    #[test]
    fn every_quiz_can_be_selected_first() {
        // Guards the uniform-selection contract: across seeds, each element
        // of a 3-quiz pool (the last one included) shows up as the first
        // selection.
        let mut seen_first = [false; 3];
        for seed in 0..64 {
            let mut session = PlaySession::new(three_quizzes());
            let mut rng = StdRng::seed_from_u64(seed);
            let first = session.next_question_with(&mut rng).unwrap();
            seen_first[(first.id().value() - 1) as usize] = true;
        }
        assert_eq!(seen_first, [true, true, true]);
    }
}
