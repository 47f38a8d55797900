use std::fmt;

use chrono::{DateTime, Utc};

use quiz_core::evaluator::{self, evaluate};
use quiz_core::model::{Answer, AnswerState, Correctness, Question};

use crate::error::SessionError;
use crate::similarity::SimilarityOracle;

//
// ─── SUBMISSION OUTCOME ────────────────────────────────────────────────────────
//

/// Result of submitting an answer to one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// The question's verdict after this submission.
    pub correctness: Correctness,
    /// Whether this submission locked the verdict (as opposed to hitting an
    /// already-locked question).
    pub newly_scored: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz session over a fixed question sequence.
///
/// Per question the state machine is `Unanswered → Answered → Scored`, never
/// backwards: the first evaluated submission locks the verdict, later
/// submissions only update the stored value for serialization. Operations are
/// not reentrant-safe; callers drive them one at a time.
pub struct QuizSession {
    questions: Vec<Question>,
    answers: Vec<AnswerState>,
    saved: Vec<bool>,
    score: u32,
    cursor: usize,
    completed: bool,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Create a session over the given questions, all starting unanswered.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no questions are provided.
    pub fn new(questions: Vec<Question>) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }
        let len = questions.len();
        Ok(Self {
            questions,
            answers: vec![AnswerState::new(); len],
            saved: vec![false; len],
            score: 0,
            cursor: 0,
            completed: false,
            started_at: Utc::now(),
            completed_at: None,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Sessions are never constructed empty; kept for API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.cursor]
    }

    #[must_use]
    pub fn answer_state(&self, index: usize) -> Option<&AnswerState> {
        self.answers.get(index)
    }

    #[must_use]
    pub fn is_saved(&self, index: usize) -> bool {
        self.saved.get(index).copied().unwrap_or(false)
    }

    /// Indices of questions not yet persisted, in session order.
    #[must_use]
    pub fn unsaved_indices(&self) -> Vec<usize> {
        self.saved
            .iter()
            .enumerate()
            .filter_map(|(index, &saved)| (!saved).then_some(index))
            .collect()
    }

    fn check_index(&self, index: usize) -> Result<(), SessionError> {
        if index < self.questions.len() {
            Ok(())
        } else {
            Err(SessionError::IndexOutOfRange {
                index,
                len: self.questions.len(),
            })
        }
    }

    /// Submit an answer to a synchronously evaluated question.
    ///
    /// The stored value is always updated; the verdict and score only change
    /// if the question was not yet locked.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::IndexOutOfRange` for a bad index,
    /// `SessionError::NeedsOracle` for short/long answer questions (which go
    /// through [`Self::submit_short_answer`]), and `SessionError::AnswerShape`
    /// when the answer does not fit the question variant.
    pub fn submit(&mut self, index: usize, answer: Answer) -> Result<SubmitOutcome, SessionError> {
        self.check_index(index)?;
        let question = &self.questions[index];
        if matches!(question, Question::ShortOrLongAnswer { .. }) {
            return Err(SessionError::NeedsOracle);
        }
        let correct = evaluate(question, &answer).ok_or(SessionError::AnswerShape)?;
        Ok(self.apply(index, answer, correct))
    }

    /// Submit a short/long answer, consulting the similarity oracle.
    ///
    /// The skip sentinel short-circuits to an incorrect verdict without an
    /// oracle call, as does a resubmission to an already-locked question. On
    /// oracle failure the question is left untouched (still unanswered), so
    /// the caller can surface the message and allow a retry.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::IndexOutOfRange` for a bad index,
    /// `SessionError::AnswerShape` if the question is not a short/long answer
    /// variant, and `SessionError::Evaluation` when the oracle fails.
    pub async fn submit_short_answer(
        &mut self,
        index: usize,
        input: &str,
        oracle: &dyn SimilarityOracle,
    ) -> Result<SubmitOutcome, SessionError> {
        self.check_index(index)?;
        let Question::ShortOrLongAnswer { answer: reference, .. } = &self.questions[index] else {
            return Err(SessionError::AnswerShape);
        };

        let submission = input.trim().to_string();
        if evaluator::is_skip(&submission) {
            return Ok(self.apply(index, Answer::Text(submission), false));
        }
        if self.answers[index].is_locked() {
            // Verdict is final; just keep the latest value for serialization.
            return Ok(self.apply(index, Answer::Text(submission), false));
        }

        let similarity = oracle.similarity(&submission, reference).await?;
        let correct = evaluator::short_answer_verdict(similarity);
        Ok(self.apply(index, Answer::Text(submission), correct))
    }

    fn apply(&mut self, index: usize, answer: Answer, correct: bool) -> SubmitOutcome {
        let state = &mut self.answers[index];
        state.record_value(answer);
        let newly_scored = state.lock(correct);
        if newly_scored && correct {
            self.score += 1;
        }
        SubmitOutcome {
            correctness: state.correctness(),
            newly_scored,
        }
    }

    /// Move to the next question; advancing from the last question marks the
    /// session complete instead of moving the cursor.
    pub fn advance(&mut self) {
        if self.cursor + 1 < self.questions.len() {
            self.cursor += 1;
        } else if !self.completed {
            self.completed = true;
            self.completed_at = Some(Utc::now());
        }
    }

    /// Move to the previous question, clamped at the first.
    pub fn retreat(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Flag one question as persisted.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::IndexOutOfRange` for a bad index.
    pub fn mark_saved(&mut self, index: usize) -> Result<(), SessionError> {
        self.check_index(index)?;
        self.saved[index] = true;
        Ok(())
    }

    /// Flag every question as persisted.
    pub fn mark_all_saved(&mut self) {
        self.saved.fill(true);
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("cursor", &self.cursor)
            .field("score", &self.score)
            .field("completed", &self.completed)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
