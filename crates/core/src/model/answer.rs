use serde::{Deserialize, Serialize};

use crate::model::{IndexPair, Question};

//
// ─── SUBMITTED ANSWERS ─────────────────────────────────────────────────────────
//

/// A submitted answer, shaped per question variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Answer {
    Bool(bool),
    Choice(usize),
    Selection(Vec<usize>),
    Blanks(Vec<String>),
    Pairs(Vec<IndexPair>),
    Text(String),
}

impl Answer {
    /// Whether this answer has the shape the given question expects.
    #[must_use]
    pub fn fits(&self, question: &Question) -> bool {
        matches!(
            (self, question),
            (Self::Bool(_), Question::TrueFalse { .. })
                | (Self::Choice(_), Question::MultipleChoice { .. })
                | (Self::Selection(_), Question::SelectAllThatApply { .. })
                | (Self::Blanks(_), Question::FillInTheBlank { .. })
                | (Self::Pairs(_), Question::Matching { .. })
                | (Self::Text(_), Question::ShortOrLongAnswer { .. })
        )
    }
}

//
// ─── ANSWER STATE ──────────────────────────────────────────────────────────────
//

/// Verdict for an answered question. Set at most once per question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Correctness {
    #[default]
    Unknown,
    Correct,
    Incorrect,
}

/// Per-question mutable state within a session.
///
/// `value` may be rewritten after the verdict is locked (the serializer still
/// reads it), but `correctness` transitions away from `Unknown` exactly once.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnswerState {
    value: Option<Answer>,
    correctness: Correctness,
}

impl AnswerState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn value(&self) -> Option<&Answer> {
        self.value.as_ref()
    }

    #[must_use]
    pub fn correctness(&self) -> Correctness {
        self.correctness
    }

    /// A question is locked once its verdict has been recorded.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.correctness != Correctness::Unknown
    }

    pub fn record_value(&mut self, answer: Answer) {
        self.value = Some(answer);
    }

    /// Record the verdict if none has been recorded yet.
    ///
    /// Returns `true` when the verdict was applied; `false` when the question
    /// was already locked and the call was a no-op.
    pub fn lock(&mut self, correct: bool) -> bool {
        if self.is_locked() {
            return false;
        }
        self.correctness = if correct {
            Correctness::Correct
        } else {
            Correctness::Incorrect
        };
        true
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
