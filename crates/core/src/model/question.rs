use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// One left-to-right position pairing on a matching board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IndexPair {
    pub left: usize,
    pub right: usize,
}

impl IndexPair {
    #[must_use]
    pub fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }
}

/// A quiz question with its embedded answer key.
///
/// The variant set is closed; a record serializer still has to survive data
/// it does not recognize, so downstream matches keep a fallback arm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum Question {
    TrueFalse {
        prompt: String,
        answer: bool,
    },
    MultipleChoice {
        prompt: String,
        options: Vec<String>,
        answer: usize,
    },
    SelectAllThatApply {
        prompt: String,
        options: Vec<String>,
        answer: Vec<usize>,
    },
    FillInTheBlank {
        prompt: String,
        answers: Vec<String>,
    },
    /// `left` and `right` are the fixed display orderings of the two columns,
    /// established once when the question instance is built. `key[i]` is the
    /// right-column position matched to left-column position `i`; the
    /// bijection is keyed by positions, not by option text.
    Matching {
        prompt: String,
        left: Vec<String>,
        right: Vec<String>,
        key: Vec<usize>,
    },
    ShortOrLongAnswer {
        prompt: String,
        answer: String,
    },
}

impl Question {
    #[must_use]
    pub fn true_false(prompt: impl Into<String>, answer: bool) -> Self {
        Self::TrueFalse {
            prompt: prompt.into(),
            answer,
        }
    }

    /// # Errors
    ///
    /// Returns `QuestionError` if `options` is empty or `answer` is out of range.
    pub fn multiple_choice(
        prompt: impl Into<String>,
        options: Vec<String>,
        answer: usize,
    ) -> Result<Self, QuestionError> {
        if options.is_empty() {
            return Err(QuestionError::EmptyOptions);
        }
        if answer >= options.len() {
            return Err(QuestionError::AnswerIndexOutOfRange {
                index: answer,
                len: options.len(),
            });
        }
        Ok(Self::MultipleChoice {
            prompt: prompt.into(),
            options,
            answer,
        })
    }

    /// # Errors
    ///
    /// Returns `QuestionError` if `options` is empty or any answer index is
    /// out of range.
    pub fn select_all_that_apply(
        prompt: impl Into<String>,
        options: Vec<String>,
        answer: Vec<usize>,
    ) -> Result<Self, QuestionError> {
        if options.is_empty() {
            return Err(QuestionError::EmptyOptions);
        }
        if let Some(&index) = answer.iter().find(|&&index| index >= options.len()) {
            return Err(QuestionError::AnswerIndexOutOfRange {
                index,
                len: options.len(),
            });
        }
        Ok(Self::SelectAllThatApply {
            prompt: prompt.into(),
            options,
            answer,
        })
    }

    /// # Errors
    ///
    /// Returns `QuestionError::NoBlanks` if `answers` is empty.
    pub fn fill_in_the_blank(
        prompt: impl Into<String>,
        answers: Vec<String>,
    ) -> Result<Self, QuestionError> {
        if answers.is_empty() {
            return Err(QuestionError::NoBlanks);
        }
        Ok(Self::FillInTheBlank {
            prompt: prompt.into(),
            answers,
        })
    }

    /// Build a matching question from already-ordered columns and a
    /// position-keyed bijection.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the columns and key differ in length or
    /// `key` is not a permutation of the right-column positions.
    pub fn matching(
        prompt: impl Into<String>,
        left: Vec<String>,
        right: Vec<String>,
        key: Vec<usize>,
    ) -> Result<Self, QuestionError> {
        if left.is_empty() {
            return Err(QuestionError::EmptyOptions);
        }
        if left.len() != right.len() || key.len() != left.len() {
            return Err(QuestionError::MismatchedColumns {
                left: left.len(),
                right: right.len(),
                key: key.len(),
            });
        }
        let mut seen = vec![false; right.len()];
        for &target in &key {
            if target >= right.len() || seen[target] {
                return Err(QuestionError::InvalidKey);
            }
            seen[target] = true;
        }
        Ok(Self::Matching {
            prompt: prompt.into(),
            left,
            right,
            key,
        })
    }

    #[must_use]
    pub fn short_or_long_answer(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self::ShortOrLongAnswer {
            prompt: prompt.into(),
            answer: answer.into(),
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        match self {
            Self::TrueFalse { prompt, .. }
            | Self::MultipleChoice { prompt, .. }
            | Self::SelectAllThatApply { prompt, .. }
            | Self::FillInTheBlank { prompt, .. }
            | Self::Matching { prompt, .. }
            | Self::ShortOrLongAnswer { prompt, .. } => prompt,
        }
    }
}

//
// ─── QUESTION VALIDATION ERRORS ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question has no options")]
    EmptyOptions,

    #[error("answer index {index} out of range for {len} options")]
    AnswerIndexOutOfRange { index: usize, len: usize },

    #[error("fill-in-the-blank question has no blanks")]
    NoBlanks,

    #[error("matching columns and key differ in length: left {left}, right {right}, key {key}")]
    MismatchedColumns {
        left: usize,
        right: usize,
        key: usize,
    },

    #[error("matching key is not a permutation of the right column")]
    InvalidKey,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiple_choice_rejects_out_of_range_key() {
        let err = Question::multiple_choice("Q", vec!["a".into(), "b".into()], 2).unwrap_err();
        assert_eq!(
            err,
            QuestionError::AnswerIndexOutOfRange { index: 2, len: 2 }
        );
    }

    #[test]
    fn select_all_rejects_out_of_range_indices() {
        let err =
            Question::select_all_that_apply("Q", vec!["a".into(), "b".into()], vec![0, 5])
                .unwrap_err();
        assert!(matches!(err, QuestionError::AnswerIndexOutOfRange { .. }));
    }

    #[test]
    fn matching_rejects_duplicate_key_targets() {
        let err = Question::matching(
            "Q",
            vec!["A".into(), "B".into()],
            vec!["1".into(), "2".into()],
            vec![0, 0],
        )
        .unwrap_err();
        assert_eq!(err, QuestionError::InvalidKey);
    }

    #[test]
    fn matching_rejects_mismatched_columns() {
        let err = Question::matching(
            "Q",
            vec!["A".into(), "B".into()],
            vec!["1".into()],
            vec![0, 1],
        )
        .unwrap_err();
        assert!(matches!(err, QuestionError::MismatchedColumns { .. }));
    }

    #[test]
    fn valid_matching_builds() {
        let question = Question::matching(
            "Q",
            vec!["A".into(), "B".into()],
            vec!["1".into(), "2".into()],
            vec![1, 0],
        )
        .unwrap();
        assert_eq!(question.prompt(), "Q");
    }
}
