use rand::rng;
use rand::seq::SliceRandom;

use quiz_core::model::{Question, QuestionError};

use crate::error::SessionError;
use crate::session::QuizSession;

/// Builds a session, optionally shuffling the question order.
pub struct SessionBuilder {
    questions: Vec<Question>,
    randomize: bool,
}

impl SessionBuilder {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            randomize: false,
        }
    }

    /// Enable or disable shuffling of the question sequence.
    #[must_use]
    pub fn with_randomize(mut self, randomize: bool) -> Self {
        self.randomize = randomize;
        self
    }

    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no questions were provided.
    pub fn build(self) -> Result<QuizSession, SessionError> {
        let mut questions = self.questions;
        if self.randomize {
            questions.shuffle(&mut rng());
        }
        QuizSession::new(questions)
    }
}

/// Build a matching question from canonical `(left, right)` text pairs.
///
/// Both columns are shuffled independently, once, here; the resulting board
/// layout and position-keyed bijection are then fixed for the lifetime of the
/// question instance.
///
/// # Errors
///
/// Returns `QuestionError::EmptyOptions` if `pairs` is empty.
pub fn build_matching(
    prompt: impl Into<String>,
    pairs: Vec<(String, String)>,
) -> Result<Question, QuestionError> {
    let n = pairs.len();
    let mut rng = rng();

    let mut left_order: Vec<usize> = (0..n).collect();
    let mut right_order: Vec<usize> = (0..n).collect();
    left_order.shuffle(&mut rng);
    right_order.shuffle(&mut rng);

    // Position of each canonical pair's right option on the shuffled board.
    let mut right_position = vec![0; n];
    for (position, &pair_index) in right_order.iter().enumerate() {
        right_position[pair_index] = position;
    }

    let left: Vec<String> = left_order.iter().map(|&i| pairs[i].0.clone()).collect();
    let right: Vec<String> = right_order.iter().map(|&i| pairs[i].1.clone()).collect();
    let key: Vec<usize> = left_order.iter().map(|&i| right_position[i]).collect();

    Question::matching(prompt, left, right, key)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_all_questions() {
        let session = SessionBuilder::new(vec![
            Question::true_false("Q1", true),
            Question::true_false("Q2", false),
            Question::true_false("Q3", true),
        ])
        .with_randomize(true)
        .build()
        .unwrap();

        assert_eq!(session.len(), 3);
        let prompts: Vec<&str> = (0..3)
            .map(|i| session.question(i).unwrap().prompt())
            .collect();
        for prompt in ["Q1", "Q2", "Q3"] {
            assert!(prompts.contains(&prompt));
        }
    }

    #[test]
    fn build_matching_preserves_the_bijection() {
        let pairs = vec![
            ("France".to_string(), "Paris".to_string()),
            ("Japan".to_string(), "Tokyo".to_string()),
            ("Peru".to_string(), "Lima".to_string()),
        ];
        let question = build_matching("Match countries.", pairs.clone()).unwrap();

        let Question::Matching { left, right, key, .. } = &question else {
            panic!("expected a matching question");
        };
        assert_eq!(left.len(), 3);
        assert_eq!(right.len(), 3);

        // Whatever the shuffle did, following the key from each left option
        // must land on its canonical partner.
        for (position, left_option) in left.iter().enumerate() {
            let expected = pairs
                .iter()
                .find(|(l, _)| l == left_option)
                .map(|(_, r)| r)
                .unwrap();
            assert_eq!(&right[key[position]], expected);
        }
    }

    #[test]
    fn build_matching_rejects_empty_input() {
        let err = build_matching("Q", Vec::new()).unwrap_err();
        assert_eq!(err, QuestionError::EmptyOptions);
    }
}
