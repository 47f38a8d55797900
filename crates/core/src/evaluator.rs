//! Per-variant correctness checks.
//!
//! Every function here is pure and total. Submitted values are compared
//! exactly as received; case or whitespace normalization is the submitter's
//! concern. The one variant that cannot be decided locally is
//! short/long answer, where the caller obtains a similarity score from an
//! external oracle and applies [`short_answer_verdict`].

use std::collections::BTreeSet;

use crate::model::{Answer, IndexPair, Question};

/// Minimum similarity for a short/long answer to count as correct.
pub const SIMILARITY_THRESHOLD: f64 = 0.80;

/// Typing this (case-insensitive, trimmed) reveals the answer and is always
/// scored incorrect.
pub const SKIP_SENTINEL: &str = "skip";

#[must_use]
pub fn is_skip(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(SKIP_SENTINEL)
}

#[must_use]
pub fn true_false_correct(key: bool, submitted: bool) -> bool {
    submitted == key
}

#[must_use]
pub fn multiple_choice_correct(key: usize, submitted: usize) -> bool {
    submitted == key
}

/// Set equality: order and duplicates in either side are irrelevant.
#[must_use]
pub fn select_all_correct(key: &[usize], submitted: &[usize]) -> bool {
    let key: BTreeSet<usize> = key.iter().copied().collect();
    let submitted: BTreeSet<usize> = submitted.iter().copied().collect();
    key == submitted
}

/// Every blank must match its answer exactly; a partial fill is never
/// correct, and a slot holding the skip sentinel never matches.
#[must_use]
pub fn fill_in_blank_correct(key: &[String], submitted: &[String]) -> bool {
    if submitted.len() != key.len() {
        return false;
    }
    if submitted.iter().any(|slot| is_skip(slot)) {
        return false;
    }
    submitted.iter().zip(key).all(|(slot, answer)| slot == answer)
}

/// `key[i]` is the right position matched to left position `i`. The
/// submission must pair every left position with its keyed right position.
#[must_use]
pub fn matching_correct(key: &[usize], submitted: &[IndexPair]) -> bool {
    if submitted.len() != key.len() {
        return false;
    }
    submitted
        .iter()
        .all(|pair| key.get(pair.left) == Some(&pair.right))
}

#[must_use]
pub fn short_answer_verdict(similarity: f64) -> bool {
    similarity >= SIMILARITY_THRESHOLD
}

/// Dispatch to the variant's check.
///
/// Returns `None` when the answer shape does not fit the question, or for
/// short/long answers, whose verdict requires the external similarity oracle.
#[must_use]
pub fn evaluate(question: &Question, answer: &Answer) -> Option<bool> {
    match (question, answer) {
        (Question::TrueFalse { answer: key, .. }, Answer::Bool(submitted)) => {
            Some(true_false_correct(*key, *submitted))
        }
        (Question::MultipleChoice { answer: key, .. }, Answer::Choice(submitted)) => {
            Some(multiple_choice_correct(*key, *submitted))
        }
        (Question::SelectAllThatApply { answer: key, .. }, Answer::Selection(submitted)) => {
            Some(select_all_correct(key, submitted))
        }
        (Question::FillInTheBlank { answers: key, .. }, Answer::Blanks(submitted)) => {
            Some(fill_in_blank_correct(key, submitted))
        }
        (Question::Matching { key, .. }, Answer::Pairs(submitted)) => {
            Some(matching_correct(key, submitted))
        }
        _ => None,
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_all_ignores_order_and_duplicates() {
        assert!(select_all_correct(&[1, 2], &[2, 1]));
        assert!(select_all_correct(&[1, 2], &[1, 2, 2]));
        assert!(!select_all_correct(&[1, 2], &[1]));
        assert!(!select_all_correct(&[1, 2], &[1, 2, 3]));
    }

    #[test]
    fn blanks_require_every_position() {
        let key = vec!["Paris".to_string(), "1789".to_string()];

        assert!(fill_in_blank_correct(&key, &[
            "Paris".to_string(),
            "1789".to_string()
        ]));
        assert!(!fill_in_blank_correct(&key, &[
            "Paris".to_string(),
            String::new()
        ]));
        assert!(!fill_in_blank_correct(&key, &["Paris".to_string()]));
    }

    #[test]
    fn blanks_compare_exactly_normalization_is_upstream() {
        // The evaluator sees already-normalized slots; a lowercased
        // submission against a mixed-case key is incorrect here and must be
        // normalized before submission to pass.
        let key = vec!["Paris".to_string(), "1789".to_string()];
        assert!(!fill_in_blank_correct(&key, &[
            "paris".to_string(),
            "1789".to_string()
        ]));
    }

    #[test]
    fn blank_slot_holding_skip_is_incorrect() {
        let key = vec!["skip".to_string()];
        assert!(!fill_in_blank_correct(&key, &["skip".to_string()]));
        assert!(!fill_in_blank_correct(&key, &[" SKIP ".to_string()]));
    }

    #[test]
    fn matching_requires_full_correct_bijection() {
        // Canonical pairs {(A,1),(B,2)} with key positions [0, 1].
        let key = vec![0, 1];

        assert!(matching_correct(&key, &[
            IndexPair::new(0, 0),
            IndexPair::new(1, 1)
        ]));
        // Crossed pairing.
        assert!(!matching_correct(&key, &[
            IndexPair::new(0, 1),
            IndexPair::new(1, 0)
        ]));
        // Size mismatch.
        assert!(!matching_correct(&key, &[IndexPair::new(0, 0)]));
        // Left position off the board.
        assert!(!matching_correct(&key, &[
            IndexPair::new(0, 0),
            IndexPair::new(5, 1)
        ]));
    }

    #[test]
    fn matching_ignores_submission_order() {
        let key = vec![1, 0];
        assert!(matching_correct(&key, &[
            IndexPair::new(1, 0),
            IndexPair::new(0, 1)
        ]));
    }

    #[test]
    fn short_answer_threshold_is_inclusive() {
        assert!(short_answer_verdict(0.80));
        assert!(!short_answer_verdict(0.79));
        assert!(short_answer_verdict(1.0));
    }

    #[test]
    fn skip_sentinel_is_case_and_whitespace_insensitive() {
        assert!(is_skip("skip"));
        assert!(is_skip("  SKIP "));
        assert!(is_skip("Skip"));
        assert!(!is_skip("skipped"));
    }

    #[test]
    fn evaluate_rejects_mismatched_shapes() {
        let question = Question::true_false("Q", true);
        assert_eq!(evaluate(&question, &Answer::Choice(0)), None);
        assert_eq!(evaluate(&question, &Answer::Bool(true)), Some(true));
    }

    #[test]
    fn evaluate_defers_short_answers_to_the_oracle() {
        let question = Question::short_or_long_answer("Q", "reference");
        assert_eq!(
            evaluate(&question, &Answer::Text("reference".to_string())),
            None
        );
    }
}
