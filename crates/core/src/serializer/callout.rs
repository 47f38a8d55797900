//! Callout record rendering.
//!
//! Each record is a `> [!question]` block followed by an optional
//! `>> [!failure]- Your Answer` block (only when a real submission differs
//! from the correct rendering) and an unconditional `>> [!success]- Answer`
//! block.

use crate::evaluator::{is_skip, select_all_correct};
use crate::model::{Answer, IndexPair, Question};

use super::labels::{RIGHT_LABEL_OFFSET, letter};

pub(crate) const ERROR_RECORD: &str = "> [!failure] Error saving question\n\n";

const FAILURE_HEADER: &str = ">> [!failure]- Your Answer\n";
const SUCCESS_HEADER: &str = ">> [!success]- Answer\n";

// The wildcard arm backs the sentinel error record for variants this
// serializer does not know.
#[allow(unreachable_patterns)]
pub(crate) fn render(question: &Question, answer: Option<&Answer>) -> String {
    match question {
        Question::TrueFalse { prompt, answer: key } => {
            let submitted = match answer {
                Some(Answer::Bool(value)) => Some(*value),
                _ => None,
            };
            let mut out = format!("> [!question] {prompt}\n");
            if let Some(value) = submitted {
                if value != *key {
                    out.push_str(FAILURE_HEADER);
                    out.push_str(&format!(">> {}\n", bool_label(value)));
                }
            }
            out.push_str(SUCCESS_HEADER);
            out.push_str(&format!(">> {}\n\n", bool_label(*key)));
            out
        }

        Question::MultipleChoice {
            prompt,
            options,
            answer: key,
        } => {
            let mut out = format!("> [!question] {prompt}\n");
            out.push_str(&option_lines(options, "> "));
            out.push('\n');
            if let Some(Answer::Choice(index)) = answer {
                if index != key {
                    if let Some(option) = options.get(*index) {
                        out.push_str(FAILURE_HEADER);
                        out.push_str(&format!(">> {}) {option}\n", letter(*index)));
                    }
                }
            }
            out.push_str(SUCCESS_HEADER);
            let correct = options.get(*key).map(String::as_str).unwrap_or_default();
            out.push_str(&format!(">> {}) {correct}\n\n", letter(*key)));
            out
        }

        Question::SelectAllThatApply {
            prompt,
            options,
            answer: key,
        } => {
            let mut out = format!("> [!question] {prompt}\n");
            out.push_str(&option_lines(options, "> "));
            out.push('\n');
            if let Some(Answer::Selection(selected)) = answer {
                if !selected.is_empty() && !select_all_correct(key, selected) {
                    out.push_str(FAILURE_HEADER);
                    out.push_str(&selected_option_lines(options, selected));
                }
            }
            out.push_str(SUCCESS_HEADER);
            out.push_str(&selected_option_lines(options, key));
            out.push('\n');
            out
        }

        Question::FillInTheBlank {
            prompt,
            answers: key,
        } => {
            let correct = key.join(", ");
            let mut out = format!("> [!question] {prompt}\n");
            if let Some(Answer::Blanks(slots)) = answer {
                let filled = joined_blanks(slots);
                if !filled.is_empty() && !is_skip(&filled) && filled != correct {
                    out.push_str(FAILURE_HEADER);
                    out.push_str(&format!(">> {filled}\n"));
                }
            }
            out.push_str(SUCCESS_HEADER);
            out.push_str(&format!(">> {correct}\n\n"));
            out
        }

        Question::Matching {
            prompt,
            left,
            right,
            key,
        } => {
            let correct_lines: Vec<String> = key
                .iter()
                .enumerate()
                .map(|(position, &target)| pair_line(position, target))
                .collect();

            let mut out = format!("> [!question] {prompt}\n");
            out.push_str(">> [!example] Group A\n");
            out.push_str(&option_lines(left, ">> "));
            out.push_str("\n>\n");
            out.push_str(">> [!example] Group B\n");
            out.push_str(&offset_option_lines(right));
            out.push_str("\n>\n");
            if let Some(Answer::Pairs(pairs)) = answer {
                if !pairs.is_empty() {
                    let submitted_lines = submitted_pair_lines(pairs);
                    if submitted_lines != correct_lines {
                        out.push_str(FAILURE_HEADER);
                        out.push_str(&submitted_lines.join("\n"));
                        out.push('\n');
                    }
                }
            }
            out.push_str(SUCCESS_HEADER);
            out.push_str(&correct_lines.join("\n"));
            out.push_str("\n\n");
            out
        }

        Question::ShortOrLongAnswer {
            prompt,
            answer: key,
        } => {
            let mut out = format!("> [!question] {prompt}\n");
            if let Some(Answer::Text(text)) = answer {
                if !text.is_empty() && !is_skip(text) && text != key {
                    out.push_str(FAILURE_HEADER);
                    out.push_str(&format!(">> {text}\n"));
                }
            }
            out.push_str(SUCCESS_HEADER);
            out.push_str(&format!(">> {key}\n\n"));
            out
        }

        _ => ERROR_RECORD.to_string(),
    }
}

fn bool_label(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

fn option_lines(options: &[String], prefix: &str) -> String {
    options
        .iter()
        .enumerate()
        .map(|(index, option)| format!("{prefix}{}) {option}", letter(index)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn offset_option_lines(options: &[String]) -> String {
    options
        .iter()
        .enumerate()
        .map(|(index, option)| format!(">> {}) {option}", letter(RIGHT_LABEL_OFFSET + index)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Empty slots are dropped before joining; an all-empty submission joins to
/// the empty string and reads as absent.
fn joined_blanks(slots: &[String]) -> String {
    slots
        .iter()
        .filter(|slot| !slot.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(", ")
}

fn selected_option_lines(options: &[String], selected: &[usize]) -> String {
    options
        .iter()
        .enumerate()
        .filter(|(index, _)| selected.contains(index))
        .map(|(index, option)| format!(">> {}) {option}\n", letter(index)))
        .collect()
}

fn pair_line(left: usize, right: usize) -> String {
    format!(">> {}) -> {})", letter(left), letter(RIGHT_LABEL_OFFSET + right))
}

/// Emitted sorted by left label regardless of selection order.
fn submitted_pair_lines(pairs: &[IndexPair]) -> Vec<String> {
    let mut pairs = pairs.to_vec();
    pairs.sort_by_key(|pair| pair.left);
    pairs
        .iter()
        .map(|pair| pair_line(pair.left, pair.right))
        .collect()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn true_false_mismatch_gets_failure_block() {
        let question = Question::true_false("The sky is green.", true);
        let record = render(&question, Some(&Answer::Bool(false)));

        assert!(record.contains(">> [!failure]- Your Answer\n>> False\n"));
        assert!(record.contains(">> [!success]- Answer\n>> True\n"));
    }

    #[test]
    fn true_false_match_has_no_failure_block() {
        let question = Question::true_false("The sky is blue.", true);
        let record = render(&question, Some(&Answer::Bool(true)));

        assert!(!record.contains("[!failure]"));
        assert!(record.contains(">> True"));
    }

    #[test]
    fn multiple_choice_letters_options() {
        let question = Question::multiple_choice(
            "Pick one.",
            vec!["first".into(), "second".into()],
            1,
        )
        .unwrap();
        let record = render(&question, Some(&Answer::Choice(0)));

        assert!(record.contains("> a) first\n> b) second\n"));
        assert!(record.contains(">> [!failure]- Your Answer\n>> a) first\n"));
        assert!(record.contains(">> [!success]- Answer\n>> b) second\n"));
    }

    #[test]
    fn select_all_equal_as_sets_has_no_failure_block() {
        let question = Question::select_all_that_apply(
            "Pick all.",
            vec!["x".into(), "y".into(), "z".into()],
            vec![0, 2],
        )
        .unwrap();
        let record = render(&question, Some(&Answer::Selection(vec![2, 0])));

        assert!(!record.contains("[!failure]"));
        assert!(record.contains(">> a) x\n>> c) z\n"));
    }

    #[test]
    fn empty_selection_is_treated_as_absent() {
        let question = Question::select_all_that_apply(
            "Pick all.",
            vec!["x".into(), "y".into()],
            vec![0],
        )
        .unwrap();
        let record = render(&question, Some(&Answer::Selection(Vec::new())));

        assert!(!record.contains("[!failure]"));
    }

    #[test]
    fn blank_submission_is_joined_and_compared() {
        let question = Question::fill_in_the_blank(
            "Capital: `__`, year: `__`.",
            vec!["Paris".into(), "1789".into()],
        )
        .unwrap();

        let wrong = render(
            &question,
            Some(&Answer::Blanks(vec!["Lyon".into(), "1789".into()])),
        );
        assert!(wrong.contains(">> [!failure]- Your Answer\n>> Lyon, 1789\n"));
        assert!(wrong.contains(">> [!success]- Answer\n>> Paris, 1789\n"));

        let empty = render(
            &question,
            Some(&Answer::Blanks(vec![String::new(), String::new()])),
        );
        assert!(!empty.contains("[!failure]"));
    }

    #[test]
    fn partially_filled_blanks_drop_the_empty_slots() {
        let question = Question::fill_in_the_blank(
            "Capital: `__`, year: `__`.",
            vec!["Paris".into(), "1789".into()],
        )
        .unwrap();

        let record = render(
            &question,
            Some(&Answer::Blanks(vec!["Paris".into(), String::new()])),
        );
        assert!(record.contains(">> [!failure]- Your Answer\n>> Paris\n"));
        assert!(record.contains(">> [!success]- Answer\n>> Paris, 1789\n"));
    }

    #[test]
    fn matching_renders_both_groups_and_sorted_pairs() {
        let question = Question::matching(
            "Match.",
            vec!["A".into(), "B".into()],
            vec!["1".into(), "2".into()],
            vec![1, 0],
        )
        .unwrap();
        let record = render(&question, None);

        assert!(record.contains(">> [!example] Group A\n>> a) A\n>> b) B\n"));
        assert!(record.contains(">> [!example] Group B\n>> n) 1\n>> o) 2\n"));
        assert!(record.contains(">> [!success]- Answer\n>> a) -> o)\n>> b) -> n)\n"));
    }

    #[test]
    fn matching_submission_is_sorted_by_left_label() {
        let question = Question::matching(
            "Match.",
            vec!["A".into(), "B".into()],
            vec!["1".into(), "2".into()],
            vec![0, 1],
        )
        .unwrap();
        let submitted = Answer::Pairs(vec![IndexPair::new(1, 0), IndexPair::new(0, 1)]);
        let record = render(&question, Some(&submitted));

        assert!(record.contains(
            ">> [!failure]- Your Answer\n>> a) -> o)\n>> b) -> n)\n"
        ));
    }

    #[test]
    fn short_answer_skip_never_shows_failure_block() {
        let question = Question::short_or_long_answer("Explain.", "Because.");
        let record = render(&question, Some(&Answer::Text("SKIP ".into())));

        assert!(!record.contains("[!failure]"));
        assert!(record.contains(">> Because.\n"));
    }

    #[test]
    fn canonical_answers_round_trip_without_failure_blocks() {
        let cases: Vec<(Question, Answer)> = vec![
            (Question::true_false("Q", true), Answer::Bool(true)),
            (
                Question::multiple_choice("Q", vec!["a".into(), "b".into()], 1).unwrap(),
                Answer::Choice(1),
            ),
            (
                Question::select_all_that_apply("Q", vec!["a".into(), "b".into()], vec![0, 1])
                    .unwrap(),
                Answer::Selection(vec![0, 1]),
            ),
            (
                Question::fill_in_the_blank("Q", vec!["x".into(), "y".into()]).unwrap(),
                Answer::Blanks(vec!["x".into(), "y".into()]),
            ),
            (
                Question::matching(
                    "Q",
                    vec!["A".into(), "B".into()],
                    vec!["1".into(), "2".into()],
                    vec![1, 0],
                )
                .unwrap(),
                Answer::Pairs(vec![IndexPair::new(0, 1), IndexPair::new(1, 0)]),
            ),
            (
                Question::short_or_long_answer("Q", "answer"),
                Answer::Text("answer".into()),
            ),
        ];

        for (question, answer) in &cases {
            let record = render(question, Some(answer));
            assert!(
                !record.contains("[!failure]"),
                "unexpected failure block in: {record}"
            );
        }
    }

    #[test]
    fn shape_mismatched_answer_is_treated_as_absent() {
        let question = Question::true_false("Q", true);
        let record = render(&question, Some(&Answer::Choice(3)));
        assert!(!record.contains("[!failure]"));
    }
}
