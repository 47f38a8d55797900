//! Spaced-repetition record rendering.
//!
//! Flat flashcard records: single-fact variants use the inline separator,
//! option-list variants use the multiline separator. The format has no place
//! for a "your answer" annotation, so submissions are never rendered.

use crate::model::Question;
use crate::settings::Separators;

use super::LONG_ANSWER_CUTOFF;
use super::labels::{RIGHT_LABEL_OFFSET, letter};

pub(crate) const ERROR_RECORD: &str = "Error saving question\n\n";

// The wildcard arm backs the sentinel error record for variants this
// serializer does not know.
#[allow(unreachable_patterns)]
pub(crate) fn render(question: &Question, separators: &Separators) -> String {
    let inline = &separators.inline;
    let multiline = &separators.multiline;

    match question {
        Question::TrueFalse { prompt, answer } => {
            let answer = if *answer { "True" } else { "False" };
            format!("**True or False:** {prompt} {inline} {answer}\n\n")
        }

        Question::MultipleChoice {
            prompt,
            options,
            answer,
        } => {
            let correct = options.get(*answer).map(String::as_str).unwrap_or_default();
            format!(
                "**Multiple Choice:** {prompt}\n{}\n{multiline}\n{}) {correct}\n\n",
                option_lines(options, 0),
                letter(*answer),
            )
        }

        Question::SelectAllThatApply {
            prompt,
            options,
            answer,
        } => {
            let correct = options
                .iter()
                .enumerate()
                .filter(|(index, _)| answer.contains(index))
                .map(|(index, option)| format!("{}) {option}", letter(index)))
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "**Select All That Apply:** {prompt}\n{}\n{multiline}\n{correct}\n\n",
                option_lines(options, 0),
            )
        }

        Question::FillInTheBlank { prompt, answers } => {
            format!(
                "**Fill in the Blank:** {prompt} {inline} {}\n\n",
                answers.join(", ")
            )
        }

        Question::Matching {
            prompt,
            left,
            right,
            key,
        } => {
            let pairs = key
                .iter()
                .enumerate()
                .map(|(position, &target)| {
                    format!(
                        "{}) -> {})",
                        letter(position),
                        letter(RIGHT_LABEL_OFFSET + target)
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "**Matching:** {prompt}\nGroup A\n{}\nGroup B\n{}\n{multiline}\n{pairs}\n\n",
                option_lines(left, 0),
                option_lines(right, RIGHT_LABEL_OFFSET),
            )
        }

        Question::ShortOrLongAnswer { prompt, answer } => {
            let label = if answer.chars().count() < LONG_ANSWER_CUTOFF {
                "Short Answer"
            } else {
                "Long Answer"
            };
            format!("**{label}:** {prompt} {inline} {answer}\n\n")
        }

        _ => ERROR_RECORD.to_string(),
    }
}

fn option_lines(options: &[String], start: usize) -> String {
    options
        .iter()
        .enumerate()
        .map(|(index, option)| format!("{}) {option}", letter(start + index)))
        .collect::<Vec<_>>()
        .join("\n")
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Answer, IndexPair};
    use crate::serializer::render_record;
    use crate::settings::SaveFormat;

    fn seps() -> Separators {
        Separators::default()
    }

    #[test]
    fn true_false_uses_inline_separator() {
        let question = Question::true_false("Water is wet.", true);
        let record = render(&question, &seps());
        assert_eq!(record, "**True or False:** Water is wet. :: True\n\n");
    }

    #[test]
    fn custom_separators_are_used_verbatim() {
        let separators = Separators {
            inline: ";;".to_string(),
            multiline: "???".to_string(),
        };
        let question = Question::true_false("Q", false);
        assert_eq!(
            render(&question, &separators),
            "**True or False:** Q ;; False\n\n"
        );
    }

    #[test]
    fn multiple_choice_uses_multiline_separator() {
        let question = Question::multiple_choice(
            "Pick.",
            vec!["one".into(), "two".into()],
            1,
        )
        .unwrap();
        let record = render(&question, &seps());
        assert_eq!(
            record,
            "**Multiple Choice:** Pick.\na) one\nb) two\n?\nb) two\n\n"
        );
    }

    #[test]
    fn matching_offsets_right_column_labels() {
        let question = Question::matching(
            "Match.",
            vec!["A".into(), "B".into()],
            vec!["1".into(), "2".into()],
            vec![1, 0],
        )
        .unwrap();
        let record = render(&question, &seps());
        assert_eq!(
            record,
            "**Matching:** Match.\nGroup A\na) A\nb) B\nGroup B\nn) 1\no) 2\n?\na) -> o)\nb) -> n)\n\n"
        );
    }

    #[test]
    fn long_reference_answers_are_relabeled() {
        let short = Question::short_or_long_answer("Q", "brief");
        assert!(render(&short, &seps()).starts_with("**Short Answer:**"));

        let long = Question::short_or_long_answer("Q", "x".repeat(250));
        assert!(render(&long, &seps()).starts_with("**Long Answer:**"));
    }

    #[test]
    fn submissions_never_appear_in_spaced_output() {
        let question = Question::matching(
            "Match.",
            vec!["A".into(), "B".into()],
            vec!["1".into(), "2".into()],
            vec![0, 1],
        )
        .unwrap();
        let wrong = Answer::Pairs(vec![IndexPair::new(0, 1), IndexPair::new(1, 0)]);
        let record = render_record(
            &question,
            Some(&wrong),
            SaveFormat::SpacedRepetition,
            &seps(),
        );

        assert!(!record.contains("failure"));
        assert!(!record.contains("Your Answer"));
    }
}
