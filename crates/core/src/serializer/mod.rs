//! Dual-format record serialization.
//!
//! A record is derived text, never stored by this crate: callers hand it to a
//! storage collaborator. The submitted answer is optional and only influences
//! the callout format; spaced-repetition records are submission-blind.

mod callout;
mod labels;
mod spaced;

use crate::model::{Answer, Question};
use crate::settings::{SaveFormat, Separators};

/// Reference answers at or past this length are labeled "Long Answer" in
/// spaced-repetition output. Purely a label choice.
pub const LONG_ANSWER_CUTOFF: usize = 250;

/// Render one persisted record for the given format.
///
/// An unrecognized question variant yields a literal error record instead of
/// failing, so a batch save cannot be aborted by one malformed entry.
#[must_use]
pub fn render_record(
    question: &Question,
    answer: Option<&Answer>,
    format: SaveFormat,
    separators: &Separators,
) -> String {
    match format {
        SaveFormat::Callout => callout::render(question, answer),
        SaveFormat::SpacedRepetition => spaced::render(question, separators),
    }
}
