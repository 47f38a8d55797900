#![forbid(unsafe_code)]

pub mod error;
pub mod evaluator;
pub mod model;
pub mod serializer;
pub mod settings;

pub use error::Error;
pub use model::{Answer, AnswerState, Correctness, IndexPair, Question, QuestionError};
pub use serializer::{LONG_ANSWER_CUTOFF, render_record};
pub use settings::{QuizSettings, QuizSettingsDraft, SaveFormat, Separators, SettingsError};
