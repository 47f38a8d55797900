mod answer;
mod question;

pub use answer::{Answer, AnswerState, Correctness};
pub use question::{IndexPair, Question, QuestionError};
