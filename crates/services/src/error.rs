//! Shared error types for the services crate.

use thiserror::Error;

use storage::StorageError;

/// Errors emitted by the similarity oracle.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OracleError {
    #[error("similarity oracle is not configured")]
    Disabled,
    #[error("similarity oracle returned an empty response")]
    EmptyResponse,
    #[error("similarity request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `QuizSession`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    Empty,
    #[error("question index {index} out of range for {len} questions")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("answer shape does not fit the question variant")]
    AnswerShape,
    #[error("short or long answers go through the oracle submission path")]
    NeedsOracle,
    #[error("evaluation failed: {0}")]
    Evaluation(#[from] OracleError),
}

/// Errors emitted by `QuizSaver`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SaveError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
