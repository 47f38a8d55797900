#![forbid(unsafe_code)]

pub mod builder;
pub mod error;
pub mod saver;
pub mod session;
pub mod similarity;

pub use error::{OracleError, SaveError, SessionError};

pub use builder::{SessionBuilder, build_matching};
pub use saver::{QuizSaver, SaveReceipt};
pub use session::{QuizSession, SubmitOutcome};
pub use similarity::{EmbeddingSimilarityClient, OracleConfig, SimilarityOracle};
