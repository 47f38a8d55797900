#![forbid(unsafe_code)]

pub mod fs;
pub mod repository;

pub use fs::FsVault;
pub use repository::{InMemoryVault, PathKind, StorageError, Vault};
