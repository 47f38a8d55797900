use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by vault adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("already exists")]
    AlreadyExists,

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("io error: {0}")]
    Io(String),
}

/// What a vault path resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Document,
    Folder,
    Missing,
}

/// Append-only store of named text documents grouped in folders.
///
/// Paths are `/`-separated and relative to the vault root; the empty path is
/// the root folder. Documents are only ever created and appended to, never
/// truncated or rewritten.
#[async_trait]
pub trait Vault: Send + Sync {
    /// Classify a path.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for malformed paths or adapter failures.
    async fn resolve(&self, path: &str) -> Result<PathKind, StorageError>;

    /// Create a document with initial content.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::AlreadyExists` if the document exists.
    async fn create_document(&self, path: &str, initial_content: &str)
    -> Result<(), StorageError>;

    /// Append text to an existing document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the document is missing.
    async fn append(&self, path: &str, text: &str) -> Result<(), StorageError>;

    /// Names of documents directly inside `folder`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the folder is missing.
    async fn list_documents(&self, folder: &str) -> Result<Vec<String>, StorageError>;
}

fn split_parent(path: &str) -> (&str, &str) {
    path.rsplit_once('/').unwrap_or(("", path))
}

/// Simple in-memory vault for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryVault {
    documents: Arc<Mutex<HashMap<String, String>>>,
    folders: Arc<Mutex<HashSet<String>>>,
}

impl InMemoryVault {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a folder so paths under it resolve.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the lock is poisoned.
    pub fn add_folder(&self, path: &str) -> Result<(), StorageError> {
        let mut guard = self
            .folders
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        guard.insert(path.to_string());
        Ok(())
    }

    /// Full content of a document, for assertions.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the document is missing.
    pub fn content(&self, path: &str) -> Result<String, StorageError> {
        let guard = self
            .documents
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        guard.get(path).cloned().ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl Vault for InMemoryVault {
    async fn resolve(&self, path: &str) -> Result<PathKind, StorageError> {
        if path.is_empty() {
            return Ok(PathKind::Folder);
        }
        let documents = self
            .documents
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        if documents.contains_key(path) {
            return Ok(PathKind::Document);
        }
        let folders = self
            .folders
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        let prefix = format!("{path}/");
        if folders.contains(path) || documents.keys().any(|key| key.starts_with(&prefix)) {
            return Ok(PathKind::Folder);
        }
        Ok(PathKind::Missing)
    }

    async fn create_document(
        &self,
        path: &str,
        initial_content: &str,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .documents
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        if guard.contains_key(path) {
            return Err(StorageError::AlreadyExists);
        }
        guard.insert(path.to_string(), initial_content.to_string());
        Ok(())
    }

    async fn append(&self, path: &str, text: &str) -> Result<(), StorageError> {
        let mut guard = self
            .documents
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        match guard.get_mut(path) {
            Some(content) => {
                content.push_str(text);
                Ok(())
            }
            None => Err(StorageError::NotFound),
        }
    }

    async fn list_documents(&self, folder: &str) -> Result<Vec<String>, StorageError> {
        if self.resolve(folder).await? != PathKind::Folder {
            return Err(StorageError::NotFound);
        }
        let guard = self
            .documents
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        let mut names: Vec<String> = guard
            .keys()
            .filter_map(|key| {
                let (parent, name) = split_parent(key);
                (parent == folder).then(|| name.to_string())
            })
            .collect();
        names.sort();
        Ok(names)
    }
}
