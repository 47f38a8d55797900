use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::repository::{PathKind, StorageError, Vault};

/// Filesystem-backed vault rooted at a directory.
///
/// Documents are plain files under the root; appends open the file in append
/// mode so existing content is never rewritten.
#[derive(Clone, Debug)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn locate(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path);
        let escapes = relative.components().any(|component| {
            matches!(
                component,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes {
            return Err(StorageError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl Vault for FsVault {
    async fn resolve(&self, path: &str) -> Result<PathKind, StorageError> {
        let target = self.locate(path)?;
        match tokio::fs::metadata(&target).await {
            Ok(meta) if meta.is_dir() => Ok(PathKind::Folder),
            Ok(_) => Ok(PathKind::Document),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(PathKind::Missing),
            Err(err) => Err(StorageError::Io(err.to_string())),
        }
    }

    async fn create_document(
        &self,
        path: &str,
        initial_content: &str,
    ) -> Result<(), StorageError> {
        let target = self.locate(path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| StorageError::Io(err.to_string()))?;
        }
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::AlreadyExists => StorageError::AlreadyExists,
                _ => StorageError::Io(err.to_string()),
            })?;
        file.write_all(initial_content.as_bytes())
            .await
            .map_err(|err| StorageError::Io(err.to_string()))?;
        file.flush()
            .await
            .map_err(|err| StorageError::Io(err.to_string()))
    }

    async fn append(&self, path: &str, text: &str) -> Result<(), StorageError> {
        let target = self.locate(path)?;
        let mut file = OpenOptions::new()
            .append(true)
            .open(&target)
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => StorageError::NotFound,
                _ => StorageError::Io(err.to_string()),
            })?;
        file.write_all(text.as_bytes())
            .await
            .map_err(|err| StorageError::Io(err.to_string()))?;
        file.flush()
            .await
            .map_err(|err| StorageError::Io(err.to_string()))
    }

    async fn list_documents(&self, folder: &str) -> Result<Vec<String>, StorageError> {
        let target = self.locate(folder)?;
        let mut entries = tokio::fs::read_dir(&target)
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => StorageError::NotFound,
                _ => StorageError::Io(err.to_string()),
            })?;
        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|err| StorageError::Io(err.to_string()))?
        {
            let kind = entry
                .file_type()
                .await
                .map_err(|err| StorageError::Io(err.to_string()))?;
            if kind.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}
