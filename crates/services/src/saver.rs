use std::sync::Arc;

use quiz_core::model::{Answer, Question};
use quiz_core::serializer::render_record;
use quiz_core::settings::{QuizSettings, SaveFormat};
use storage::{PathKind, StorageError, Vault};

use crate::error::SaveError;

/// Where a save landed and whether the configured folder had to be ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    pub path: String,
    pub used_fallback: bool,
}

/// Persists rendered quiz records into a vault document.
///
/// The target document is chosen once at construction: the first free
/// `Quiz N.md` name inside the configured folder, or inside the vault root
/// when the configured folder does not resolve (the receipt reports that
/// fallback). The document is created lazily on the first save and only ever
/// appended to afterwards.
pub struct QuizSaver {
    vault: Arc<dyn Vault>,
    settings: QuizSettings,
    sources: Vec<String>,
    save_file_path: String,
    valid_save_path: bool,
}

impl QuizSaver {
    /// Resolve the save location and allocate the document name.
    ///
    /// # Errors
    ///
    /// Returns `SaveError` if the vault cannot be queried.
    pub async fn new(
        vault: Arc<dyn Vault>,
        settings: QuizSettings,
        sources: Vec<String>,
    ) -> Result<Self, SaveError> {
        let folder = settings.save_path();
        // A malformed configured folder means "fall back to the root", not a
        // construction failure.
        let valid_save_path = match vault.resolve(folder).await {
            Ok(kind) => kind == PathKind::Folder,
            Err(StorageError::InvalidPath(_)) => false,
            Err(err) => return Err(err.into()),
        };
        let list_folder = if valid_save_path { folder } else { "" };

        let taken: Vec<String> = vault
            .list_documents(list_folder)
            .await?
            .into_iter()
            .map(|name| name.to_lowercase())
            .filter(|name| name.starts_with("quiz"))
            .collect();
        let mut count = 1_usize;
        while taken.contains(&format!("quiz {count}.md")) {
            count += 1;
        }

        let save_file_path = if valid_save_path && !folder.is_empty() {
            format!("{folder}/Quiz {count}.md")
        } else {
            format!("Quiz {count}.md")
        };

        Ok(Self {
            vault,
            settings,
            sources,
            save_file_path,
            valid_save_path,
        })
    }

    #[must_use]
    pub fn save_file_path(&self) -> &str {
        &self.save_file_path
    }

    /// False when saves fall back to the vault root.
    #[must_use]
    pub fn valid_save_path(&self) -> bool {
        self.valid_save_path
    }

    fn receipt(&self) -> SaveReceipt {
        SaveReceipt {
            path: self.save_file_path.clone(),
            used_fallback: !self.valid_save_path,
        }
    }

    fn initial_content(&self) -> String {
        let sources_property = match self.settings.material_property() {
            Some(property) if !self.sources.is_empty() => {
                let links = self
                    .sources
                    .iter()
                    .map(|source| format!("  - \"[[{source}]]\""))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("{property}:\n{links}\n")
            }
            _ => String::new(),
        };

        match self.settings.save_format() {
            SaveFormat::SpacedRepetition => {
                format!("---\ntags:\n  - flashcards\n{sources_property}---\n")
            }
            SaveFormat::Callout if !sources_property.is_empty() => {
                format!("---\n{sources_property}---\n")
            }
            SaveFormat::Callout => String::new(),
        }
    }

    async fn ensure_document(&self) -> Result<(), SaveError> {
        if self.vault.resolve(&self.save_file_path).await? == PathKind::Document {
            return Ok(());
        }
        self.vault
            .create_document(&self.save_file_path, &self.initial_content())
            .await?;
        Ok(())
    }

    /// Append one rendered record.
    ///
    /// # Errors
    ///
    /// Returns `SaveError` if the document cannot be created or appended to.
    pub async fn save_question(
        &self,
        question: &Question,
        answer: Option<&Answer>,
    ) -> Result<SaveReceipt, SaveError> {
        self.ensure_document().await?;
        let record = render_record(
            question,
            answer,
            self.settings.save_format(),
            self.settings.separators(),
        );
        self.vault.append(&self.save_file_path, &record).await?;
        Ok(self.receipt())
    }

    /// Render every item and append them in one write.
    ///
    /// An empty batch writes nothing (and does not create the document).
    ///
    /// # Errors
    ///
    /// Returns `SaveError` if the document cannot be created or appended to.
    pub async fn save_all(
        &self,
        items: &[(&Question, Option<&Answer>)],
    ) -> Result<SaveReceipt, SaveError> {
        if items.is_empty() {
            return Ok(self.receipt());
        }
        let batch: String = items
            .iter()
            .map(|(question, answer)| {
                render_record(
                    question,
                    *answer,
                    self.settings.save_format(),
                    self.settings.separators(),
                )
            })
            .collect();

        self.ensure_document().await?;
        self.vault.append(&self.save_file_path, &batch).await?;
        Ok(self.receipt())
    }
}
