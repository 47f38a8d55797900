use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which persisted text encoding a session writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveFormat {
    #[default]
    Callout,
    SpacedRepetition,
}

/// Separator tokens used verbatim in spaced-repetition output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Separators {
    pub inline: String,
    pub multiline: String,
}

impl Default for Separators {
    fn default() -> Self {
        Self {
            inline: "::".to_string(),
            multiline: "?".to_string(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("inline separator is empty")]
    EmptyInlineSeparator,

    #[error("multiline separator is empty")]
    EmptyMultilineSeparator,
}

/// Unvalidated settings as collected from a config surface.
#[derive(Debug, Clone, Default)]
pub struct QuizSettingsDraft {
    pub save_format: SaveFormat,
    pub inline_separator: Option<String>,
    pub multiline_separator: Option<String>,
    /// Folder the saver writes quiz documents into; empty means vault root.
    pub save_path: Option<String>,
    pub randomize_questions: bool,
    pub auto_save: bool,
    /// Frontmatter property naming the source material of a quiz document.
    pub material_property: Option<String>,
}

impl QuizSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and normalize the draft into usable settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if a separator is present but blank.
    pub fn validate(self) -> Result<QuizSettings, SettingsError> {
        let defaults = Separators::default();
        let inline = match self.inline_separator {
            None => defaults.inline,
            Some(sep) => {
                let sep = sep.trim().to_string();
                if sep.is_empty() {
                    return Err(SettingsError::EmptyInlineSeparator);
                }
                sep
            }
        };
        let multiline = match self.multiline_separator {
            None => defaults.multiline,
            Some(sep) => {
                let sep = sep.trim().to_string();
                if sep.is_empty() {
                    return Err(SettingsError::EmptyMultilineSeparator);
                }
                sep
            }
        };

        Ok(QuizSettings {
            save_format: self.save_format,
            separators: Separators { inline, multiline },
            save_path: normalize_optional(self.save_path).unwrap_or_default(),
            randomize_questions: self.randomize_questions,
            auto_save: self.auto_save,
            material_property: normalize_optional(self.material_property),
        })
    }
}

/// Validated session-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSettings {
    save_format: SaveFormat,
    separators: Separators,
    save_path: String,
    randomize_questions: bool,
    auto_save: bool,
    material_property: Option<String>,
}

impl QuizSettings {
    #[must_use]
    pub fn save_format(&self) -> SaveFormat {
        self.save_format
    }

    #[must_use]
    pub fn separators(&self) -> &Separators {
        &self.separators
    }

    /// Empty when quizzes save to the vault root.
    #[must_use]
    pub fn save_path(&self) -> &str {
        &self.save_path
    }

    #[must_use]
    pub fn randomize_questions(&self) -> bool {
        self.randomize_questions
    }

    #[must_use]
    pub fn auto_save(&self) -> bool {
        self.auto_save
    }

    #[must_use]
    pub fn material_property(&self) -> Option<&str> {
        self.material_property.as_deref()
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            save_format: SaveFormat::default(),
            separators: Separators::default(),
            save_path: String::new(),
            randomize_questions: false,
            auto_save: false,
            material_property: None,
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_falls_back_to_default_separators() {
        let settings = QuizSettingsDraft::new().validate().unwrap();
        assert_eq!(settings.separators().inline, "::");
        assert_eq!(settings.separators().multiline, "?");
        assert_eq!(settings.save_path(), "");
    }

    #[test]
    fn blank_separator_is_rejected() {
        let draft = QuizSettingsDraft {
            inline_separator: Some("   ".to_string()),
            ..QuizSettingsDraft::new()
        };
        let err = draft.validate().unwrap_err();
        assert_eq!(err, SettingsError::EmptyInlineSeparator);
    }

    #[test]
    fn save_path_is_trimmed() {
        let draft = QuizSettingsDraft {
            save_path: Some("  notes/quizzes ".to_string()),
            ..QuizSettingsDraft::new()
        };
        assert_eq!(draft.validate().unwrap().save_path(), "notes/quizzes");
    }
}
