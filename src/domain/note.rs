// src/domain/note.rs
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Assigned by the backend; `0` means not yet persisted
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_type_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Note {
    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }
}

/// Form state for a note that has not been created yet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftNote {
    pub title: String,
    pub content: String,
}

impl DraftNote {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Both fields must be non-empty before a create request is sent
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.is_empty() {
            return Err(DomainError::Validation("Title is required".to_string()));
        }
        if self.content.is_empty() {
            return Err(DomainError::Validation("Content is required".to_string()));
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.content.clear();
    }
}

/// Edit buffer for a stored note.
///
/// Edits land here instead of on the stored [`Note`], so the stored value
/// only changes once the backend has accepted the save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEdit {
    pub title: String,
    pub content: String,
}

impl NoteEdit {
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
        }
    }

    pub fn apply_to(&self, note: &mut Note) {
        note.title.clone_from(&self.title);
        note.content.clone_from(&self.content);
    }
}
