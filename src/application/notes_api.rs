// src/application/notes_api.rs
use async_trait::async_trait;

use crate::domain::{DomainError, Note, NotesPage};

/// Remote notes backend.
///
/// Every method issues exactly one request. Implementations map non-2xx
/// responses and unusable bodies to [`DomainError::Request`] and transport
/// failures to [`DomainError::Network`].
#[async_trait]
pub trait NotesApi: Send + Sync {
    async fn list_notes(&self, page: u32, page_size: u32) -> Result<NotesPage, DomainError>;

    async fn get_note(&self, id: i64) -> Result<Note, DomainError>;

    async fn create_note(&self, title: &str, content: &str) -> Result<Note, DomainError>;

    async fn update_note(&self, id: i64, title: &str, content: &str) -> Result<Note, DomainError>;

    async fn delete_note(&self, id: i64) -> Result<(), DomainError>;
}
