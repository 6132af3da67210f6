// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Rejected locally, before any request was sent
    #[error("Validation error: {0}")]
    Validation(String),
    /// Non-2xx status or a 2xx response we could not use
    #[error("Request error: {0}")]
    Request(String),
    /// Transport-level failure (connect, reset, timeout)
    #[error("Network error: {0}")]
    Network(String),
    #[error("Note not found: {0}")]
    NoteNotFound(i64),
}
