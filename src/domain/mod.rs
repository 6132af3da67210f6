// src/domain/mod.rs
pub mod error;
pub mod note;
pub mod page;

pub use error::DomainError;
pub use note::{DraftNote, Note, NoteEdit};
pub use page::{NotesPage, PaginationState};
