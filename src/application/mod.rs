// src/application/mod.rs
pub mod note_actions;
pub mod note_viewer;
pub mod notes_api;
pub mod notes_board;
pub mod notes_store;
pub mod pagination;

pub use note_actions::NoteAction;
pub use note_viewer::NoteViewer;
pub use notes_api::NotesApi;
pub use notes_board::NotesBoard;
pub use notes_store::{FetchTicket, NotesStore, RowState};
