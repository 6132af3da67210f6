// src/application/note_viewer.rs
use crate::application::NotesApi;
use crate::domain::{DomainError, Note};

pub struct NoteViewer<A: NotesApi> {
    api: A,
}

impl<A: NotesApi> NoteViewer<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub async fn view_note(&self, note_id: i64) -> Result<Note, DomainError> {
        self.api.get_note(note_id).await
    }
}
