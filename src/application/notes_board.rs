// src/application/notes_board.rs
use crate::application::{NotesApi, NotesStore};
use crate::domain::PaginationState;

/// Notes list use case: a [`NotesStore`] plus the backend that feeds it.
///
/// Pagination lives in `pagination.rs`, create/update/delete in
/// `note_actions.rs`.
pub struct NotesBoard<A: NotesApi> {
    pub(crate) api: A,
    pub(crate) store: NotesStore,
}

impl<A: NotesApi> NotesBoard<A> {
    pub fn new(api: A, pagination: PaginationState) -> Self {
        Self {
            api,
            store: NotesStore::new(pagination),
        }
    }

    pub fn store(&self) -> &NotesStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut NotesStore {
        &mut self.store
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}
