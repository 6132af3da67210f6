// src/application/notes_store.rs
use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::domain::{DomainError, DraftNote, Note, NoteEdit, NotesPage, PaginationState};

/// Per-row state of a stored note
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowState {
    Clean,
    Editing(NoteEdit),
    Saving(NoteEdit),
    SaveFailed(NoteEdit),
    /// Unsaved edits ride along so a failed delete can hand them back
    Deleting(Option<NoteEdit>),
    DeleteFailed(Option<NoteEdit>),
}

impl RowState {
    /// Buffer holding unsaved edits, if any
    pub fn edit(&self) -> Option<&NoteEdit> {
        match self {
            RowState::Editing(edit) | RowState::Saving(edit) | RowState::SaveFailed(edit) => {
                Some(edit)
            }
            RowState::Deleting(edit) | RowState::DeleteFailed(edit) => edit.as_ref(),
            RowState::Clean => None,
        }
    }

    fn is_busy(&self) -> bool {
        matches!(self, RowState::Saving(_) | RowState::Deleting(_))
    }
}

/// Identifies one list request and the pagination it was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub pagination: PaginationState,
}

/// Client-side state of the notes list.
///
/// Owned by a single task; every mutation goes through `&mut self`.
#[derive(Debug, Default)]
pub struct NotesStore {
    notes: Vec<Note>,
    pagination: PaginationState,
    total_count: u64,
    /// `None` until the first successful fetch
    total_pages: Option<u32>,
    last_id: Option<i64>,
    draft: DraftNote,
    loading: bool,
    rows: HashMap<i64, RowState>,
    last_issued: u64,
}

impl NotesStore {
    pub fn new(pagination: PaginationState) -> Self {
        Self {
            pagination,
            ..Self::default()
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note(&self, id: i64) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn pagination(&self) -> PaginationState {
        self.pagination
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Page count reported by the last successful fetch, `0` before one
    pub fn total_pages(&self) -> u32 {
        self.total_pages.unwrap_or(0)
    }

    pub fn known_total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    pub fn last_id(&self) -> Option<i64> {
        self.last_id
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn draft(&self) -> &DraftNote {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut DraftNote {
        &mut self.draft
    }

    pub fn row_state(&self, id: i64) -> RowState {
        self.rows.get(&id).cloned().unwrap_or(RowState::Clean)
    }

    /// Current contents as a [`NotesPage`]
    pub fn snapshot(&self) -> NotesPage {
        NotesPage {
            notes: self.notes.clone(),
            total_count: self.total_count,
            total_pages: self.total_pages(),
            last_id: self.last_id,
        }
    }

    pub(crate) fn set_current_page(&mut self, page: u32) {
        self.pagination.current_page = page.max(1);
    }

    pub(crate) fn set_page_size(&mut self, page_size: u32) {
        self.pagination.page_size = page_size.max(1);
    }

    // ---- fetch sequencing ----

    /// Issue a ticket for a list request using the current pagination
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.last_issued += 1;
        self.loading = true;
        FetchTicket {
            seq: self.last_issued,
            pagination: self.pagination,
        }
    }

    /// Apply a fetched page if its ticket is the latest one issued.
    ///
    /// Returns `false` and leaves the store untouched for stale tickets.
    pub fn apply_fetch(&mut self, ticket: FetchTicket, page: NotesPage) -> bool {
        if ticket.seq != self.last_issued {
            debug!(
                seq = ticket.seq,
                latest = self.last_issued,
                "Discarding stale page response"
            );
            return false;
        }
        self.loading = false;
        self.notes = unique_by_id(page.notes);
        self.total_count = page.total_count;
        self.total_pages = Some(page.total_pages);
        self.last_id = page.last_id;
        // Rows that left the page lose their state; edits on a reloaded row are kept
        let ids: Vec<i64> = self.notes.iter().map(|n| n.id).collect();
        self.rows.retain(|id, _| ids.contains(id));
        true
    }

    /// Record a failed fetch. Previously loaded notes stay in place.
    pub fn fail_fetch(&mut self, ticket: FetchTicket) {
        if ticket.seq == self.last_issued {
            self.loading = false;
        }
    }

    /// Invalidate every outstanding ticket, e.g. on teardown
    pub fn abandon_fetches(&mut self) {
        self.last_issued += 1;
        self.loading = false;
    }

    // ---- list mutation ----

    /// Append a created note, replacing an existing entry with the same id
    pub fn insert_created(&mut self, note: Note) {
        match self.notes.iter_mut().find(|n| n.id == note.id) {
            Some(existing) => {
                warn!(note_id = note.id, "Created note already present, replacing");
                *existing = note;
            }
            None => self.notes.push(note),
        }
    }

    /// Remove the entry with `id`. Totals are left alone until the next refresh.
    pub fn remove(&mut self, id: i64) -> Option<Note> {
        self.rows.remove(&id);
        let index = self.notes.iter().position(|n| n.id == id)?;
        Some(self.notes.remove(index))
    }

    // ---- row edits ----

    /// Edit buffer for `id`, created from the stored note on first use
    pub fn edit_mut(&mut self, id: i64) -> Result<&mut NoteEdit, DomainError> {
        let note = self.note(id).ok_or(DomainError::NoteNotFound(id))?;
        let edit = match self.rows.get(&id) {
            Some(state) if state.is_busy() => {
                return Err(DomainError::Validation(format!(
                    "Note {} is busy, try again once the request finishes",
                    id
                )))
            }
            Some(state) => state.edit().cloned().unwrap_or_else(|| NoteEdit::from_note(note)),
            None => NoteEdit::from_note(note),
        };
        self.rows.insert(id, RowState::Editing(edit));
        match self.rows.get_mut(&id) {
            Some(RowState::Editing(edit)) => Ok(edit),
            _ => Err(DomainError::NoteNotFound(id)),
        }
    }

    /// Drop unsaved edits for `id`
    pub fn cancel_edit(&mut self, id: i64) -> Result<(), DomainError> {
        match self.rows.get(&id) {
            Some(state) if state.is_busy() => Err(DomainError::Validation(format!(
                "Note {} is busy, try again once the request finishes",
                id
            ))),
            _ => {
                self.rows.remove(&id);
                Ok(())
            }
        }
    }

    /// Move a row to `Saving`, returning the values to send
    pub fn begin_save(&mut self, id: i64) -> Result<NoteEdit, DomainError> {
        let note = self.note(id).ok_or(DomainError::NoteNotFound(id))?;
        let current = self.row_state(id);
        if current.is_busy() {
            return Err(DomainError::Validation(format!(
                "Note {} already has a request in flight",
                id
            )));
        }
        let edit = current
            .edit()
            .cloned()
            .unwrap_or_else(|| NoteEdit::from_note(note));
        self.rows.insert(id, RowState::Saving(edit.clone()));
        Ok(edit)
    }

    /// Commit the buffered edit into the stored note
    pub fn finish_save(&mut self, id: i64) {
        if let Some(RowState::Saving(edit)) = self.rows.remove(&id) {
            if let Some(note) = self.notes.iter_mut().find(|n| n.id == id) {
                edit.apply_to(note);
            }
        }
    }

    /// Keep the stored note as it was and hold on to the edit for a retry
    pub fn fail_save(&mut self, id: i64) {
        if let Some(RowState::Saving(edit)) = self.rows.remove(&id) {
            self.rows.insert(id, RowState::SaveFailed(edit));
        }
    }

    /// Move a row to `Deleting`. Rows not on the current page are allowed.
    pub fn begin_delete(&mut self, id: i64) -> Result<(), DomainError> {
        let current = self.row_state(id);
        if current.is_busy() {
            return Err(DomainError::Validation(format!(
                "Note {} already has a request in flight",
                id
            )));
        }
        if self.note(id).is_some() {
            self.rows.insert(id, RowState::Deleting(current.edit().cloned()));
        }
        Ok(())
    }

    /// Keep the row and any unsaved edit it carried
    pub fn fail_delete(&mut self, id: i64) {
        if let Some(RowState::Deleting(edit)) = self.rows.remove(&id) {
            self.rows.insert(id, RowState::DeleteFailed(edit));
        }
    }
}

/// Drop repeated ids, keeping the first occurrence in backend order
fn unique_by_id(notes: Vec<Note>) -> Vec<Note> {
    let mut seen = HashSet::with_capacity(notes.len());
    let mut unique = Vec::with_capacity(notes.len());
    for note in notes {
        if seen.insert(note.id) {
            unique.push(note);
        } else {
            warn!(note_id = note.id, "Duplicate note id in page response, skipping");
        }
    }
    unique
}
