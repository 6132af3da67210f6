// src/ports/terminal.rs
use chrono::{DateTime, Local, NaiveDateTime};
use std::fmt::Write;
use tracing::instrument;

use crate::application::{NoteAction, NotesStore, RowState};
use crate::constants::{CONTENT_PREVIEW_CHARS, TIMESTAMP_DISPLAY_FORMAT};
use crate::domain::{DomainError, Note};

/// Plain-text rendering of the notes store
#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl TerminalPresenter {
    pub fn new() -> Self {
        Self
    }

    pub fn render_summary(&self, store: &NotesStore) -> String {
        let pagination = store.pagination();
        format!(
            "Total notes: {} | Total pages: {} | Page {} (size {})",
            store.total_count(),
            store.total_pages(),
            pagination.current_page,
            pagination.page_size
        )
    }

    #[instrument(level = "trace", skip_all)]
    pub fn render_page(&self, store: &NotesStore) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.render_summary(store));
        let _ = writeln!(
            out,
            "{:>6}  {:<24}  {:<40}  {:<19}  {:<19}  {}",
            "ID", "Title", "Content", "Created", "Updated", "State"
        );
        for note in store.notes() {
            let state = store.row_state(note.id);
            // Show unsaved edits in place of the stored values
            let (title, content) = match state.edit() {
                Some(edit) => (edit.title.as_str(), edit.content.as_str()),
                None => (note.title.as_str(), note.content.as_str()),
            };
            let _ = writeln!(
                out,
                "{:>6}  {:<24}  {:<40}  {:<19}  {:<19}  {}",
                note.id,
                preview(title, 24),
                preview(content, CONTENT_PREVIEW_CHARS),
                format_timestamp(&note.created),
                format_timestamp(&note.updated),
                row_marker(&state)
            );
        }
        if store.notes().is_empty() {
            let _ = writeln!(out, "(no notes on this page)");
        }
        let draft = store.draft();
        if !draft.title.is_empty() || !draft.content.is_empty() {
            let _ = writeln!(
                out,
                "Draft: {} / {}",
                preview(&draft.title, 24),
                preview(&draft.content, CONTENT_PREVIEW_CHARS)
            );
        }
        out
    }

    pub fn render_note(&self, note: &Note) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Note {}", note.id);
        let _ = writeln!(out, "Title:   {}", note.title);
        let _ = writeln!(out, "Created: {}", format_timestamp(&note.created));
        let _ = writeln!(out, "Updated: {}", format_timestamp(&note.updated));
        if let Some(status) = &note.status {
            let _ = writeln!(out, "Status:  {}", status);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", note.content);
        out
    }

    /// Short message for a failed action; details go to the log
    pub fn render_failure(&self, action: NoteAction, error: &DomainError) -> String {
        match error {
            DomainError::Validation(reason) => reason.clone(),
            DomainError::NoteNotFound(id) => format!("Note {} is not on this page", id),
            DomainError::Request(_) | DomainError::Network(_) => {
                action.failure_message().to_string()
            }
        }
    }
}

fn row_marker(state: &RowState) -> &'static str {
    match state {
        RowState::Clean => "",
        RowState::Editing(_) => "edited",
        RowState::Saving(_) => "saving",
        RowState::SaveFailed(_) => "save failed",
        RowState::Deleting(_) => "deleting",
        RowState::DeleteFailed(_) => "delete failed",
    }
}

/// First line of `text`, cut to `max_chars`
fn preview(text: &str, max_chars: usize) -> String {
    let line = text.lines().next().unwrap_or("");
    if line.chars().count() <= max_chars {
        return line.to_string();
    }
    let cut: String = line.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", cut)
}

/// Format a backend timestamp as `YYYY-MM-DD HH:MM:SS` in local time.
///
/// Timestamps without an offset are taken as local already. Anything that
/// does not parse is returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt
            .with_timezone(&Local)
            .format(TIMESTAMP_DISPLAY_FORMAT)
            .to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return naive.format(TIMESTAMP_DISPLAY_FORMAT).to_string();
        }
    }
    raw.to_string()
}
