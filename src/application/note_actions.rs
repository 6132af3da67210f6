// src/application/note_actions.rs
use tracing::{error, info, instrument};

use crate::application::{NotesApi, NotesBoard};
use crate::domain::{DomainError, Note};

/// User-facing operation, used to pick the failure message shown for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteAction {
    Load,
    View,
    Create,
    Update,
    Delete,
}

impl NoteAction {
    pub fn failure_message(self) -> &'static str {
        match self {
            NoteAction::Load => "Failed to load notes",
            NoteAction::View => "Failed to load note",
            NoteAction::Create => "Create note failed",
            NoteAction::Update => "Update note failed",
            NoteAction::Delete => "Delete note failed",
        }
    }
}

impl<A: NotesApi> NotesBoard<A> {
    /// Create a note from the current draft.
    ///
    /// The draft is validated locally first. On success the created note is
    /// appended to the current page and the draft is cleared; on failure the
    /// draft is kept.
    #[instrument(level = "debug", skip(self))]
    pub async fn add_note(&mut self) -> Result<Note, DomainError> {
        let draft = self.store.draft().clone();
        draft.validate()?;

        let created = self
            .api
            .create_note(&draft.title, &draft.content)
            .await
            .inspect_err(|e| error!(error = %e, "Failed to create note"))?;

        if !created.is_persisted() {
            error!(note_id = created.id, "Backend returned note without a valid id");
            return Err(DomainError::Request(format!(
                "Create returned invalid note id {}",
                created.id
            )));
        }

        info!(note_id = created.id, "Created note");
        self.store.insert_created(created.clone());
        self.store.draft_mut().clear();
        Ok(created)
    }

    /// Send the row's edit buffer to the backend and commit it on success
    #[instrument(level = "debug", skip(self))]
    pub async fn save_note(&mut self, id: i64) -> Result<Note, DomainError> {
        let edit = self.store.begin_save(id)?;
        match self.api.update_note(id, &edit.title, &edit.content).await {
            Ok(saved) => {
                info!(note_id = id, "Saved note");
                self.store.finish_save(id);
                Ok(saved)
            }
            Err(e) => {
                error!(note_id = id, error = %e, "Failed to update note");
                self.store.fail_save(id);
                Err(e)
            }
        }
    }

    /// Delete a note and drop it from the current page.
    ///
    /// Totals are not adjusted until the next refresh.
    #[instrument(level = "debug", skip(self))]
    pub async fn remove_note(&mut self, id: i64) -> Result<(), DomainError> {
        self.store.begin_delete(id)?;
        match self.api.delete_note(id).await {
            Ok(()) => {
                let removed = self.store.remove(id).is_some();
                info!(note_id = id, removed_locally = removed, "Deleted note");
                Ok(())
            }
            Err(e) => {
                error!(note_id = id, error = %e, "Failed to delete note");
                self.store.fail_delete(id);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::RowState;
    use crate::domain::{DraftNote, PaginationState};
    use crate::util::testing::{sample_note, MockNotesApi};

    async fn loaded_board(api: MockNotesApi) -> NotesBoard<MockNotesApi> {
        let mut board = NotesBoard::new(api, PaginationState::new(1, 10));
        board.refresh().await.expect("Refresh should succeed");
        board
    }

    #[tokio::test]
    async fn given_empty_title_when_adding_then_fails_without_request() {
        // Arrange
        let api = MockNotesApi::builder().build();
        let mut board = NotesBoard::new(api.clone(), PaginationState::default());
        *board.store_mut().draft_mut() = DraftNote::new("", "x");

        // Act
        let result = board.add_note().await;

        // Assert
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn given_empty_content_when_adding_then_fails_without_request() {
        let api = MockNotesApi::builder().build();
        let mut board = NotesBoard::new(api.clone(), PaginationState::default());
        *board.store_mut().draft_mut() = DraftNote::new("x", "");

        let result = board.add_note().await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn given_valid_draft_when_adding_then_appends_note_and_clears_draft() {
        // Arrange
        let api = MockNotesApi::builder()
            .with_note(sample_note(1))
            .with_next_id(5)
            .build();
        let mut board = loaded_board(api).await;
        *board.store_mut().draft_mut() = DraftNote::new("A", "B");

        // Act
        let created = board.add_note().await.expect("Add should succeed");

        // Assert
        assert_eq!(created.id, 5);
        let notes = board.store().notes();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes.iter().filter(|n| n.id == 5).count(), 1);
        assert_eq!(notes.last().map(|n| n.title.as_str()), Some("A"));
        assert_eq!(board.store().draft(), &DraftNote::default());
    }

    #[tokio::test]
    async fn given_backend_returning_zero_id_when_adding_then_fails_and_keeps_draft() {
        let api = MockNotesApi::builder().with_next_id(0).build();
        let mut board = loaded_board(api).await;
        *board.store_mut().draft_mut() = DraftNote::new("A", "B");

        let result = board.add_note().await;

        assert!(matches!(result, Err(DomainError::Request(_))));
        assert!(board.store().notes().is_empty());
        assert_eq!(board.store().draft(), &DraftNote::new("A", "B"));
    }

    #[tokio::test]
    async fn given_successful_delete_when_removing_then_only_that_note_is_removed() {
        // Arrange
        let api = MockNotesApi::builder()
            .with_note(sample_note(1))
            .with_note(sample_note(2))
            .with_note(sample_note(3))
            .with_note(sample_note(4))
            .build();
        let mut board = loaded_board(api).await;

        // Act
        board.remove_note(3).await.expect("Remove should succeed");

        // Assert
        let ids: Vec<i64> = board.store().notes().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 4]);
        assert_eq!(board.store().total_count(), 4);
    }

    #[tokio::test]
    async fn given_server_error_when_removing_then_sequence_is_unchanged() {
        // Arrange
        let api = MockNotesApi::builder()
            .with_note(sample_note(1))
            .with_note(sample_note(3))
            .with_delete_failure(3, 500)
            .build();
        let mut board = loaded_board(api).await;

        // Act
        let result = board.remove_note(3).await;

        // Assert
        assert!(matches!(result, Err(DomainError::Request(_))));
        let ids: Vec<i64> = board.store().notes().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(board.store().row_state(3), RowState::DeleteFailed(None));
    }

    #[tokio::test]
    async fn given_unsaved_edit_when_delete_fails_then_edit_survives() {
        // Arrange
        let api = MockNotesApi::builder()
            .with_note(sample_note(3))
            .with_delete_failure(3, 500)
            .build();
        let mut board = loaded_board(api).await;
        board
            .store_mut()
            .edit_mut(3)
            .expect("Row should be editable")
            .title = "typed but unsaved".to_string();

        // Act
        let result = board.remove_note(3).await;

        // Assert
        assert!(matches!(result, Err(DomainError::Request(_))));
        assert_eq!(
            board.store().row_state(3).edit().map(|e| e.title.clone()),
            Some("typed but unsaved".to_string())
        );
        assert_eq!(
            board.store().note(3).map(|n| n.title.as_str()),
            Some("Note 3")
        );
    }

    #[tokio::test]
    async fn given_edited_note_when_saving_then_sends_buffer_and_commits() {
        // Arrange
        let api = MockNotesApi::builder().with_note(sample_note(2)).build();
        let mut board = loaded_board(api.clone()).await;
        board
            .store_mut()
            .edit_mut(2)
            .expect("Row should be editable")
            .title = "Renamed".to_string();

        // Act
        board.save_note(2).await.expect("Save should succeed");

        // Assert
        assert_eq!(
            board.store().note(2).map(|n| n.title.as_str()),
            Some("Renamed")
        );
        assert_eq!(api.stored_note(2).map(|n| n.title), Some("Renamed".to_string()));
        assert_eq!(board.store().row_state(2), RowState::Clean);
    }

    #[tokio::test]
    async fn given_failing_update_when_saving_then_stored_note_is_not_changed() {
        let api = MockNotesApi::builder()
            .with_note(sample_note(2))
            .with_update_failure(2, 503)
            .build();
        let mut board = loaded_board(api).await;
        let original_title = board.store().note(2).map(|n| n.title.clone());
        board
            .store_mut()
            .edit_mut(2)
            .expect("Row should be editable")
            .title = "Renamed".to_string();

        let result = board.save_note(2).await;

        assert!(matches!(result, Err(DomainError::Request(_))));
        assert_eq!(board.store().note(2).map(|n| n.title.clone()), original_title);
        assert!(matches!(board.store().row_state(2), RowState::SaveFailed(_)));
    }

    #[tokio::test]
    async fn given_updated_note_when_refreshing_then_backend_values_round_trip() {
        let api = MockNotesApi::builder().with_note(sample_note(1)).build();
        let mut board = loaded_board(api).await;
        {
            let edit = board.store_mut().edit_mut(1).expect("Row should be editable");
            edit.title = "T2".to_string();
            edit.content = "C2".to_string();
        }

        board.save_note(1).await.expect("Save should succeed");
        board.refresh().await.expect("Refresh should succeed");

        let note = board.store().note(1).expect("Note should be listed");
        assert_eq!(note.title, "T2");
        assert_eq!(note.content, "C2");
    }

    #[test]
    fn given_each_action_when_getting_failure_message_then_message_is_short() {
        assert_eq!(NoteAction::Load.failure_message(), "Failed to load notes");
        assert_eq!(NoteAction::Delete.failure_message(), "Delete note failed");
    }
}
