// src/util/testing.rs

use anyhow::Result;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::NotesApi;
use crate::domain::{DomainError, Note, NotesPage};

/// Request recorded by [`MockNotesApi`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    List { page: u32, page_size: u32 },
    Get(i64),
    Create { title: String, content: String },
    Update { id: i64, title: String, content: String },
    Delete(i64),
}

struct MockState {
    notes: BTreeMap<i64, Note>,
    next_id: i64,
    list_failure: Option<u16>,
    update_failures: HashMap<i64, u16>,
    delete_failures: HashMap<i64, u16>,
    calls: Vec<ApiCall>,
}

/// In-memory stand-in for the notes backend
///
/// Behaves like the REST backend: notes are listed in id order and paged,
/// ids are assigned on create. Failures can be injected per operation and
/// every request is recorded, so tests can assert that no request was made.
///
/// Clones share state, so a test can keep a handle after moving one into a
/// [`NotesBoard`](crate::application::NotesBoard).
///
/// # Examples
///
/// ```
/// use notesview::util::testing::{sample_note, MockNotesApi};
///
/// let api = MockNotesApi::builder()
///     .with_note(sample_note(1))
///     .with_delete_failure(1, 500)
///     .build();
/// assert_eq!(api.call_count(), 0);
/// ```
#[derive(Clone)]
pub struct MockNotesApi {
    state: Arc<Mutex<MockState>>,
}

impl MockNotesApi {
    pub fn builder() -> MockNotesApiBuilder {
        MockNotesApiBuilder::new()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Note as currently held by the fake backend
    pub fn stored_note(&self, id: i64) -> Option<Note> {
        self.lock().notes.get(&id).cloned()
    }

    /// Make every following list request fail with `status`
    pub fn fail_list(&self, status: u16) {
        self.lock().list_failure = Some(status);
    }

    pub fn fail_delete(&self, id: i64, status: u16) {
        self.lock().delete_failures.insert(id, status);
    }

    pub fn fail_update(&self, id: i64, status: u16) {
        self.lock().update_failures.insert(id, status);
    }
}

fn status_error(status: u16) -> DomainError {
    DomainError::Request(format!("HTTP status {}", status))
}

#[async_trait]
impl NotesApi for MockNotesApi {
    async fn list_notes(&self, page: u32, page_size: u32) -> Result<NotesPage, DomainError> {
        let mut state = self.lock();
        state.calls.push(ApiCall::List { page, page_size });
        if let Some(status) = state.list_failure {
            return Err(status_error(status));
        }
        let total_count = state.notes.len() as u64;
        let size = page_size.max(1) as usize;
        let total_pages = state.notes.len().div_ceil(size) as u32;
        let skip = (page.max(1) as usize - 1) * size;
        Ok(NotesPage {
            notes: state.notes.values().skip(skip).take(size).cloned().collect(),
            total_count,
            total_pages,
            last_id: state.notes.keys().next_back().copied(),
        })
    }

    async fn get_note(&self, id: i64) -> Result<Note, DomainError> {
        let mut state = self.lock();
        state.calls.push(ApiCall::Get(id));
        state.notes.get(&id).cloned().ok_or_else(|| status_error(404))
    }

    async fn create_note(&self, title: &str, content: &str) -> Result<Note, DomainError> {
        let mut state = self.lock();
        state.calls.push(ApiCall::Create {
            title: title.to_string(),
            content: content.to_string(),
        });
        let id = state.next_id;
        let note = Note {
            id,
            title: title.to_string(),
            content: content.to_string(),
            created: "2024-03-01T10:00:00Z".to_string(),
            updated: "2024-03-01T10:00:00Z".to_string(),
            note_type_id: None,
            status: None,
        };
        // A non-positive id simulates a broken backend; nothing is stored
        if id > 0 {
            state.notes.insert(id, note.clone());
            state.next_id += 1;
        }
        Ok(note)
    }

    async fn update_note(&self, id: i64, title: &str, content: &str) -> Result<Note, DomainError> {
        let mut state = self.lock();
        state.calls.push(ApiCall::Update {
            id,
            title: title.to_string(),
            content: content.to_string(),
        });
        if let Some(status) = state.update_failures.get(&id) {
            return Err(status_error(*status));
        }
        let note = state.notes.get_mut(&id).ok_or_else(|| status_error(404))?;
        note.title = title.to_string();
        note.content = content.to_string();
        note.updated = "2024-03-02T10:00:00Z".to_string();
        Ok(note.clone())
    }

    async fn delete_note(&self, id: i64) -> Result<(), DomainError> {
        let mut state = self.lock();
        state.calls.push(ApiCall::Delete(id));
        if let Some(status) = state.delete_failures.get(&id) {
            return Err(status_error(*status));
        }
        state
            .notes
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| status_error(404))
    }
}

/// Builder for MockNotesApi
///
/// Provides a fluent interface for configuring mock behavior.
pub struct MockNotesApiBuilder {
    notes: BTreeMap<i64, Note>,
    next_id: Option<i64>,
    update_failures: HashMap<i64, u16>,
    delete_failures: HashMap<i64, u16>,
}

impl MockNotesApiBuilder {
    pub fn new() -> Self {
        Self {
            notes: BTreeMap::new(),
            next_id: None,
            update_failures: HashMap::new(),
            delete_failures: HashMap::new(),
        }
    }

    /// Add a note the backend already holds
    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.insert(note.id, note);
        self
    }

    /// Id handed out by the next create; defaults to one past the highest id
    pub fn with_next_id(mut self, id: i64) -> Self {
        self.next_id = Some(id);
        self
    }

    /// Configure update_note to fail with `status` for a specific ID
    pub fn with_update_failure(mut self, id: i64, status: u16) -> Self {
        self.update_failures.insert(id, status);
        self
    }

    /// Configure delete_note to fail with `status` for a specific ID
    pub fn with_delete_failure(mut self, id: i64, status: u16) -> Self {
        self.delete_failures.insert(id, status);
        self
    }

    pub fn build(self) -> MockNotesApi {
        let next_id = self
            .next_id
            .unwrap_or_else(|| self.notes.keys().next_back().copied().unwrap_or(0) + 1);
        MockNotesApi {
            state: Arc::new(Mutex::new(MockState {
                notes: self.notes,
                next_id,
                list_failure: None,
                update_failures: self.update_failures,
                delete_failures: self.delete_failures,
                calls: Vec::new(),
            })),
        }
    }
}

impl Default for MockNotesApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Note with predictable field values derived from `id`
pub fn sample_note(id: i64) -> Note {
    Note {
        id,
        title: format!("Note {}", id),
        content: format!("Content of note {}", id),
        created: "2024-01-15T08:30:00Z".to_string(),
        updated: "2024-01-16T09:45:00Z".to_string(),
        note_type_id: None,
        status: None,
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "reqwest", "mio"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Set up the subscriber with environment filter
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    // Build and set the subscriber
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
