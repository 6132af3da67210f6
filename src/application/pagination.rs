// src/application/pagination.rs
use tracing::{debug, info, instrument, warn};

use crate::application::{NotesApi, NotesBoard};
use crate::domain::{DomainError, PaginationState};

impl<A: NotesApi> NotesBoard<A> {
    /// Reload the current page.
    ///
    /// On failure the previously loaded notes stay in the store and the
    /// error is returned to the caller.
    #[instrument(level = "debug", skip(self))]
    pub async fn refresh(&mut self) -> Result<(), DomainError> {
        let ticket = self.store.begin_fetch();
        let PaginationState {
            current_page,
            page_size,
        } = ticket.pagination;
        match self.api.list_notes(current_page, page_size).await {
            Ok(page) => {
                let count = page.notes.len();
                if self.store.apply_fetch(ticket, page) {
                    info!(
                        page = current_page,
                        page_size,
                        notes = count,
                        total_pages = self.store.total_pages(),
                        "Loaded notes page"
                    );
                }
                Ok(())
            }
            Err(e) => {
                warn!(page = current_page, page_size, error = %e, "Failed to fetch notes");
                self.store.fail_fetch(ticket);
                Err(e)
            }
        }
    }

    /// Jump to page `n`, clamped into the known page range
    pub async fn go_to_page(&mut self, n: u32) -> Result<(), DomainError> {
        let page = PaginationState::clamp_page(n, self.store.known_total_pages());
        if page != n {
            debug!(requested = n, clamped = page, "Clamped page request");
        }
        self.store.set_current_page(page);
        self.refresh().await
    }

    /// Advance one page. Returns `false` without fetching on the last page.
    pub async fn next(&mut self) -> Result<bool, DomainError> {
        let current = self.store.pagination().current_page;
        if current >= self.store.total_pages() {
            debug!(current, "Already on last page");
            return Ok(false);
        }
        self.go_to_page(current + 1).await?;
        Ok(true)
    }

    /// Go back one page. Returns `false` without fetching on page 1.
    pub async fn prev(&mut self) -> Result<bool, DomainError> {
        let current = self.store.pagination().current_page;
        if current <= 1 {
            debug!("Already on first page");
            return Ok(false);
        }
        self.go_to_page(current - 1).await?;
        Ok(true)
    }

    /// Change the page size and reload from page 1
    pub async fn set_page_size(&mut self, n: u32) -> Result<(), DomainError> {
        if n == 0 {
            return Err(DomainError::Validation(
                "Page size must be at least 1".to_string(),
            ));
        }
        self.store.set_page_size(n);
        self.store.set_current_page(1);
        self.refresh().await
    }
}
