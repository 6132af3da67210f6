// src/domain/page.rs
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use crate::domain::Note;

/// One page of a list query, as returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesPage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_id: Option<i64>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Note>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Note>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub current_page: u32,
    pub page_size: u32,
}

impl PaginationState {
    pub fn new(current_page: u32, page_size: u32) -> Self {
        Self {
            current_page: current_page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Clamp a requested page into `[1, max(total_pages, 1)]`.
    ///
    /// `None` means the page count is not known yet, so only the lower
    /// bound applies.
    pub fn clamp_page(requested: u32, total_pages: Option<u32>) -> u32 {
        match total_pages {
            Some(total) => requested.clamp(1, total.max(1)),
            None => requested.max(1),
        }
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_page_past_end_when_clamping_then_returns_last_page() {
        assert_eq!(PaginationState::clamp_page(9, Some(4)), 4);
    }

    #[test]
    fn given_page_zero_when_clamping_then_returns_first_page() {
        assert_eq!(PaginationState::clamp_page(0, Some(4)), 1);
    }

    #[test]
    fn given_empty_collection_when_clamping_then_returns_first_page() {
        assert_eq!(PaginationState::clamp_page(3, Some(0)), 1);
    }

    #[test]
    fn given_unknown_page_count_when_clamping_then_only_lower_bound_applies() {
        assert_eq!(PaginationState::clamp_page(12, None), 12);
        assert_eq!(PaginationState::clamp_page(0, None), 1);
    }

    #[test]
    fn given_null_notes_when_deserializing_page_then_notes_are_empty() {
        let json = r#"{"notes": null, "totalCount": 0, "totalPages": 0}"#;

        let page: NotesPage = serde_json::from_str(json).expect("Page should parse");

        assert!(page.notes.is_empty());
        assert_eq!(page.last_id, None);
    }
}
