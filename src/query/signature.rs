//! Canonical query signatures
//!
//! A signature is the deterministic serialization of everything that affects
//! which page of results is shown: the debounced search text, the selected
//! tags (sorted, since selection order does not change the result set), the
//! sort order and the page number. The fetch coordinator refetches exactly
//! when the signature changes.

use super::state::{FilterState, SortOrder};
use std::fmt;

/// Deterministic fetch key derived from a `FilterState`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuerySignature {
    search: String,
    tags: Vec<String>,
    sort: SortOrder,
    page: u32,
}

impl QuerySignature {
    /// Derive the signature for a state and its settled search text
    ///
    /// The debounced text is passed separately because the state stores the
    /// raw text for prompt responsiveness while fetches must only see values
    /// that have settled.
    #[must_use]
    pub fn of(state: &FilterState, debounced_search: &str) -> Self {
        let mut tags: Vec<String> = state.selected_tags().to_vec();
        tags.sort();
        Self {
            search: debounced_search.to_string(),
            tags,
            sort: state.sort_order(),
            page: state.page(),
        }
    }

    /// The settled search text
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Selected tags in sorted order
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// The requested ordering
    #[must_use]
    pub const fn sort(&self) -> SortOrder {
        self.sort
    }

    /// The 1-based page number
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }
}

impl fmt::Display for QuerySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "q={}&tags={}&sort={}&page={}",
            self.search,
            self.tags.join(","),
            self.sort,
            self.page
        )
    }
}
