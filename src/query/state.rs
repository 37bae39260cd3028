//! Mutable filter state and its operations
//!
//! `FilterState` is created when a view mounts (from URL parameters or
//! defaults), mutated exclusively through the operations below, and dropped
//! when the view goes away. Nothing here is persisted.
//!
//! The page-reset invariant: any direct user change to the search text, the
//! tag set or the sort order snaps the page back to 1. Restoring state from
//! a URL does not count as a user change and keeps the page as given.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Validation failures for filter mutations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The sort order string is not one of the known values
    #[error("Unknown sort order '{0}'. Valid values: newest, oldest, relevance")]
    UnknownSortOrder(String),

    /// Page numbers are 1-based
    #[error("Page numbers start at 1 (got {0})")]
    PageOutOfRange(u32),
}

/// Result ordering requested from the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Most recently published first
    #[default]
    Newest,
    /// Oldest entries first
    Oldest,
    /// Full-text relevance ranking
    Relevance,
}

impl SortOrder {
    /// The wire/URL representation of this order
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Relevance => "relevance",
        }
    }

    /// Parse a sort order, rejecting anything unknown
    ///
    /// # Errors
    ///
    /// Returns `QueryError::UnknownSortOrder` for any value that is not
    /// `newest`, `oldest` or `relevance`.
    pub fn parse_strict(value: &str) -> Result<Self, QueryError> {
        match value {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "relevance" => Ok(Self::Relevance),
            other => Err(QueryError::UnknownSortOrder(other.to_string())),
        }
    }

    /// Parse a sort order, falling back to the default on unknown values
    ///
    /// Used when hydrating from a URL, where a tampered or stale link should
    /// degrade to the default view instead of failing.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        Self::parse_strict(value).unwrap_or_default()
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_strict(s)
    }
}

/// The current filter selection for a browse view
///
/// Fields are private so every mutation goes through an operation that
/// upholds the page-reset invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    search_text: String,
    selected_tags: Vec<String>,
    sort_order: SortOrder,
    page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            selected_tags: Vec::new(),
            sort_order: SortOrder::default(),
            page: 1,
        }
    }
}

impl FilterState {
    /// Create the default state (empty search, no tags, newest, page 1)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild state from previously serialized parts, without any resets
    ///
    /// This is the URL-restoration path: the page is kept as given (clamped
    /// to 1 at minimum) rather than snapping back to 1.
    #[must_use]
    pub fn restored(
        search_text: String,
        selected_tags: Vec<String>,
        sort_order: SortOrder,
        page: u32,
    ) -> Self {
        Self {
            search_text,
            selected_tags,
            sort_order,
            page: page.max(1),
        }
    }

    /// The raw (not debounced) search text
    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Currently selected tags, in selection order
    #[must_use]
    pub fn selected_tags(&self) -> &[String] {
        &self.selected_tags
    }

    /// The requested result ordering
    #[must_use]
    pub const fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// The current 1-based page number
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Replace the search text, resetting to the first page
    ///
    /// The raw text is stored immediately so the prompt stays responsive;
    /// callers feed the debounced value into the query signature separately.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.page = 1;
    }

    /// Toggle a tag in or out of the selection, resetting to the first page
    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(pos) = self.selected_tags.iter().position(|t| t == tag) {
            self.selected_tags.remove(pos);
        } else {
            self.selected_tags.push(tag.to_string());
        }
        self.page = 1;
    }

    /// Change the sort order, resetting to the first page
    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.sort_order = order;
        self.page = 1;
    }

    /// Change the sort order from a string, rejecting unknown values
    ///
    /// # Errors
    ///
    /// Returns `QueryError::UnknownSortOrder` without touching the existing
    /// state if the value is not a known order.
    pub fn set_sort_order_str(&mut self, value: &str) -> Result<(), QueryError> {
        let order = SortOrder::parse_strict(value)?;
        self.set_sort_order(order);
        Ok(())
    }

    /// Jump to a page; other fields are untouched
    ///
    /// # Errors
    ///
    /// Returns `QueryError::PageOutOfRange` for page 0; existing state is
    /// not modified.
    pub fn set_page(&mut self, page: u32) -> Result<(), QueryError> {
        if page < 1 {
            return Err(QueryError::PageOutOfRange(page));
        }
        self.page = page;
        Ok(())
    }

    /// Restore every field to its default
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Number of active filters, for UI badges only
    ///
    /// Counts the non-empty search text as one, each selected tag as one,
    /// and a non-default sort order as one. Never used for fetch decisions.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        let mut count = self.selected_tags.len();
        if !self.search_text.is_empty() {
            count += 1;
        }
        if self.sort_order != SortOrder::default() {
            count += 1;
        }
        count
    }

    /// True when every field equals its default
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
