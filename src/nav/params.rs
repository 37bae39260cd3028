//! Query string codec
//!
//! Recognized parameters: `q` (search text), `tags` (comma-joined), `sort`
//! and `page`. Writing omits parameters at their default so the default view
//! keeps a clean URL; reading is lenient, falling back to defaults for
//! unknown sort values and malformed page numbers instead of failing on a
//! tampered link.

use url::form_urlencoded;

use crate::query::{FilterState, SortOrder};

/// The decoded form of the address-bar query string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    /// Search text (`q`)
    pub q: String,
    /// Selected tags (`tags`, comma-joined on the wire)
    pub tags: Vec<String>,
    /// Sort order (`sort`)
    pub sort: SortOrder,
    /// 1-based page number (`page`)
    pub page: u32,
}

impl QueryParams {
    /// Parameters describing the default view
    #[must_use]
    pub fn empty() -> Self {
        Self {
            q: String::new(),
            tags: Vec::new(),
            sort: SortOrder::default(),
            page: 1,
        }
    }

    /// Snapshot the parts of a `FilterState` that belong in the URL
    ///
    /// The search text is passed separately because only the settled
    /// (debounced) value is ever written to the URL.
    #[must_use]
    pub fn snapshot(state: &FilterState, settled_search: &str) -> Self {
        Self {
            q: settled_search.to_string(),
            tags: state.selected_tags().to_vec(),
            sort: state.sort_order(),
            page: state.page(),
        }
    }

    /// Encode to a query string without the leading `?`
    ///
    /// Returns an empty string for the default view. Parameters equal to
    /// their default are omitted.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if !self.q.is_empty() {
            serializer.append_pair("q", &self.q);
        }
        if !self.tags.is_empty() {
            serializer.append_pair("tags", &self.tags.join(","));
        }
        if self.sort != SortOrder::default() {
            serializer.append_pair("sort", self.sort.as_str());
        }
        if self.page > 1 {
            serializer.append_pair("page", &self.page.to_string());
        }
        serializer.finish()
    }

    /// Decode a query string, tolerating a leading `?`
    ///
    /// Unrecognized parameters are ignored; a repeated parameter keeps its
    /// last occurrence. Invalid `sort` and `page` values fall back to their
    /// defaults.
    #[must_use]
    pub fn decode(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = Self::empty();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "q" => params.q = value.into_owned(),
                "tags" => {
                    params.tags = value
                        .split(',')
                        .filter(|t| !t.is_empty())
                        .map(str::to_string)
                        .collect();
                }
                "sort" => params.sort = SortOrder::parse_lenient(&value),
                "page" => params.page = value.parse::<u32>().ok().filter(|p| *p >= 1).unwrap_or(1),
                _ => {}
            }
        }
        params
    }

    /// Build the filter state these parameters describe
    ///
    /// This is the hydration path: the page is restored as-is instead of
    /// being reset by the field setters.
    #[must_use]
    pub fn into_filter_state(self) -> FilterState {
        FilterState::restored(self.q, self.tags, self.sort, self.page)
    }
}
