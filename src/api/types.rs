//! Wire types for the directory API
//!
//! Entries are passed through mostly uninterpreted; the one normalization
//! this module insists on is tag shape. The server is inconsistent about
//! tags (bare strings in some payloads, `{name}` objects in others), so tags
//! are canonicalized to plain strings here at the boundary and the union
//! type never escapes this module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::query::SortOrder;

/// Page size for the paginated listing view
pub const LIST_PAGE_SIZE: u32 = 9;

/// Page size for the featured (homepage) view
pub const FEATURED_PAGE_SIZE: u32 = 6;

/// One published or pending directory entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Server-side identifier; some payloads use `_id`, newer ones `id`
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// URL-safe identifier used for single-entry lookups
    #[serde(default)]
    pub slug: String,

    /// The claim being answered
    pub thesis: String,

    /// The short counter-statement
    #[serde(default)]
    pub antithesis: String,

    /// Optional long-form reply, preferred over `antithesis` for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_suggestion: Option<String>,

    /// Canonicalized tag names
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,

    /// Citations backing the counter-statement
    #[serde(default)]
    pub sources: Vec<Source>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entry {
    /// The text shown as the reply: the long-form suggestion when present,
    /// the short counter-statement otherwise
    #[must_use]
    pub fn reply(&self) -> &str {
        self.response_suggestion
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.antithesis)
    }
}

/// A citation attached to an entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub url: String,

    /// Suggested sources stay unapproved until a moderator accepts them
    #[serde(default)]
    pub approved: bool,
}

/// One page of listing results, replaced wholesale on every fetch
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPage {
    #[serde(rename = "data")]
    pub items: Vec<Entry>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: u64,
}

/// Parameters for the paginated listing endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Settled free-text search; empty means unfiltered
    pub search: String,
    /// Tag filter; empty means unfiltered
    pub tags: Vec<String>,
    pub sort: SortOrder,
    /// 1-based page number
    pub page: u32,
    /// Fixed page size chosen by the view, never inferred
    pub limit: u32,
}

impl ListQuery {
    /// An unfiltered first page with the given page size
    #[must_use]
    pub fn first_page(limit: u32) -> Self {
        Self {
            search: String::new(),
            tags: Vec::new(),
            sort: SortOrder::default(),
            page: 1,
            limit,
        }
    }
}

/// Payload for submitting a new entry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub thesis: String,
    pub antithesis: String,
    pub tags: Vec<String>,
    pub sources: Vec<NewSource>,
}

/// Payload for suggesting a citation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub url: String,
}

/// Acknowledgement returned for a successful submission
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReceipt {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// Error body the server sends alongside 4xx statuses
#[derive(Debug, Deserialize)]
pub(crate) struct ServerMessage {
    #[serde(default)]
    pub message: Option<String>,
}

/// The two tag shapes the server emits
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TagRepr {
    Name(String),
    Detailed {
        #[serde(default)]
        name: Option<String>,
        #[serde(default, rename = "_id")]
        id: Option<String>,
    },
}

/// Canonicalize one tag value to its display name
///
/// Objects without a usable name fall back to their id, then to "unknown",
/// mirroring how entries without tags are still renderable.
#[must_use]
pub fn normalize_tag(name: Option<String>, id: Option<String>) -> String {
    name.filter(|n| !n.is_empty())
        .or(id)
        .unwrap_or_else(|| "unknown".to_string())
}

impl TagRepr {
    fn into_name(self) -> String {
        match self {
            Self::Name(name) => name,
            Self::Detailed { name, id } => normalize_tag(name, id),
        }
    }
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<TagRepr>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(TagRepr::into_name).collect())
}

/// Decode a tag vocabulary payload (`GET /api/tags`) into canonical names
///
/// # Errors
///
/// Returns the underlying `serde_json` error when the payload is neither an
/// array of strings nor an array of tag objects.
pub(crate) fn tags_from_value(value: serde_json::Value) -> Result<Vec<String>, serde_json::Error> {
    let raw: Vec<TagRepr> = serde_json::from_value(value)?;
    Ok(raw.into_iter().map(TagRepr::into_name).collect())
}
