//! Filter state for the explore view
//!
//! Holds the free-text search, selected tag set, sort order and page number
//! that together describe what the user is looking at, and derives the
//! canonical query signature used to decide when a refetch is due.

mod signature;
mod state;

pub use signature::QuerySignature;
pub use state::{FilterState, QueryError, SortOrder};
