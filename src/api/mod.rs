//! Remote directory API access
//!
//! A narrow gateway over the directory's HTTP surface: list/search entries,
//! fetch a single entry, fetch the tag vocabulary, submit new entries and
//! drive the moderation workflow. Raw transport and HTTP failures are
//! normalized into [`ApiError`] at this boundary; nothing above it sees a
//! bare `reqwest` error or an unparsed tag shape.

mod error;
mod gateway;
mod types;

pub use error::ApiError;
pub use gateway::{ArgumentGateway, HttpGateway};
pub use types::{
    Entry, FEATURED_PAGE_SIZE, LIST_PAGE_SIZE, ListQuery, NewEntry, NewSource, ResultPage, Source,
    SubmitReceipt, normalize_tag,
};
