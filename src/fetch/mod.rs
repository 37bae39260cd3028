//! Debounced input and fetch coordination
//!
//! The two pieces that keep the view consistent under rapid input and
//! overlapping responses: a cancellable debounce timer for the search text,
//! and a coordinator that issues at most one request per query signature and
//! only ever applies the most recently issued response.

mod coordinator;
mod debounce;

pub use coordinator::{FetchCoordinator, FetchPhase, FetchTicket, ViewState};
pub use debounce::{DebounceToken, Debouncer};
