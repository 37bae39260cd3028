//! Filter state ↔ query string synchronization
//!
//! The browser address bar of the original web view becomes an explicit
//! collaborator here: a [`NavigationPort`] that can be read, written and
//! walked back/forward. [`UrlSync`] keeps a `FilterState` and the port
//! consistent in both directions, so a shared query string reproduces the
//! same filtered view and history navigation restores prior state.

mod mock;
mod params;
mod sync;

pub use mock::RecordingNavigation;
pub use params::QueryParams;
pub use sync::{HistoryNavigation, NavigationPort, UrlSync};
