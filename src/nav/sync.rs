//! Navigation port and the bidirectional synchronizer
//!
//! `NavigationPort` abstracts the process-wide address bar / history
//! singleton so the synchronizer can be exercised without a browser. The
//! session owns exactly one port; nothing else writes to it.

use tracing::trace;

use super::params::QueryParams;
use crate::query::FilterState;

/// Injected stand-in for the browser address bar and history
pub trait NavigationPort {
    /// The query parameters of the current location
    fn read(&self) -> QueryParams;

    /// Replace or push the current location's query parameters
    ///
    /// With `replace` the current history entry is rewritten in place;
    /// otherwise a new entry is pushed. Implementations must treat a write
    /// equal to the current location as a no-op so reflecting unchanged
    /// state never piles up history entries.
    fn write(&mut self, params: QueryParams, replace: bool);

    /// Step back in history, returning the restored location
    fn back(&mut self) -> Option<QueryParams>;

    /// Step forward in history, returning the restored location
    fn forward(&mut self) -> Option<QueryParams>;
}

/// In-memory history, one encoded query string per entry
///
/// This is the production port for the interactive session: `back` and
/// `forward` walk the stacks exactly like browser history, and a write
/// discards the forward stack.
#[derive(Debug, Default)]
pub struct HistoryNavigation {
    past: Vec<String>,
    current: String,
    future: Vec<String>,
}

impl HistoryNavigation {
    /// Start with a clean location
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a shared query string (e.g. `?tags=Politik&sort=oldest`)
    #[must_use]
    pub fn with_query(query: &str) -> Self {
        Self {
            past: Vec::new(),
            current: QueryParams::decode(query).encode(),
            future: Vec::new(),
        }
    }

    /// The current location's encoded query string, without a leading `?`
    #[must_use]
    pub fn current_query(&self) -> &str {
        &self.current
    }

    /// Number of entries behind the current location
    #[must_use]
    pub fn depth(&self) -> usize {
        self.past.len()
    }
}

impl NavigationPort for HistoryNavigation {
    fn read(&self) -> QueryParams {
        QueryParams::decode(&self.current)
    }

    fn write(&mut self, params: QueryParams, replace: bool) {
        let encoded = params.encode();
        if encoded == self.current {
            return;
        }
        trace!(query = %encoded, replace, "navigation write");
        if replace {
            self.current = encoded;
        } else {
            self.past.push(std::mem::replace(&mut self.current, encoded));
            self.future.clear();
        }
    }

    fn back(&mut self) -> Option<QueryParams> {
        let previous = self.past.pop()?;
        self.future
            .push(std::mem::replace(&mut self.current, previous));
        Some(self.read())
    }

    fn forward(&mut self) -> Option<QueryParams> {
        let next = self.future.pop()?;
        self.past.push(std::mem::replace(&mut self.current, next));
        Some(self.read())
    }
}

/// Bidirectional mapping between filter state and the navigation port
pub struct UrlSync<N: NavigationPort> {
    nav: N,
}

impl<N: NavigationPort> UrlSync<N> {
    pub fn new(nav: N) -> Self {
        Self { nav }
    }

    /// Build the filter state described by the current location
    ///
    /// Hydration never resets the page: a shared link to page 3 opens on
    /// page 3.
    #[must_use]
    pub fn hydrate(&self) -> FilterState {
        self.nav.read().into_filter_state()
    }

    /// Write the given snapshot to the location
    ///
    /// Idempotent: writing parameters equal to the current location leaves
    /// history untouched.
    pub fn reflect(&mut self, params: QueryParams, replace: bool) {
        self.nav.write(params, replace);
    }

    /// Push a clean default-view location
    pub fn clear(&mut self) {
        self.nav.write(QueryParams::empty(), false);
    }

    /// Step back in history, returning the state to restore
    pub fn back(&mut self) -> Option<FilterState> {
        self.nav.back().map(QueryParams::into_filter_state)
    }

    /// Step forward in history, returning the state to restore
    pub fn forward(&mut self) -> Option<FilterState> {
        self.nav.forward().map(QueryParams::into_filter_state)
    }

    /// Access the underlying port
    #[must_use]
    pub const fn nav(&self) -> &N {
        &self.nav
    }
}
