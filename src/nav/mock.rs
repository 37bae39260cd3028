//! Recording navigation port for tests

use super::params::QueryParams;
use super::sync::{HistoryNavigation, NavigationPort};

/// Navigation port that records every effective write
///
/// Wraps a [`HistoryNavigation`] so it behaves like the real port while
/// letting tests assert on write coalescing (one history entry per logical
/// filter change, not one per keystroke).
#[derive(Debug, Default)]
pub struct RecordingNavigation {
    inner: HistoryNavigation,
    /// Encoded query of every write that changed the location
    pub writes: Vec<String>,
    /// The `replace` flag of each recorded write
    pub replace_flags: Vec<bool>,
}

impl RecordingNavigation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a shared query string
    #[must_use]
    pub fn with_query(query: &str) -> Self {
        Self {
            inner: HistoryNavigation::with_query(query),
            writes: Vec::new(),
            replace_flags: Vec::new(),
        }
    }

    /// The current location's encoded query string
    #[must_use]
    pub fn current_query(&self) -> &str {
        self.inner.current_query()
    }

    /// Number of writes that actually changed the location
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.len()
    }
}

impl NavigationPort for RecordingNavigation {
    fn read(&self) -> QueryParams {
        self.inner.read()
    }

    fn write(&mut self, params: QueryParams, replace: bool) {
        let encoded = params.encode();
        if encoded == self.inner.current_query() {
            return;
        }
        self.writes.push(encoded);
        self.replace_flags.push(replace);
        self.inner.write(params, replace);
    }

    fn back(&mut self) -> Option<QueryParams> {
        self.inner.back()
    }

    fn forward(&mut self) -> Option<QueryParams> {
        self.inner.forward()
    }
}
