//! Stateful explore session
//!
//! One session per explore view. It owns the filter state, the debouncer for
//! the search text, the URL synchronizer and the fetch coordinator, and it
//! is the only writer to the navigation port.
//!
//! Write coalescing: search text is reflected into the URL only when the
//! debounced value settles (one history entry per settled search, not one
//! per keystroke); tag toggles, sort changes and page jumps are reflected
//! immediately.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::api::ArgumentGateway;
use crate::fetch::{DebounceToken, Debouncer, FetchCoordinator, ViewState};
use crate::nav::{NavigationPort, QueryParams, UrlSync};
use crate::query::{FilterState, QueryError, QuerySignature, SortOrder};

/// Explore view session over an injected navigation port
pub struct ExploreSession<N: NavigationPort> {
    state: FilterState,
    /// The search text that has settled through the debouncer; this is what
    /// feeds the query signature and the URL
    settled_search: String,
    debouncer: Debouncer<String>,
    debounce_rx: mpsc::UnboundedReceiver<String>,
    pending_search: Option<DebounceToken>,
    sync: UrlSync<N>,
    coordinator: FetchCoordinator,
}

impl<N: NavigationPort> ExploreSession<N> {
    /// Create a session hydrated from the port's current location
    ///
    /// Hydration restores all fields including the page; nothing is reset.
    #[must_use]
    pub fn new(
        gateway: Arc<dyn ArgumentGateway>,
        nav: N,
        page_size: u32,
        debounce_delay: Duration,
    ) -> Self {
        let sync = UrlSync::new(nav);
        let state = sync.hydrate();
        let settled_search = state.search_text().to_string();
        let (debouncer, debounce_rx) = Debouncer::new(debounce_delay);
        let coordinator = FetchCoordinator::new(gateway, page_size);
        Self {
            state,
            settled_search,
            debouncer,
            debounce_rx,
            pending_search: None,
            sync,
            coordinator,
        }
    }

    /// The current filter state
    #[must_use]
    pub const fn state(&self) -> &FilterState {
        &self.state
    }

    /// The settled (debounced) search text
    #[must_use]
    pub fn settled_search(&self) -> &str {
        &self.settled_search
    }

    /// Snapshot of the fetch state for rendering
    pub async fn view(&self) -> ViewState {
        self.coordinator.view().await
    }

    /// The navigation port, for inspecting the current location
    #[must_use]
    pub const fn nav(&self) -> &N {
        self.sync.nav()
    }

    /// A shareable query string reproducing this view (`""` for the default)
    #[must_use]
    pub fn share_query(&self) -> String {
        let encoded = QueryParams::snapshot(&self.state, &self.settled_search).encode();
        if encoded.is_empty() {
            encoded
        } else {
            format!("?{encoded}")
        }
    }

    /// Issue the initial fetch for the hydrated state
    pub async fn start(&mut self) {
        // Rewrites the hydrated location in canonical form; a no-op when the
        // shared link was already canonical
        self.reflect(true);
        self.refetch().await;
    }

    /// Update the search text; the fetch waits for the value to settle
    pub fn set_search(&mut self, text: &str) {
        self.state.set_search_text(text);
        self.pending_search = Some(self.debouncer.schedule(text.to_string()));
    }

    /// Wait for a pending search to settle, then reflect and fetch once
    ///
    /// Returns false immediately when no search is pending. A burst of
    /// `set_search` calls faster than the debounce delay settles into a
    /// single URL write and a single fetch for the final text.
    pub async fn wait_for_search(&mut self) -> bool {
        if self.pending_search.is_none() {
            return false;
        }
        let Some(mut settled) = self.debounce_rx.recv().await else {
            return false;
        };
        // Collapse anything that settled while we were waiting
        while let Ok(newer) = self.debounce_rx.try_recv() {
            settled = newer;
        }
        if self.debouncer.is_pending() {
            // A newer keystroke is still settling; wait it out
            if let Some(newer) = self.debounce_rx.recv().await {
                settled = newer;
            }
        }
        self.pending_search = None;
        self.settled_search = settled;
        self.reflect(false);
        self.refetch().await;
        true
    }

    /// Toggle a tag filter; reflected and fetched immediately
    pub async fn toggle_tag(&mut self, tag: &str) {
        self.state.toggle_tag(tag);
        self.reflect(false);
        self.refetch().await;
    }

    /// Change the sort order; reflected and fetched immediately
    pub async fn set_sort(&mut self, order: SortOrder) {
        self.state.set_sort_order(order);
        self.reflect(false);
        self.refetch().await;
    }

    /// Jump to a page; reflected and fetched immediately
    ///
    /// # Errors
    ///
    /// Returns `QueryError::PageOutOfRange` for page 0.
    pub async fn set_page(&mut self, page: u32) -> Result<(), QueryError> {
        self.state.set_page(page)?;
        self.reflect(false);
        self.refetch().await;
        Ok(())
    }

    /// Advance one page; false when already on the last known page
    pub async fn next_page(&mut self) -> bool {
        let view = self.coordinator.view().await;
        let total = view.results.as_ref().map_or(1, |r| r.total_pages);
        let current = self.state.page();
        if current >= total || self.state.set_page(current + 1).is_err() {
            return false;
        }
        self.reflect(false);
        self.refetch().await;
        true
    }

    /// Go back one page; false when already on the first page
    pub async fn prev_page(&mut self) -> bool {
        let current = self.state.page();
        if current <= 1 || self.state.set_page(current - 1).is_err() {
            return false;
        }
        self.reflect(false);
        self.refetch().await;
        true
    }

    /// Restore defaults, cancel any pending search, and clear the URL
    pub async fn reset(&mut self) {
        if let Some(token) = self.pending_search.take() {
            self.debouncer.cancel(token);
        }
        self.state.reset();
        self.settled_search.clear();
        self.sync.clear();
        self.refetch().await;
    }

    /// Step back in view history; false when there is nowhere to go
    pub async fn back(&mut self) -> bool {
        let Some(restored) = self.sync.back() else {
            return false;
        };
        self.restore(restored).await;
        true
    }

    /// Step forward in view history; false when there is nowhere to go
    pub async fn forward(&mut self) -> bool {
        let Some(restored) = self.sync.forward() else {
            return false;
        };
        self.restore(restored).await;
        true
    }

    /// Re-issue the last fetch (explicit user retry after a failure)
    pub async fn retry(&mut self) {
        if let Some(ticket) = self.coordinator.retry() {
            self.coordinator.execute(ticket).await;
        }
    }

    async fn restore(&mut self, restored: FilterState) {
        if let Some(token) = self.pending_search.take() {
            self.debouncer.cancel(token);
        }
        self.settled_search = restored.search_text().to_string();
        self.state = restored;
        self.refetch().await;
    }

    fn reflect(&mut self, replace: bool) {
        let params = QueryParams::snapshot(&self.state, &self.settled_search);
        self.sync.reflect(params, replace);
    }

    async fn refetch(&mut self) {
        let signature = QuerySignature::of(&self.state, &self.settled_search);
        if let Some(ticket) = self.coordinator.observe(signature) {
            self.coordinator.execute(ticket).await;
        }
    }
}
