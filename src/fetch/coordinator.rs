//! Fetch coordination with stale-response suppression
//!
//! One logical "query session" per view: every query-signature change issues
//! a request tagged with a monotonically increasing sequence number, and a
//! response is applied only if its sequence number is still the highest one
//! issued. Responses for superseded requests are discarded without touching
//! visible state, so results always reflect the most recently issued
//! request, not the last one to complete.
//!
//! Failures are data: the previous result page stays visible, a display
//! message is recorded, and nothing is retried until the signature changes
//! or the caller explicitly retries.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::{ApiError, ArgumentGateway, ListQuery, ResultPage};
use crate::query::QuerySignature;

/// Lifecycle of the current query session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    /// Nothing fetched yet
    #[default]
    Idle,
    /// A request is in flight
    Loading,
    /// The latest request completed and its page is visible
    Success,
    /// The latest request failed; the previous page stays visible
    Failure,
}

/// What the view renders: phase, the current page, and any error message
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub phase: FetchPhase,
    /// Replaced wholesale on success, preserved on failure
    pub results: Option<ResultPage>,
    /// Display-ready message for the latest failure
    pub error: Option<String>,
}

/// One issued request: its sequence number and the query it carries
#[derive(Debug)]
pub struct FetchTicket {
    seq: u64,
    query: ListQuery,
}

/// Issues listing fetches and applies only the newest response
pub struct FetchCoordinator {
    gateway: Arc<dyn ArgumentGateway>,
    page_size: u32,
    issued: Arc<AtomicU64>,
    last_signature: Option<QuerySignature>,
    view: Arc<Mutex<ViewState>>,
}

impl FetchCoordinator {
    #[must_use]
    pub fn new(gateway: Arc<dyn ArgumentGateway>, page_size: u32) -> Self {
        Self {
            gateway,
            page_size,
            issued: Arc::new(AtomicU64::new(0)),
            last_signature: None,
            view: Arc::new(Mutex::new(ViewState::default())),
        }
    }

    /// Snapshot of the current view state
    pub async fn view(&self) -> ViewState {
        self.view.lock().await.clone()
    }

    /// The fixed page size this coordinator requests
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Issue a ticket if the signature differs from the last one observed
    ///
    /// Equal signatures never produce a second fetch; a changed signature
    /// produces exactly one ticket.
    pub fn observe(&mut self, signature: QuerySignature) -> Option<FetchTicket> {
        if self.last_signature.as_ref() == Some(&signature) {
            return None;
        }
        Some(self.issue(signature))
    }

    /// Re-issue the last observed signature (explicit user retry)
    pub fn retry(&mut self) -> Option<FetchTicket> {
        let signature = self.last_signature.clone()?;
        Some(self.issue(signature))
    }

    fn issue(&mut self, signature: QuerySignature) -> FetchTicket {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(seq, signature = %signature, "issuing fetch");
        let query = ListQuery {
            search: signature.search().to_string(),
            tags: signature.tags().to_vec(),
            sort: signature.sort(),
            page: signature.page(),
            limit: self.page_size,
        };
        self.last_signature = Some(signature);
        FetchTicket { seq, query }
    }

    /// Run a ticket to completion on the current task
    pub async fn execute(&self, ticket: FetchTicket) {
        Self::run(
            Arc::clone(&self.gateway),
            Arc::clone(&self.view),
            Arc::clone(&self.issued),
            ticket,
        )
        .await;
    }

    /// Run a ticket concurrently; the response is applied (or discarded)
    /// whenever it arrives
    pub fn spawn(&self, ticket: FetchTicket) -> JoinHandle<()> {
        let gateway = Arc::clone(&self.gateway);
        let view = Arc::clone(&self.view);
        let issued = Arc::clone(&self.issued);
        tokio::spawn(Self::run(gateway, view, issued, ticket))
    }

    async fn run(
        gateway: Arc<dyn ArgumentGateway>,
        view: Arc<Mutex<ViewState>>,
        issued: Arc<AtomicU64>,
        ticket: FetchTicket,
    ) {
        if ticket.seq == issued.load(Ordering::SeqCst) {
            view.lock().await.phase = FetchPhase::Loading;
        }
        let outcome = gateway.list_entries(&ticket.query).await;

        let mut view = view.lock().await;
        // Apply-time check: only the highest sequence issued so far may land
        if ticket.seq != issued.load(Ordering::SeqCst) {
            debug!(seq = ticket.seq, "discarding superseded response");
            return;
        }
        match outcome {
            Ok(page) => {
                view.results = Some(page);
                view.error = None;
                view.phase = FetchPhase::Success;
            }
            Err(err) => {
                view.error = Some(display_message(&err));
                view.phase = FetchPhase::Failure;
            }
        }
    }
}

fn display_message(err: &ApiError) -> String {
    match err {
        ApiError::Network(_) => "Could not reach the server. Check your connection.".to_string(),
        _ => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::FilterState;
    use crate::testing::ScriptedGateway;
    use reqwest::StatusCode;
    use std::time::Duration;
    use tokio::time::sleep;

    fn page_with(count: u64) -> ResultPage {
        ResultPage {
            items: (0..count)
                .map(|i| ScriptedGateway::entry(&format!("entry-{i}")))
                .collect(),
            current_page: 1,
            total_pages: 1,
            total_count: count,
        }
    }

    fn signature_for_page(page: u32) -> QuerySignature {
        let mut state = FilterState::new();
        state.set_page(page).unwrap();
        QuerySignature::of(&state, "")
    }

    #[tokio::test(start_paused = true)]
    async fn test_newest_issued_request_wins() {
        let gateway = Arc::new(ScriptedGateway::new());
        gateway.push_page(Duration::from_millis(300), page_with(1));
        gateway.push_page(Duration::from_millis(10), page_with(2));

        let mut coordinator = FetchCoordinator::new(gateway.clone(), 9);

        // First request is slow, second is fast and completes first
        let slow = coordinator.observe(signature_for_page(1)).unwrap();
        let fast = coordinator.observe(signature_for_page(2)).unwrap();
        let slow_handle = coordinator.spawn(slow);
        let fast_handle = coordinator.spawn(fast);

        fast_handle.await.unwrap();
        slow_handle.await.unwrap();

        // The slow response resolved last but was issued first: discarded
        let view = coordinator.view().await;
        assert_eq!(view.phase, FetchPhase::Success);
        assert_eq!(view.results.unwrap().total_count, 2);
        assert!(view.error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_preserves_previous_results() {
        let gateway = Arc::new(ScriptedGateway::new());
        gateway.push_page(Duration::ZERO, page_with(9));
        gateway.push_error(
            Duration::ZERO,
            ApiError::Request {
                status: StatusCode::INTERNAL_SERVER_ERROR,
            },
        );

        let mut coordinator = FetchCoordinator::new(gateway.clone(), 9);
        let ticket = coordinator.observe(signature_for_page(1)).unwrap();
        coordinator.execute(ticket).await;
        assert_eq!(coordinator.view().await.phase, FetchPhase::Success);

        let ticket = coordinator.observe(signature_for_page(2)).unwrap();
        coordinator.execute(ticket).await;

        let view = coordinator.view().await;
        assert_eq!(view.phase, FetchPhase::Failure);
        // The nine previously displayed items stay visible
        assert_eq!(view.results.unwrap().items.len(), 9);
        assert!(view.error.unwrap().contains("500"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_equal_signature_does_not_refetch() {
        let gateway = Arc::new(ScriptedGateway::new());
        gateway.push_page(Duration::ZERO, page_with(1));

        let mut coordinator = FetchCoordinator::new(gateway.clone(), 9);
        let ticket = coordinator.observe(signature_for_page(1)).unwrap();
        coordinator.execute(ticket).await;

        assert!(coordinator.observe(signature_for_page(1)).is_none());
        assert_eq!(gateway.list_call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_reissues_same_signature() {
        let gateway = Arc::new(ScriptedGateway::new());
        gateway.push_error(
            Duration::ZERO,
            ApiError::Request {
                status: StatusCode::BAD_GATEWAY,
            },
        );
        gateway.push_page(Duration::ZERO, page_with(3));

        let mut coordinator = FetchCoordinator::new(gateway.clone(), 9);
        let ticket = coordinator.observe(signature_for_page(1)).unwrap();
        coordinator.execute(ticket).await;
        assert_eq!(coordinator.view().await.phase, FetchPhase::Failure);

        let ticket = coordinator.retry().unwrap();
        coordinator.execute(ticket).await;

        let view = coordinator.view().await;
        assert_eq!(view.phase, FetchPhase::Success);
        assert_eq!(view.results.unwrap().total_count, 3);
        assert!(view.error.is_none());

        let calls = gateway.list_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], calls[1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_is_observable_while_in_flight() {
        let gateway = Arc::new(ScriptedGateway::new());
        gateway.push_page(Duration::from_millis(100), page_with(1));

        let mut coordinator = FetchCoordinator::new(gateway, 9);
        let ticket = coordinator.observe(signature_for_page(1)).unwrap();
        let handle = coordinator.spawn(ticket);

        // Let the spawned task start and park on the scripted delay
        tokio::task::yield_now().await;
        assert_eq!(coordinator.view().await.phase, FetchPhase::Loading);

        sleep(Duration::from_millis(150)).await;
        handle.await.unwrap();
        assert_eq!(coordinator.view().await.phase, FetchPhase::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn test_network_failure_message_is_friendly() {
        // Reserved wording check: the raw reqwest error never reaches users
        let message = display_message(&ApiError::Request {
            status: StatusCode::SERVICE_UNAVAILABLE,
        });
        assert!(message.contains("503"));
    }
}
