//! Integration tests for the kontra client
//!
//! These tests verify end-to-end behavior of the explore session over an
//! in-process gateway: URL synchronization, debounced search, pagination,
//! stale-response suppression and failure handling.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::{advance, sleep};

use kontra::api::{
    ApiError, ArgumentGateway, Entry, ListQuery, NewEntry, NewSource, ResultPage, SubmitReceipt,
};
use kontra::browse::ExploreSession;
use kontra::fetch::{FetchCoordinator, FetchPhase};
use kontra::nav::{HistoryNavigation, NavigationPort, QueryParams, RecordingNavigation};
use kontra::query::{FilterState, QuerySignature, SortOrder};

const DEBOUNCE: Duration = Duration::from_millis(300);

fn entry(slug: &str) -> Entry {
    serde_json::from_value(serde_json::json!({
        "slug": slug,
        "thesis": format!("Thesis for {slug}"),
        "antithesis": format!("Reply for {slug}"),
    }))
    .unwrap()
}

fn page_of(slugs: &[&str]) -> ResultPage {
    serde_json::from_value(serde_json::json!({
        "data": slugs.iter().map(|s| serde_json::json!({
            "slug": s,
            "thesis": format!("Thesis for {s}"),
        })).collect::<Vec<_>>(),
        "currentPage": 1,
        "totalPages": 1,
        "totalCount": slugs.len(),
    }))
    .unwrap()
}

struct Scripted {
    delay: Duration,
    result: Result<ResultPage, ApiError>,
}

/// Gateway double replaying scripted listing responses; dry scripts return
/// an empty page
#[derive(Default)]
struct FakeGateway {
    lists: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<ListQuery>>,
    entry: Mutex<Option<Entry>>,
}

impl FakeGateway {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn push_page(&self, delay: Duration, page: ResultPage) {
        self.lists.lock().unwrap().push_back(Scripted {
            delay,
            result: Ok(page),
        });
    }

    fn push_error(&self, delay: Duration, error: ApiError) {
        self.lists.lock().unwrap().push_back(Scripted {
            delay,
            result: Err(error),
        });
    }

    fn calls(&self) -> Vec<ListQuery> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArgumentGateway for FakeGateway {
    async fn list_entries(&self, query: &ListQuery) -> Result<ResultPage, ApiError> {
        self.calls.lock().unwrap().push(query.clone());
        let scripted = self.lists.lock().unwrap().pop_front();
        match scripted {
            Some(scripted) => {
                sleep(scripted.delay).await;
                scripted.result
            }
            None => Ok(ResultPage {
                items: Vec::new(),
                current_page: query.page,
                total_pages: 1,
                total_count: 0,
            }),
        }
    }

    async fn search_entries(&self, _query: &str, _tags: &[String]) -> Result<Vec<Entry>, ApiError> {
        Ok(Vec::new())
    }

    async fn entry_by_slug(&self, slug: &str) -> Result<Entry, ApiError> {
        self.entry
            .lock()
            .unwrap()
            .clone()
            .filter(|e| e.slug == slug)
            .ok_or_else(|| ApiError::NotFound {
                slug: slug.to_string(),
            })
    }

    async fn list_tags(&self) -> Result<Vec<String>, ApiError> {
        Ok(vec!["Politik".to_string(), "Wirtschaft".to_string()])
    }

    async fn submit_entry(&self, _entry: &NewEntry) -> Result<SubmitReceipt, ApiError> {
        Err(ApiError::Validation {
            messages: vec!["Thesis is required".to_string()],
        })
    }

    async fn moderation_queue(&self, _page: u32, _limit: u32) -> Result<ResultPage, ApiError> {
        Ok(ResultPage::default())
    }

    async fn own_entries(&self) -> Result<Vec<Entry>, ApiError> {
        Ok(Vec::new())
    }

    async fn publish_entry(&self, _id: &str) -> Result<(), ApiError> {
        Ok(())
    }

    async fn suggest_source(&self, _slug: &str, _source: &NewSource) -> Result<(), ApiError> {
        Ok(())
    }

    async fn approve_source(&self, _slug: &str, _source_id: &str) -> Result<(), ApiError> {
        Ok(())
    }
}

fn session(
    gateway: &Arc<FakeGateway>,
    nav: RecordingNavigation,
) -> ExploreSession<RecordingNavigation> {
    ExploreSession::new(
        Arc::clone(gateway) as Arc<dyn ArgumentGateway>,
        nav,
        9,
        DEBOUNCE,
    )
}

#[tokio::test(start_paused = true)]
async fn tag_selection_produces_shareable_urls() {
    let gateway = FakeGateway::new();
    let mut session = session(&gateway, RecordingNavigation::new());
    session.start().await;

    // Default view keeps a clean URL
    assert_eq!(session.share_query(), "");

    session.toggle_tag("Politik").await;
    session.toggle_tag("Wirtschaft").await;
    assert_eq!(session.share_query(), "?tags=Politik%2CWirtschaft");

    session.toggle_tag("Politik").await;
    assert_eq!(session.share_query(), "?tags=Wirtschaft");
}

#[tokio::test(start_paused = true)]
async fn shared_url_reproduces_the_view() {
    let gateway = FakeGateway::new();
    let mut original = session(&gateway, RecordingNavigation::new());
    original.start().await;

    original.toggle_tag("Klima").await;
    original.set_sort(SortOrder::Relevance).await;
    original.set_search("energie");
    original.wait_for_search().await;
    original.set_page(2).await.unwrap();

    let shared = original.share_query();
    let mut restored = session(&gateway, RecordingNavigation::with_query(&shared));
    restored.start().await;

    assert_eq!(restored.state().search_text(), "energie");
    assert_eq!(restored.state().selected_tags(), ["Klima"]);
    assert_eq!(restored.state().sort_order(), SortOrder::Relevance);
    assert_eq!(restored.state().page(), 2);
}

#[tokio::test(start_paused = true)]
async fn typing_burst_fetches_once_for_final_text() {
    let gateway = FakeGateway::new();
    let mut session = session(&gateway, RecordingNavigation::new());
    session.start().await;
    assert_eq!(gateway.calls().len(), 1);

    // Five keystrokes within the debounce window
    for text in ["k", "kl", "kli", "klim", "klima"] {
        session.set_search(text);
        advance(Duration::from_millis(50)).await;
    }
    session.wait_for_search().await;

    let calls = gateway.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].search, "klima");
    // One history entry for the whole burst
    assert_eq!(session.nav().write_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn server_failure_keeps_previous_results_visible() {
    let gateway = FakeGateway::new();
    gateway.push_page(
        Duration::ZERO,
        page_of(&["a", "b", "c", "d", "e", "f", "g", "h", "i"]),
    );
    gateway.push_error(
        Duration::ZERO,
        ApiError::Request {
            status: StatusCode::INTERNAL_SERVER_ERROR,
        },
    );

    let mut session = session(&gateway, RecordingNavigation::new());
    session.start().await;
    assert_eq!(session.view().await.phase, FetchPhase::Success);

    session.toggle_tag("Politik").await;

    let view = session.view().await;
    assert_eq!(view.phase, FetchPhase::Failure);
    assert!(view.error.is_some());
    // The nine previously rendered entries are still there
    assert_eq!(view.results.unwrap().items.len(), 9);

    // Retrying the same signature recovers
    gateway.push_page(Duration::ZERO, page_of(&["x"]));
    session.retry().await;
    assert_eq!(session.view().await.phase, FetchPhase::Success);
}

#[tokio::test(start_paused = true)]
async fn overlapping_responses_apply_newest_issued() {
    let gateway = FakeGateway::new();
    // The page-1 response is slow, the page-2 response fast
    gateway.push_page(Duration::from_millis(400), page_of(&["old"]));
    gateway.push_page(Duration::from_millis(20), page_of(&["new", "newer"]));

    let mut coordinator =
        FetchCoordinator::new(Arc::clone(&gateway) as Arc<dyn ArgumentGateway>, 9);

    let mut state = FilterState::new();
    let slow = coordinator.observe(QuerySignature::of(&state, "")).unwrap();
    state.set_page(2).unwrap();
    let fast = coordinator.observe(QuerySignature::of(&state, "")).unwrap();

    // Both requests are in flight at once; the fast one completes first,
    // the slow one resolves later and must be discarded
    let slow_handle = coordinator.spawn(slow);
    let fast_handle = coordinator.spawn(fast);
    fast_handle.await.unwrap();
    slow_handle.await.unwrap();

    let view = coordinator.view().await;
    assert_eq!(view.phase, FetchPhase::Success);
    assert_eq!(view.results.unwrap().total_count, 2);
}

#[tokio::test(start_paused = true)]
async fn hydrated_page_survives_until_first_user_action() {
    let gateway = FakeGateway::new();
    let nav = RecordingNavigation::with_query("?q=klima&tags=Politik&page=3");
    let mut session = session(&gateway, nav);
    session.start().await;

    assert_eq!(session.state().page(), 3);
    assert_eq!(gateway.calls()[0].page, 3);
    assert_eq!(gateway.calls()[0].search, "klima");

    session.toggle_tag("Wirtschaft").await;
    assert_eq!(session.state().page(), 1);
}

#[tokio::test(start_paused = true)]
async fn tampered_link_degrades_to_defaults() {
    let gateway = FakeGateway::new();
    let nav = RecordingNavigation::with_query("?sort=votes&page=-2&q=klima");
    let mut session = session(&gateway, nav);
    session.start().await;

    assert_eq!(session.state().sort_order(), SortOrder::Newest);
    assert_eq!(session.state().page(), 1);
    assert_eq!(session.state().search_text(), "klima");
}

#[tokio::test(start_paused = true)]
async fn unknown_slug_yields_not_found() {
    let gateway = FakeGateway::new();
    *gateway.entry.lock().unwrap() = Some(entry("existing"));

    let found = gateway.entry_by_slug("existing").await.unwrap();
    assert_eq!(found.slug, "existing");

    let err = gateway.entry_by_slug("unknown-slug").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("unknown-slug"));
}

#[test]
fn filter_state_url_round_trip_via_history() {
    let mut state = FilterState::new();
    state.set_search_text("erneuerbare");
    state.toggle_tag("Klima");
    state.toggle_tag("Wirtschaft");
    state.set_sort_order(SortOrder::Oldest);
    state.set_page(5).unwrap();

    let mut nav = HistoryNavigation::new();
    nav.write(QueryParams::snapshot(&state, state.search_text()), false);

    let hydrated = nav.read().into_filter_state();
    assert_eq!(hydrated, state);
}
