//! Testing utilities for kontra
//!
//! Provides a scripted in-process gateway so the coordinator and the explore
//! session can be exercised without a server, including overlapping
//! responses with programmable latencies.
//!
//! Only available when compiled with `cfg(test)`.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::sleep;

use crate::api::{
    ApiError, ArgumentGateway, Entry, ListQuery, NewEntry, NewSource, ResultPage, SubmitReceipt,
};

/// One scripted listing response with an artificial latency
struct ScriptedList {
    delay: Duration,
    result: Result<ResultPage, ApiError>,
}

/// Gateway double that replays scripted responses
///
/// Listing responses are consumed in push order; once the script runs dry,
/// an empty page is returned so incidental fetches in a test don't fail.
/// Every listing call is recorded for assertions on fetch counts and query
/// contents.
#[derive(Default)]
pub struct ScriptedGateway {
    lists: Mutex<VecDeque<ScriptedList>>,
    list_calls: Mutex<Vec<ListQuery>>,
    entries: Mutex<HashMap<String, Entry>>,
    tags: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful listing response delivered after `delay`
    pub fn push_page(&self, delay: Duration, page: ResultPage) {
        self.lists.lock().unwrap().push_back(ScriptedList {
            delay,
            result: Ok(page),
        });
    }

    /// Script a failed listing response delivered after `delay`
    pub fn push_error(&self, delay: Duration, error: ApiError) {
        self.lists.lock().unwrap().push_back(ScriptedList {
            delay,
            result: Err(error),
        });
    }

    /// Make an entry resolvable by slug
    pub fn insert_entry(&self, entry: Entry) {
        self.entries
            .lock()
            .unwrap()
            .insert(entry.slug.clone(), entry);
    }

    /// Set the tag vocabulary
    pub fn set_tags(&self, tags: &[&str]) {
        *self.tags.lock().unwrap() = tags.iter().map(|t| (*t).to_string()).collect();
    }

    /// Number of listing calls made so far
    #[must_use]
    pub fn list_call_count(&self) -> usize {
        self.list_calls.lock().unwrap().len()
    }

    /// Every listing query received, in call order
    #[must_use]
    pub fn list_calls(&self) -> Vec<ListQuery> {
        self.list_calls.lock().unwrap().clone()
    }

    /// Minimal entry fixture
    #[must_use]
    pub fn entry(slug: &str) -> Entry {
        Entry {
            id: Some(format!("id-{slug}")),
            slug: slug.to_string(),
            thesis: format!("Thesis for {slug}"),
            antithesis: format!("Reply for {slug}"),
            response_suggestion: None,
            tags: Vec::new(),
            sources: Vec::new(),
            created_at: None,
        }
    }

    /// A page holding one fixture entry per slug
    #[must_use]
    pub fn page_of(slugs: &[&str]) -> ResultPage {
        ResultPage {
            items: slugs.iter().map(|s| Self::entry(s)).collect(),
            current_page: 1,
            total_pages: 1,
            total_count: slugs.len() as u64,
        }
    }
}

#[async_trait]
impl ArgumentGateway for ScriptedGateway {
    async fn list_entries(&self, query: &ListQuery) -> Result<ResultPage, ApiError> {
        self.list_calls.lock().unwrap().push(query.clone());
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
        self.entries
            .lock()
            .unwrap()
            .get(slug)
            .cloned()
            .ok_or_else(|| ApiError::NotFound {
                slug: slug.to_string(),
            })
    }

    async fn list_tags(&self) -> Result<Vec<String>, ApiError> {
        Ok(self.tags.lock().unwrap().clone())
    }

    async fn submit_entry(&self, _entry: &NewEntry) -> Result<SubmitReceipt, ApiError> {
        Ok(SubmitReceipt {
            id: "scripted-id".to_string(),
            slug: None,
        })
    }

    async fn moderation_queue(&self, page: u32, _limit: u32) -> Result<ResultPage, ApiError> {
        Ok(ResultPage {
            items: Vec::new(),
            current_page: page,
            total_pages: 1,
            total_count: 0,
        })
    }

    async fn own_entries(&self) -> Result<Vec<Entry>, ApiError> {
        Ok(Vec::new())
    }

    async fn publish_entry(&self, _id: &str) -> Result<(), ApiError> {
        Err(ApiError::Request {
            status: StatusCode::NOT_IMPLEMENTED,
        })
    }

    async fn suggest_source(&self, _slug: &str, _source: &NewSource) -> Result<(), ApiError> {
        Err(ApiError::Request {
            status: StatusCode::NOT_IMPLEMENTED,
        })
    }

    async fn approve_source(&self, _slug: &str, _source_id: &str) -> Result<(), ApiError> {
        Err(ApiError::Request {
            status: StatusCode::NOT_IMPLEMENTED,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_scripted_pages_replay_in_order() {
        let gateway = ScriptedGateway::new();
        gateway.push_page(Duration::ZERO, ScriptedGateway::page_of(&["a"]));
        gateway.push_page(Duration::ZERO, ScriptedGateway::page_of(&["b", "c"]));

        let query = ListQuery::first_page(9);
        let first = gateway.list_entries(&query).await.unwrap();
        let second = gateway.list_entries(&query).await.unwrap();
        assert_eq!(first.total_count, 1);
        assert_eq!(second.total_count, 2);
        assert_eq!(gateway.list_call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dry_script_returns_empty_page() {
        let gateway = ScriptedGateway::new();
        let mut query = ListQuery::first_page(9);
        query.page = 4;

        let page = gateway.list_entries(&query).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.current_page, 4);
    }

    #[tokio::test]
    async fn test_slug_lookup_and_not_found() {
        let gateway = ScriptedGateway::new();
        gateway.insert_entry(ScriptedGateway::entry("vorhanden"));

        let found = gateway.entry_by_slug("vorhanden").await.unwrap();
        assert_eq!(found.slug, "vorhanden");

        let err = gateway.entry_by_slug("fehlt").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_tag_vocabulary() {
        let gateway = ScriptedGateway::new();
        gateway.set_tags(&["Politik", "Klima"]);
        assert_eq!(gateway.list_tags().await.unwrap(), ["Politik", "Klima"]);
    }
}
