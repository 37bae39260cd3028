//! The gateway trait and its HTTP implementation
//!
//! `ArgumentGateway` is the seam the fetch coordinator and the commands are
//! written against; `HttpGateway` is the production implementation over
//! `reqwest`. The session credential is attached verbatim to every request
//! and is never logged, inspected or rewritten.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, header};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::ApiError;
use super::types::{
    Entry, ListQuery, NewEntry, NewSource, ResultPage, ServerMessage, SubmitReceipt,
    tags_from_value,
};

/// Narrow interface over the remote directory
///
/// Implementations must normalize every failure into [`ApiError`]; callers
/// never see transport-level error shapes.
#[async_trait]
pub trait ArgumentGateway: Send + Sync {
    /// Fetch one page of the filtered listing
    async fn list_entries(&self, query: &ListQuery) -> Result<ResultPage, ApiError>;

    /// Full-text relevance search, unpaginated
    async fn search_entries(&self, query: &str, tags: &[String]) -> Result<Vec<Entry>, ApiError>;

    /// Fetch a single entry; a 404 becomes [`ApiError::NotFound`]
    async fn entry_by_slug(&self, slug: &str) -> Result<Entry, ApiError>;

    /// Fetch the tag vocabulary as canonical names
    async fn list_tags(&self) -> Result<Vec<String>, ApiError>;

    /// Submit a new entry for moderation
    async fn submit_entry(&self, entry: &NewEntry) -> Result<SubmitReceipt, ApiError>;

    /// Fetch one page of unpublished entries (moderators only)
    async fn moderation_queue(&self, page: u32, limit: u32) -> Result<ResultPage, ApiError>;

    /// Fetch the current user's own submissions
    async fn own_entries(&self) -> Result<Vec<Entry>, ApiError>;

    /// Publish a pending entry (moderators only)
    async fn publish_entry(&self, id: &str) -> Result<(), ApiError>;

    /// Suggest a citation for an entry
    async fn suggest_source(&self, slug: &str, source: &NewSource) -> Result<(), ApiError>;

    /// Approve a suggested citation (moderators only)
    async fn approve_source(&self, slug: &str, source_id: &str) -> Result<(), ApiError>;
}

/// `reqwest`-backed gateway against the directory's HTTP API
pub struct HttpGateway {
    client: Client,
    base: String,
    session_cookie: Option<String>,
}

impl HttpGateway {
    /// Create a gateway for the given API base URL
    ///
    /// The optional session cookie is sent verbatim on every request.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Network` if the HTTP client cannot be constructed.
    pub fn new(base: impl Into<String>, session_cookie: Option<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(ApiError::Network)?;
        let base = base.into().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base,
            session_cookie,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "api request");
        let mut builder = self
            .client
            .request(method, format!("{}{path}", self.base))
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = &self.session_cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await.map_err(ApiError::Network)?;
        let response = Self::check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send a request whose response body is acknowledged but not used
    async fn send_ack(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        let response = builder.send().await.map_err(ApiError::Network)?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status.is_client_error() {
            // 4xx with a structured body becomes a validation rejection
            let body: Result<ServerMessage, _> = response.json().await;
            if let Ok(ServerMessage {
                message: Some(message),
            }) = body
            {
                return Err(ApiError::Validation {
                    messages: vec![message],
                });
            }
        }
        Err(ApiError::Request { status })
    }
}

#[async_trait]
impl ArgumentGateway for HttpGateway {
    async fn list_entries(&self, query: &ListQuery) -> Result<ResultPage, ApiError> {
        let mut pairs: Vec<(&str, String)> = vec![
            ("page", query.page.to_string()),
            ("limit", query.limit.to_string()),
        ];
        if !query.search.is_empty() {
            pairs.push(("search", query.search.clone()));
        }
        if !query.tags.is_empty() {
            pairs.push(("tags", query.tags.join(",")));
        }
        pairs.push(("sort", query.sort.to_string()));

        self.send_json(self.request(Method::GET, "/api/arguments").query(&pairs))
            .await
    }

    async fn search_entries(&self, query: &str, tags: &[String]) -> Result<Vec<Entry>, ApiError> {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if !query.is_empty() {
            pairs.push(("q", query.to_string()));
        }
        if !tags.is_empty() {
            pairs.push(("tags", tags.join(",")));
        }

        self.send_json(
            self.request(Method::GET, "/api/arguments/search")
                .query(&pairs),
        )
        .await
    }

    async fn entry_by_slug(&self, slug: &str) -> Result<Entry, ApiError> {
        let builder = self.request(Method::GET, &format!("/api/arguments/{slug}"));
        let response = builder.send().await.map_err(ApiError::Network)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                slug: slug.to_string(),
            });
        }
        let response = Self::check_status(response).await?;
        response
            .json::<Entry>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn list_tags(&self) -> Result<Vec<String>, ApiError> {
        let value: serde_json::Value = self.send_json(self.request(Method::GET, "/api/tags")).await?;
        tags_from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn submit_entry(&self, entry: &NewEntry) -> Result<SubmitReceipt, ApiError> {
        self.send_json(self.request(Method::POST, "/api/arguments").json(entry))
            .await
    }

    async fn moderation_queue(&self, page: u32, limit: u32) -> Result<ResultPage, ApiError> {
        let pairs = [("page", page.to_string()), ("limit", limit.to_string())];
        self.send_json(
            self.request(Method::GET, "/api/arguments/moderation")
                .query(&pairs),
        )
        .await
    }

    async fn own_entries(&self) -> Result<Vec<Entry>, ApiError> {
        self.send_json(self.request(Method::GET, "/api/arguments/user"))
            .await
    }

    async fn publish_entry(&self, id: &str) -> Result<(), ApiError> {
        self.send_ack(self.request(Method::PUT, &format!("/api/arguments/{id}/publish")))
            .await
    }

    async fn suggest_source(&self, slug: &str, source: &NewSource) -> Result<(), ApiError> {
        self.send_ack(
            self.request(Method::POST, &format!("/api/arguments/{slug}/sources"))
                .json(source),
        )
        .await
    }

    async fn approve_source(&self, slug: &str, source_id: &str) -> Result<(), ApiError> {
        self.send_ack(self.request(
            Method::PUT,
            &format!("/api/arguments/{slug}/sources/{source_id}/approve"),
        ))
        .await
    }
}
