//! Gateway error taxonomy
//!
//! All remote failures are normalized into one of these shapes:
//!
//! - **`Network`**: the request never produced a response (DNS, refused
//!   connection, timeout)
//! - **`Request`**: a non-2xx status without a usable message body
//! - **`Validation`**: a 4xx status where the server reported what was wrong
//! - **`NotFound`**: a single-entity lookup that resolved to nothing
//! - **`Decode`**: a 2xx response whose body did not match the contract
//!
//! Callers branch on the variant, never on status codes or source errors.

use reqwest::StatusCode;
use thiserror::Error;

/// Failures surfaced by the remote data gateway
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure before any response arrived
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Non-success HTTP status without a structured message
    #[error("Server returned {status}")]
    Request {
        /// The HTTP status the server answered with
        status: StatusCode,
    },

    /// The server rejected the request and said why
    #[error("Rejected by server: {}", messages.join("; "))]
    Validation {
        /// Server-provided messages, usually one per invalid field
        messages: Vec<String>,
    },

    /// A slug or id that does not resolve to an entry
    #[error("No entry found for '{slug}'")]
    NotFound {
        /// The identifier that failed to resolve
        slug: String,
    },

    /// A successful response whose body could not be deserialized
    #[error("Could not decode server response: {0}")]
    Decode(String),
}

impl ApiError {
    /// True for the not-found case, so callers can render a dedicated
    /// missing-entry view instead of a generic failure
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
