//! Kontra - a command-line client for a counter-argument directory
//!
//! This library provides the pieces behind the `kontra` binary: a narrow
//! gateway over the directory's HTTP API, a filter state store with a
//! derived query signature, a URL synchronizer over an injected navigation
//! port, and a fetch coordinator that debounces search input and suppresses
//! stale responses.

use thiserror::Error;

pub mod api;
pub mod browse;
pub mod cli;
pub mod commands;
pub mod config;
pub mod fetch;
pub mod nav;
pub mod output;
pub mod query;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum KontraError {
    /// Remote API failure
    #[error("API error: {0}")]
    Api(#[from] api::ApiError),
    /// Rejected filter mutation
    #[error("Invalid query: {0}")]
    Query(#[from] query::QueryError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Interactive prompt failure
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
