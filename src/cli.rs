//! Command-line interface definitions and parsing
//!
//! Defines the complete CLI structure for kontra using the `clap` crate.
//!
//! # Commands
//!
//! - **explore**: interactive filtered browsing (default)
//! - **featured**: the newest entries, homepage-style
//! - **search**: one-shot relevance search
//! - **show**: a single entry by slug
//! - **submit**: submit a new entry for moderation
//! - **tags**: list the tag vocabulary
//! - **suggest**: suggest a citation for an entry
//! - **mine**: the current user's own submissions
//! - **mod**: moderation actions (queue, publish, approve)
//! - **config**: manage client settings
//!
//! The global `--quiet` flag strips informational output for scripting.

use clap::{Parser, Subcommand};

/// Command-line client for a counter-argument directory
#[derive(Parser, Debug)]
#[command(name = "kontra", version, about)]
pub struct Cli {
    /// Suppress informational output (only print results)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The selected command, defaulting to an explore session
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Explore { query: None })
    }
}

/// Top-level commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Browse entries interactively with search, tag filters and pagination
    #[command(visible_alias = "e")]
    Explore {
        /// Query string from a shared view, e.g. "?tags=Politik&sort=oldest"
        #[arg(value_name = "QUERY")]
        query: Option<String>,
    },

    /// Show the newest entries (homepage view)
    Featured,

    /// One-shot relevance search
    #[command(visible_alias = "s")]
    Search {
        /// Search text
        query: String,

        /// Restrict to entries carrying these tags
        #[arg(short = 't', long = "tag", value_name = "TAG", num_args = 0..)]
        tags: Vec<String>,
    },

    /// Show a single entry
    Show {
        /// The entry's slug
        slug: String,

        /// Open the entry's public page in the browser
        #[arg(long)]
        open: bool,
    },

    /// Submit a new entry for moderation
    Submit,

    /// List all tags in the directory
    Tags,

    /// Suggest a citation for an entry
    Suggest {
        /// The entry's slug
        slug: String,
    },

    /// List your own submissions
    Mine,

    /// Moderation actions
    #[command(name = "mod")]
    Moderation {
        #[command(subcommand)]
        command: ModerationCommands,
    },

    /// Manage client configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Moderation subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ModerationCommands {
    /// List unpublished entries awaiting review
    Queue {
        /// Page of the queue to show
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Publish a pending entry
    Publish {
        /// The entry's id
        id: String,
    },

    /// Approve a suggested citation
    Approve {
        /// The entry's slug
        slug: String,

        /// The suggested source's id
        source_id: String,
    },
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., api_base=https://api.example.org)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., api_base)
        #[arg(value_name = "KEY")]
        key: String,
    },
}
