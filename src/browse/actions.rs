//! Line-based actions for the explore session
//!
//! The explore prompt reads one line per action. Filter-changing actions are
//! applied to the session; display actions (help, share, inspect, quit) are
//! handled by the command loop itself.

use thiserror::Error;

use crate::query::{QueryError, SortOrder};

/// Everything the explore prompt understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// `/ <text>` - set the search text (empty clears it)
    Search(String),
    /// `t <tag>` - toggle a tag filter
    ToggleTag(String),
    /// `s <order>` - change the sort order
    Sort(SortOrder),
    /// `g <n>` - jump to a page
    Goto(u32),
    /// `n` - next page
    Next,
    /// `p` - previous page
    Prev,
    /// `r` - reset all filters
    Reset,
    /// `b` - back in view history
    Back,
    /// `f` - forward in view history
    Forward,
    /// `!` - retry the last fetch
    Retry,
    /// `u` - print a shareable query string for the current view
    Share,
    /// `i <n>` - show the full entry for result number n
    Inspect(usize),
    /// `tags` - list the tag vocabulary
    Tags,
    /// `h` or `?` - show help
    Help,
    /// `q`, `x`, `quit` or `exit`
    Quit,
}

/// Rejected prompt input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("Unknown command '{0}'. Type 'h' for help")]
    Unknown(String),

    #[error("Missing argument for '{0}'")]
    MissingArgument(&'static str),

    #[error("Not a number: '{0}'")]
    InvalidNumber(String),

    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Parse one prompt line into an action
///
/// # Errors
///
/// Returns `ActionError` for unknown commands, missing arguments, and
/// invalid sort orders or numbers. The caller is expected to skip empty
/// lines before calling.
pub fn parse_action(line: &str) -> Result<Action, ActionError> {
    let line = line.trim();

    // Search is special-cased so free text may contain spaces
    if let Some(rest) = line.strip_prefix('/') {
        return Ok(Action::Search(rest.trim().to_string()));
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "t" | "tag" => {
            if rest.is_empty() {
                return Err(ActionError::MissingArgument("t <tag>"));
            }
            Ok(Action::ToggleTag(rest.to_string()))
        }
        "s" | "sort" => {
            if rest.is_empty() {
                return Err(ActionError::MissingArgument("s <newest|oldest|relevance>"));
            }
            Ok(Action::Sort(SortOrder::parse_strict(rest)?))
        }
        "g" | "goto" => {
            if rest.is_empty() {
                return Err(ActionError::MissingArgument("g <page>"));
            }
            let page = rest
                .parse::<u32>()
                .map_err(|_| ActionError::InvalidNumber(rest.to_string()))?;
            Ok(Action::Goto(page))
        }
        "i" | "inspect" => {
            if rest.is_empty() {
                return Err(ActionError::MissingArgument("i <result number>"));
            }
            let index = rest
                .parse::<usize>()
                .map_err(|_| ActionError::InvalidNumber(rest.to_string()))?;
            Ok(Action::Inspect(index))
        }
        "n" | "next" => Ok(Action::Next),
        "p" | "prev" => Ok(Action::Prev),
        "r" | "reset" => Ok(Action::Reset),
        "b" | "back" => Ok(Action::Back),
        "f" | "forward" => Ok(Action::Forward),
        "!" | "retry" => Ok(Action::Retry),
        "u" | "url" => Ok(Action::Share),
        "tags" => Ok(Action::Tags),
        "h" | "?" | "help" => Ok(Action::Help),
        "q" | "x" | "quit" | "exit" => Ok(Action::Quit),
        other => Err(ActionError::Unknown(other.to_string())),
    }
}
