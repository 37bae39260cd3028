//! Screen rendering for the explore session
//!
//! Plain line-oriented output: a filter summary, the current result page and
//! a pagination footer. All formatting goes through the output module so the
//! explore view and the one-shot commands look the same.

use colored::Colorize;

use crate::fetch::{FetchPhase, ViewState};
use crate::output;
use crate::query::{FilterState, SortOrder};

/// Print the filter summary line
pub fn print_filter_summary(state: &FilterState, settled_search: &str, quiet: bool) {
    if quiet {
        return;
    }
    let mut parts: Vec<String> = Vec::new();
    if !settled_search.is_empty() {
        parts.push(format!("search \"{settled_search}\""));
    }
    if !state.selected_tags().is_empty() {
        parts.push(format!("tags [{}]", state.selected_tags().join(", ")));
    }
    if state.sort_order() != SortOrder::default() {
        parts.push(format!("sort {}", state.sort_order()));
    }

    let active = state.active_filter_count();
    if parts.is_empty() {
        println!("{}", "No filters active".dimmed());
    } else {
        println!(
            "{} {}",
            format!("Filters ({active} active):").bold(),
            parts.join(", ")
        );
    }
}

/// Print the current result page, or the error state
pub fn print_view(view: &ViewState, quiet: bool) {
    if let Some(error) = &view.error {
        println!("{}", output::error_line(error));
        if view.results.is_some() && !quiet {
            println!("{}", "Showing previous results. '!' retries, 'r' resets.".dimmed());
        }
    }

    match &view.results {
        Some(page) if page.items.is_empty() => {
            if !quiet {
                println!("No matching entries found. Try different terms or fewer filters.");
            }
        }
        Some(page) => {
            for (index, entry) in page.items.iter().enumerate() {
                println!("{}", output::entry_line(index + 1, entry, quiet));
            }
            if !quiet {
                println!();
                println!("{}", output::pagination_line(page));
            }
        }
        None => {
            if view.phase == FetchPhase::Loading && !quiet {
                println!("{}", "Loading entries...".dimmed());
            }
        }
    }
}

/// Print the prompt help
pub fn print_help() {
    println!("Explore commands:");
    println!("  / <text>        search (bare '/' clears)");
    println!("  t <tag>         toggle a tag filter");
    println!("  s <order>       sort: newest, oldest, relevance");
    println!("  g <n>           go to page n");
    println!("  n / p           next / previous page");
    println!("  b / f           back / forward in view history");
    println!("  i <n>           show full entry for result n");
    println!("  tags            list available tags");
    println!("  u               print a shareable query string");
    println!("  !               retry after a failure");
    println!("  r               reset all filters");
    println!("  h               this help");
    println!("  q               quit");
}
