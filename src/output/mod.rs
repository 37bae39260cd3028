//! Output formatting for CLI display
//!
//! Shared formatting for entries, tags, pagination and errors, used by the
//! explore view and the one-shot commands. Quiet mode strips decoration so
//! output stays scriptable.

use colored::Colorize;

use crate::api::{Entry, ResultPage};

/// Shorten a text to at most `max` characters, appending an ellipsis
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut.trim_end())
}

/// One listing line for an entry
#[must_use]
pub fn entry_line(number: usize, entry: &Entry, quiet: bool) -> String {
    if quiet {
        return entry.slug.clone();
    }
    let tags = if entry.tags.is_empty() {
        "no tags".dimmed().to_string()
    } else {
        format!("[{}]", entry.tags.join(", ")).cyan().to_string()
    };
    format!(
        "{:>3}. {}\n     {} {}",
        number,
        entry.thesis.bold(),
        truncate(entry.reply(), 100),
        tags
    )
}

/// Full multi-line rendering of a single entry
#[must_use]
pub fn entry_card(entry: &Entry) -> String {
    let mut lines = Vec::new();
    lines.push(format!("{}", entry.thesis.bold()));
    lines.push(String::new());
    lines.push(entry.reply().to_string());

    if !entry.tags.is_empty() {
        lines.push(String::new());
        lines.push(format!("Tags: {}", entry.tags.join(", ").cyan()));
    }

    if !entry.sources.is_empty() {
        lines.push(String::new());
        lines.push("Sources:".to_string());
        for source in &entry.sources {
            let marker = if source.approved { "✓" } else { "…" };
            match &source.title {
                Some(title) => lines.push(format!("  {marker} {title} - {}", source.url)),
                None => lines.push(format!("  {marker} {}", source.url)),
            }
        }
    }

    if let Some(created) = entry.created_at {
        lines.push(String::new());
        lines.push(
            format!("Published: {}", created.format("%Y-%m-%d"))
                .dimmed()
                .to_string(),
        );
    }

    lines.push(String::new());
    lines.push(format!("Slug: {}", entry.slug).dimmed().to_string());
    lines.join("\n")
}

/// One line of a tag listing
#[must_use]
pub fn tag_line(tag: &str, selected: bool, quiet: bool) -> String {
    if quiet {
        tag.to_string()
    } else if selected {
        format!("  {} {}", "*".green(), tag.green())
    } else {
        format!("    {tag}")
    }
}

/// Pagination footer for a result page
#[must_use]
pub fn pagination_line(page: &ResultPage) -> String {
    let count = match page.total_count {
        1 => "1 entry found".to_string(),
        n => format!("{n} entries found"),
    };
    if page.total_pages > 1 {
        format!(
            "{count} - page {}/{}",
            page.current_page, page.total_pages
        )
    } else {
        count
    }
}

/// Error line in the shared style
#[must_use]
pub fn error_line(message: &str) -> String {
    format!("{} {message}", "Error:".red().bold())
}
