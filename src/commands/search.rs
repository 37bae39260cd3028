//! Search command - one-shot relevance search

use crate::KontraError;
use crate::api::ArgumentGateway;
use crate::output;

/// Run a relevance search and print the matches
///
/// # Errors
///
/// Returns `KontraError` when the search request fails.
pub async fn execute(
    gateway: &dyn ArgumentGateway,
    query: &str,
    tags: &[String],
    quiet: bool,
) -> Result<(), KontraError> {
    let entries = gateway.search_entries(query, tags).await?;

    if entries.is_empty() {
        if !quiet {
            if tags.is_empty() {
                println!("No entries matching '{query}'");
            } else {
                println!("No entries matching '{query}' with tags [{}]", tags.join(", "));
            }
        }
        return Ok(());
    }

    if !quiet {
        println!("Found {} matching entr{}:", entries.len(), if entries.len() == 1 { "y" } else { "ies" });
    }
    for (index, entry) in entries.iter().enumerate() {
        println!("{}", output::entry_line(index + 1, entry, quiet));
    }
    Ok(())
}
