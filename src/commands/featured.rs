//! Featured command - the newest entries, homepage-style

use crate::KontraError;
use crate::api::{ArgumentGateway, FEATURED_PAGE_SIZE, ListQuery};
use crate::output;

/// Print the newest entries
///
/// # Errors
///
/// Returns `KontraError` when the listing fetch fails.
pub async fn execute(gateway: &dyn ArgumentGateway, quiet: bool) -> Result<(), KontraError> {
    let page = gateway
        .list_entries(&ListQuery::first_page(FEATURED_PAGE_SIZE))
        .await?;

    if page.items.is_empty() {
        if !quiet {
            println!("No entries published yet.");
        }
        return Ok(());
    }

    if !quiet {
        println!("Latest entries:");
    }
    for (index, entry) in page.items.iter().enumerate() {
        println!("{}", output::entry_line(index + 1, entry, quiet));
    }
    Ok(())
}
