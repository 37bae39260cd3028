//! Show command - a single entry by slug

use crate::KontraError;
use crate::api::ArgumentGateway;
use crate::config::KontraConfig;
use crate::output;

/// Fetch and print one entry
///
/// A missing slug renders a dedicated not-found message rather than a
/// generic failure. With `open_page`, the entry's public page is opened in
/// the system browser.
///
/// # Errors
///
/// Returns `KontraError` for failures other than not-found, or when the
/// browser cannot be launched.
pub async fn execute(
    gateway: &dyn ArgumentGateway,
    config: &KontraConfig,
    slug: &str,
    open_page: bool,
    quiet: bool,
) -> Result<(), KontraError> {
    let entry = match gateway.entry_by_slug(slug).await {
        Ok(entry) => entry,
        Err(err) if err.is_not_found() => {
            println!("No entry found for '{slug}'. The link may be stale or the entry unpublished.");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    println!("{}", output::entry_card(&entry));

    if open_page {
        let url = format!("{}/a/{}", config.web_base.trim_end_matches('/'), entry.slug);
        open::that(&url)?;
        if !quiet {
            println!("Opened {url}");
        }
    }
    Ok(())
}
