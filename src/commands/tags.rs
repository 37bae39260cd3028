//! Tags command - list the tag vocabulary

use crate::KontraError;
use crate::api::ArgumentGateway;
use crate::output;

/// Print all tags known to the directory
///
/// # Errors
///
/// Returns `KontraError` when the tag fetch fails.
pub async fn execute(gateway: &dyn ArgumentGateway, quiet: bool) -> Result<(), KontraError> {
    let tags = gateway.list_tags().await?;

    if tags.is_empty() {
        if !quiet {
            println!("No tags in the directory.");
        }
        return Ok(());
    }

    if !quiet {
        println!("Tags in the directory:");
    }
    for tag in &tags {
        println!("{}", output::tag_line(tag, false, quiet));
    }
    Ok(())
}
