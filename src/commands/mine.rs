//! Mine command - the current user's own submissions

use colored::Colorize;

use crate::KontraError;
use crate::api::ArgumentGateway;
use crate::output;

/// Print the signed-in user's submissions with their citation status
///
/// # Errors
///
/// Returns `KontraError` when the fetch fails (including the server
/// rejecting an unauthenticated session).
pub async fn execute(gateway: &dyn ArgumentGateway, quiet: bool) -> Result<(), KontraError> {
    let entries = gateway.own_entries().await?;

    if entries.is_empty() {
        if !quiet {
            println!("You have no submissions yet.");
        }
        return Ok(());
    }

    if !quiet {
        println!("Your submissions:");
    }
    for (index, entry) in entries.iter().enumerate() {
        println!("{}", output::entry_line(index + 1, entry, quiet));
        if !quiet {
            let pending = entry.sources.iter().filter(|s| !s.approved).count();
            if pending > 0 {
                println!("     {}", format!("{pending} suggested source(s) pending").dimmed());
            }
        }
    }
    Ok(())
}
