//! Moderation commands - queue, publish, approve
//!
//! These require a moderator session; the client sends the same requests
//! either way and lets the server reject unauthorized writes.

use crate::KontraError;
use crate::api::{ArgumentGateway, LIST_PAGE_SIZE};
use crate::cli::ModerationCommands;
use crate::output;

/// Dispatch a moderation subcommand
///
/// # Errors
///
/// Returns `KontraError` when the request fails, including validation
/// rejections for unauthorized sessions.
pub async fn execute(
    gateway: &dyn ArgumentGateway,
    command: &ModerationCommands,
    quiet: bool,
) -> Result<(), KontraError> {
    match command {
        ModerationCommands::Queue { page } => {
            let queue = gateway.moderation_queue(*page, LIST_PAGE_SIZE).await?;

            if queue.items.is_empty() {
                if !quiet {
                    println!("The moderation queue is empty.");
                }
                return Ok(());
            }

            if !quiet {
                println!("Entries awaiting review:");
            }
            for (index, entry) in queue.items.iter().enumerate() {
                println!("{}", output::entry_line(index + 1, entry, quiet));
                if !quiet && let Some(id) = &entry.id {
                    println!("     id: {id}");
                }
            }
            if !quiet {
                println!();
                println!("{}", output::pagination_line(&queue));
            }
        }
        ModerationCommands::Publish { id } => {
            gateway.publish_entry(id).await?;
            if !quiet {
                println!("Published entry {id}.");
            }
        }
        ModerationCommands::Approve { slug, source_id } => {
            gateway.approve_source(slug, source_id).await?;
            if !quiet {
                println!("Approved source {source_id} on '{slug}'.");
            }
        }
    }
    Ok(())
}
