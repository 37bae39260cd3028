//! Submit command - interactive submission form
//!
//! Prompts for the entry fields and submits. When the server rejects the
//! payload, the messages are shown and the form is re-run with the entered
//! values as initial text, so nothing typed is lost.

use dialoguer::{Confirm, Input, theme::ColorfulTheme};

use crate::KontraError;
use crate::api::{ApiError, ArgumentGateway, NewEntry, NewSource};
use crate::output;

/// Run the submission form
///
/// # Errors
///
/// Returns `KontraError` if prompting fails or the submission fails with
/// anything other than a validation rejection.
pub async fn execute(gateway: &dyn ArgumentGateway, quiet: bool) -> Result<(), KontraError> {
    let theme = ColorfulTheme::default();

    if !quiet {
        println!("Submit a new entry. It goes through moderation before publishing.");
    }

    let mut draft = NewEntry {
        thesis: String::new(),
        antithesis: String::new(),
        tags: Vec::new(),
        sources: Vec::new(),
    };

    loop {
        draft.thesis = Input::with_theme(&theme)
            .with_prompt("Thesis (the claim to answer)")
            .with_initial_text(&draft.thesis)
            .interact_text()?;

        draft.antithesis = Input::with_theme(&theme)
            .with_prompt("Counter-statement")
            .with_initial_text(&draft.antithesis)
            .interact_text()?;

        let tags_line: String = Input::with_theme(&theme)
            .with_prompt("Tags (comma-separated)")
            .with_initial_text(draft.tags.join(", "))
            .allow_empty(true)
            .interact_text()?;
        draft.tags = tags_line
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();

        if draft.sources.is_empty() {
            loop {
                let url: String = Input::with_theme(&theme)
                    .with_prompt("Source URL (empty to finish)")
                    .allow_empty(true)
                    .interact_text()?;
                if url.is_empty() {
                    break;
                }
                let title: String = Input::with_theme(&theme)
                    .with_prompt("Source title (optional)")
                    .allow_empty(true)
                    .interact_text()?;
                draft.sources.push(NewSource {
                    title: (!title.is_empty()).then_some(title),
                    url,
                });
            }
        }

        match gateway.submit_entry(&draft).await {
            Ok(receipt) => {
                if quiet {
                    println!("{}", receipt.id);
                } else {
                    println!("Submitted for review (id {}).", receipt.id);
                }
                return Ok(());
            }
            Err(ApiError::Validation { messages }) => {
                for message in &messages {
                    eprintln!("{}", output::error_line(message));
                }
                let again = Confirm::with_theme(&theme)
                    .with_prompt("Fix and resubmit?")
                    .default(true)
                    .interact()?;
                if !again {
                    return Ok(());
                }
                // Loop re-runs the form with the draft as initial text
            }
            Err(err) => return Err(err.into()),
        }
    }
}
