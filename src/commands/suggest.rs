//! Suggest command - propose a citation for an entry

use dialoguer::{Input, theme::ColorfulTheme};

use crate::KontraError;
use crate::api::{ArgumentGateway, NewSource};

/// Prompt for a source and suggest it for the given entry
///
/// # Errors
///
/// Returns `KontraError` if prompting fails or the suggestion is rejected.
pub async fn execute(
    gateway: &dyn ArgumentGateway,
    slug: &str,
    quiet: bool,
) -> Result<(), KontraError> {
    let theme = ColorfulTheme::default();

    let url: String = Input::with_theme(&theme)
        .with_prompt("Source URL")
        .interact_text()?;
    let title: String = Input::with_theme(&theme)
        .with_prompt("Source title (optional)")
        .allow_empty(true)
        .interact_text()?;

    let source = NewSource {
        title: (!title.is_empty()).then_some(title),
        url,
    };
    gateway.suggest_source(slug, &source).await?;

    if !quiet {
        println!("Source suggested for '{slug}'. A moderator will review it.");
    }
    Ok(())
}
