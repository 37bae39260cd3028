//! Interactive explore command
//!
//! Runs an [`ExploreSession`] over a prompt loop. Filter actions go to the
//! session; display-only actions (help, share, inspect, tags, quit) are
//! handled here so the session stays free of terminal concerns.

use std::io::{self, Write};
use std::sync::Arc;

use crate::KontraError;
use crate::api::ArgumentGateway;
use crate::browse::{Action, ExploreSession, parse_action, ui};
use crate::config::KontraConfig;
use crate::nav::HistoryNavigation;
use crate::output;

/// Run the interactive explore session
///
/// `initial_query` restores a shared view, e.g. `"?tags=Politik&sort=oldest"`.
///
/// # Errors
///
/// Returns `KontraError` if reading from the terminal fails. Fetch failures
/// are view state, not errors: the loop keeps running with the previous
/// results visible.
pub async fn execute(
    gateway: Arc<dyn ArgumentGateway>,
    config: &KontraConfig,
    initial_query: Option<&str>,
    quiet: bool,
) -> Result<(), KontraError> {
    let nav = HistoryNavigation::with_query(initial_query.unwrap_or(""));
    let mut session = ExploreSession::new(
        Arc::clone(&gateway),
        nav,
        config.page_size,
        config.debounce(),
    );

    // Tag vocabulary, fetched once on entry; the explore view is usable
    // without it
    let vocabulary = match gateway.list_tags().await {
        Ok(tags) => tags,
        Err(err) => {
            if !quiet {
                eprintln!("{}", output::error_line(&format!("Could not load tags: {err}")));
            }
            Vec::new()
        }
    };

    session.start().await;
    render(&session, quiet).await;
    if !quiet {
        println!("Type 'h' for help, 'q' to quit.");
    }

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let action = match parse_action(line) {
            Ok(action) => action,
            Err(err) => {
                eprintln!("{}", output::error_line(&err.to_string()));
                continue;
            }
        };

        match action {
            Action::Quit => break,
            Action::Help => {
                ui::print_help();
                continue;
            }
            Action::Share => {
                let query = session.share_query();
                if query.is_empty() {
                    println!("(default view, no parameters)");
                } else {
                    println!("{query}");
                }
                continue;
            }
            Action::Tags => {
                if vocabulary.is_empty() {
                    println!("No tags available.");
                } else {
                    for tag in &vocabulary {
                        let selected = session.state().selected_tags().contains(tag);
                        println!("{}", output::tag_line(tag, selected, quiet));
                    }
                }
                continue;
            }
            Action::Inspect(number) => {
                let view = session.view().await;
                let entry = view
                    .results
                    .as_ref()
                    .and_then(|page| page.items.get(number.wrapping_sub(1)));
                match entry {
                    Some(entry) => println!("{}", output::entry_card(entry)),
                    None => eprintln!(
                        "{}",
                        output::error_line(&format!("No result number {number} on this page"))
                    ),
                }
                continue;
            }
            Action::Search(text) => {
                session.set_search(&text);
                session.wait_for_search().await;
            }
            Action::ToggleTag(tag) => session.toggle_tag(&tag).await,
            Action::Sort(order) => session.set_sort(order).await,
            Action::Goto(page) => {
                if let Err(err) = session.set_page(page).await {
                    eprintln!("{}", output::error_line(&err.to_string()));
                    continue;
                }
            }
            Action::Next => {
                if !session.next_page().await {
                    if !quiet {
                        println!("Already on the last page.");
                    }
                    continue;
                }
            }
            Action::Prev => {
                if !session.prev_page().await {
                    if !quiet {
                        println!("Already on the first page.");
                    }
                    continue;
                }
            }
            Action::Reset => session.reset().await,
            Action::Back => {
                if !session.back().await {
                    if !quiet {
                        println!("No earlier view in history.");
                    }
                    continue;
                }
            }
            Action::Forward => {
                if !session.forward().await {
                    if !quiet {
                        println!("No later view in history.");
                    }
                    continue;
                }
            }
            Action::Retry => session.retry().await,
        }

        render(&session, quiet).await;
    }

    Ok(())
}

async fn render(session: &ExploreSession<HistoryNavigation>, quiet: bool) {
    if !quiet {
        println!();
    }
    ui::print_filter_summary(session.state(), session.settled_search(), quiet);
    let view = session.view().await;
    ui::print_view(&view, quiet);
}
