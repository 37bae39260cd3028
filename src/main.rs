//! Kontra CLI application entry point
//!
//! This is the main executable for the kontra directory client. It provides
//! a command-line interface for browsing, searching and submitting entries
//! to a remote counter-argument directory.
//!
//! # Features
//!
//! - **Explore Mode**: interactive filtered browsing with search, tags,
//!   sorting, pagination and shareable view URLs
//! - **Search**: one-shot relevance search
//! - **Submission**: interactive form with server-side validation feedback
//! - **Moderation**: queue listing, publishing and source approval
//! - **Quiet Mode**: suppress informational output for scripting
//!
//! # Usage
//!
//! ```bash
//! # Browse interactively (default command)
//! kontra
//! kontra explore
//!
//! # Restore a shared view
//! kontra explore "?tags=Politik&sort=oldest"
//!
//! # One-shot search
//! kontra search klimawandel -t Klima
//!
//! # Show a single entry
//! kontra show windraeder-toeten-voegel
//!
//! # Submit a new entry
//! kontra submit
//!
//! # Quiet mode (only output results)
//! kontra -q search klimawandel
//! ```
//!
//! # Configuration
//!
//! Settings live in the user's config directory
//! (`~/.config/kontra/config.toml` on Linux): the API base URL, page size,
//! search debounce interval and the session cookie.

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use kontra::{
    KontraError,
    api::{ArgumentGateway, HttpGateway},
    cli::{Cli, Commands, ConfigCommands},
    commands,
    config::KontraConfig,
};

type Result<T> = std::result::Result<T, KontraError>;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

/// Handle the config command - manage application settings
///
/// # Errors
///
/// Returns `KontraError` if the configuration key is invalid, value parsing
/// fails, or configuration save fails.
fn handle_config_command(
    mut config: KontraConfig,
    command: &ConfigCommands,
    quiet: bool,
) -> Result<()> {
    match command {
        ConfigCommands::Set { setting } => {
            let parts: Vec<&str> = setting.splitn(2, '=').collect();
            if parts.len() != 2 {
                return Err(KontraError::InvalidInput(
                    "Invalid format. Use: kontra config set key=value".into(),
                ));
            }

            let key = parts[0].trim();
            let value = parts[1].trim();

            match key {
                "api_base" => config.api_base = value.to_string(),
                "web_base" => config.web_base = value.to_string(),
                "page_size" => {
                    config.page_size = value.parse::<u32>().map_err(|_| {
                        KontraError::InvalidInput(format!(
                            "Invalid value for page_size: '{value}'. Use a positive number"
                        ))
                    })?;
                }
                "debounce_ms" => {
                    config.debounce_ms = value.parse::<u64>().map_err(|_| {
                        KontraError::InvalidInput(format!(
                            "Invalid value for debounce_ms: '{value}'. Use a number of milliseconds"
                        ))
                    })?;
                }
                "quiet" => {
                    config.quiet = value.parse::<bool>().map_err(|_| {
                        KontraError::InvalidInput(format!(
                            "Invalid value for quiet: '{value}'. Use 'true' or 'false'"
                        ))
                    })?;
                }
                "session_cookie" => {
                    config.session_cookie = if value.is_empty() {
                        None
                    } else {
                        Some(value.to_string())
                    };
                }
                _ => {
                    return Err(KontraError::InvalidInput(format!(
                        "Unknown configuration key: '{key}'. Available keys: api_base, web_base, page_size, debounce_ms, quiet, session_cookie"
                    )));
                }
            }

            config.save()?;
            if !quiet {
                // The credential itself is never echoed
                if key == "session_cookie" {
                    println!("Set session_cookie");
                } else {
                    println!("Set {key} = {value}");
                }
            }
        }
        ConfigCommands::Get { key } => match key.as_str() {
            "api_base" => println!("{}", config.api_base),
            "web_base" => println!("{}", config.web_base),
            "page_size" => println!("{}", config.page_size),
            "debounce_ms" => println!("{}", config.debounce_ms),
            "quiet" => println!("{}", config.quiet),
            "session_cookie" => {
                println!(
                    "{}",
                    if config.session_cookie.is_some() {
                        "(set)"
                    } else {
                        "(not set)"
                    }
                );
            }
            _ => {
                return Err(KontraError::InvalidInput(format!(
                    "Unknown configuration key: '{key}'. Available keys: api_base, web_base, page_size, debounce_ms, quiet, session_cookie"
                )));
            }
        },
    }
    Ok(())
}

/// Main entry point for the kontra application
///
/// Loads configuration, parses command-line arguments, and dispatches to
/// the appropriate command handler.
///
/// # Errors
///
/// Returns `KontraError` if configuration loading fails, the gateway cannot
/// be constructed, or a command handler returns an error.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();

    let config = KontraConfig::load()?;
    let cli = Cli::parse_args();
    let quiet = cli.quiet || config.quiet;
    let command = cli.get_command();

    if let Commands::Config { command } = &command {
        return handle_config_command(config, command, quiet);
    }

    let gateway: Arc<dyn ArgumentGateway> = Arc::new(HttpGateway::new(
        &config.api_base,
        config.session_cookie.clone(),
    )?);

    match &command {
        Commands::Explore { query } => {
            commands::explore::execute(gateway, &config, query.as_deref(), quiet).await?;
        }
        Commands::Featured => commands::featured::execute(gateway.as_ref(), quiet).await?,
        Commands::Search { query, tags } => {
            commands::search::execute(gateway.as_ref(), query, tags, quiet).await?;
        }
        Commands::Show { slug, open } => {
            commands::show::execute(gateway.as_ref(), &config, slug, *open, quiet).await?;
        }
        Commands::Submit => commands::submit::execute(gateway.as_ref(), quiet).await?,
        Commands::Tags => commands::tags::execute(gateway.as_ref(), quiet).await?,
        Commands::Suggest { slug } => {
            commands::suggest::execute(gateway.as_ref(), slug, quiet).await?;
        }
        Commands::Mine => commands::mine::execute(gateway.as_ref(), quiet).await?,
        Commands::Moderation { command } => {
            commands::moderation::execute(gateway.as_ref(), command, quiet).await?;
        }
        Commands::Config { .. } => unreachable!(),
    }

    Ok(())
}
