//! # CLI Layer
//!
//! The CLI layer is the **only** place in the workspace that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs a tracing subscriber
//! - Handles argument parsing
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Load configuration and install the name policy
//! 3. **Dispatch**: Route commands to handlers
//! 4. **Error Handling**: Errors bubble up to `main`, which prints them and exits with 1

use super::handlers::{self, AppState};
use super::setup::{Cli, Commands, ConfigCommands};
use anyhow::{Context, Result};
use attrset::config::AttrsConfig;
use attrset::NamePolicy;
use clap::Parser;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = handlers::resolve_config_path(cli.config.as_deref());
    let config = AttrsConfig::load(config_path.as_deref()).with_context(|| match &config_path {
        Some(path) => format!("Failed to load config from {}", path.display()),
        None => "Failed to load config".to_string(),
    })?;

    let output = match &cli.command {
        Commands::Config { action } => match action.as_ref().unwrap_or(&ConfigCommands::Show) {
            ConfigCommands::Show => handlers::config_show(&config)?,
            ConfigCommands::Path => handlers::config_path(config_path.as_deref()),
            ConfigCommands::Template => handlers::config_template(),
        },
        Commands::Tokens { values } => handlers::tokens(values),
        Commands::Merge { sets, format } => {
            let state = create_app_state(&config)?;
            handlers::merge(&state, sets, *format)?
        }
        Commands::Tag {
            name,
            sets,
            content,
        } => {
            let state = create_app_state(&config)?;
            handlers::tag(&state, name, sets, content.as_deref())?
        }
    };

    println!("{}", output);
    Ok(())
}

/// Installs the configured policy process-wide and hands handlers a reference to it.
fn create_app_state(config: &AttrsConfig) -> Result<AppState<'static>> {
    NamePolicy::install(config.policy()?)?;
    Ok(AppState::new(NamePolicy::global(), config.render_options()))
}

/// Logs go to stderr so they never mix with rendered output.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
