//! Dogmatch CLI - Search adoptable dogs, keep favorites, generate a match.
//!
//! # Usage
//!
//! ```bash
//! # Log in and open the interactive search screen
//! dogmatch
//! dogmatch shell
//!
//! # Point at another service instance or data directory
//! dogmatch --api-base-url http://localhost:8080 --data-dir /tmp/dogmatch shell
//!
//! # Inspect or reset the persisted favorites without logging in
//! dogmatch favorites list
//! dogmatch favorites clear
//! ```
//!
//! # Commands
//!
//! - `shell` - Interactive session (default)
//! - `favorites list` - Print persisted favorite ids
//! - `favorites clear` - Delete persisted favorites

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dogmatch_client::config::parse_base_url;
use dogmatch_client::{ClientConfig, FileStore, SessionClient};
use tracing_subscriber::EnvFilter;

mod commands;

/// Log filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "dogmatch_client=warn,dogmatch_cli=info";

#[derive(Parser)]
#[command(name = "dogmatch")]
#[command(author, version, about = "Find an adoptable dog")]
struct Cli {
    /// Adoption service base URL (overrides `DOGMATCH_API_BASE_URL`)
    #[arg(long, global = true)]
    api_base_url: Option<String>,

    /// Directory holding persisted favorites (overrides `DOGMATCH_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and search interactively
    Shell,
    /// Manage persisted favorites offline
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// Print favorite dog ids in the order they were added
    List,
    /// Remove every favorite
    Clear,
}

#[tokio::main]
async fn main() {
    // Load .env before the filter so RUST_LOG can come from it
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = resolve_config(ClientConfig::from_env()?, cli.api_base_url, cli.data_dir)?;
    let storage = FileStore::new(&config.data_dir);

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            tracing::info!(
                api = %config.api_base_url,
                data_dir = %config.data_dir.display(),
                "Starting shell"
            );
            let api = SessionClient::new(config.api_base_url)?;
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            commands::shell::run(api, storage, input, std::io::stdout()).await?;
        }
        Commands::Favorites { action } => match action {
            FavoritesAction::List => commands::favorites::list(storage, &mut std::io::stdout())?,
            FavoritesAction::Clear => commands::favorites::clear(storage, &mut std::io::stdout())?,
        },
    }
    Ok(())
}

/// Apply command-line overrides on top of the environment configuration.
fn resolve_config(
    mut config: ClientConfig,
    api_base_url: Option<String>,
    data_dir: Option<PathBuf>,
) -> Result<ClientConfig, Box<dyn std::error::Error>> {
    if let Some(raw) = api_base_url {
        config.api_base_url = parse_base_url(&raw)?;
    }
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    Ok(config)
}
