// File: services/courtbook_cli/src/main.rs
//! Courtbook CLI - browse courts and manage reservations

mod commands;
mod output;

use clap::Parser;
use commands::Commands;
use courtbook_common::{logging, CourtbookError};
use courtbook_config::{load_config, AppConfig};
use courtbook_services::Courtbook;
use std::process::ExitCode;
use tracing::{debug, Level};

/// Where the session is kept when the configuration does not say.
const DEFAULT_SESSION_FILE: &str = ".courtbook/session.json";

#[derive(Parser, Debug)]
#[command(name = "courtbook")]
#[command(about = "Book sports courts from the command line")]
#[command(version)]
struct Cli {
    /// Backend base URL, e.g. http://localhost:8000/api
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Session file (overrides session.storage_path)
    #[arg(long, global = true)]
    session_file: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(url) = &self.base_url {
            config.api.base_url = url.clone();
        }
        if let Some(path) = &self.session_file {
            config.session.storage_path = Some(path.clone());
        }
        if config.session.storage_path.is_none() {
            config.session.storage_path = Some(DEFAULT_SESSION_FILE.to_string());
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            if matches!(err, CourtbookError::AuthError(_)) {
                eprintln!("Please log in again: courtbook login --email <email> --password <password>");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CourtbookError> {
    let mut config = load_config()?;
    cli.apply_overrides(&mut config);

    if cli.verbose {
        logging::init_with_level(Level::DEBUG);
    } else {
        logging::init_from_config(&config.logging);
    }
    debug!("Using backend {}", config.api.base_url);

    let app = Courtbook::from_config(&config)?;
    cli.command.execute(&app).await
}
