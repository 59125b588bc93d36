//! Wicket - create tickets in osTicket via the web API
//!
//! The binary reads a JSON parameter document, submits one ticket-creation
//! request, and prints the result record as a single JSON object on
//! stdout. Logs go to stderr so stdout stays machine-readable.
//!
//! # Configuration
//!
//! `url` and `api_key` may be omitted from the document and supplied
//! through the environment instead (or a `.env` file):
//!
//! - `OSTICKET_URL`: Base URL of the osTicket instance
//! - `OSTICKET_API_KEY`: API key for authentication
//!
//! # Usage
//!
//! ```bash
//! # From a file
//! wicket ticket.json
//!
//! # From stdin, without sending
//! echo '{"name": "Jane Doe", ...}' | wicket --check -
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use wicket::config::Config;
use wicket::error::WicketError;
use wicket::osticket_client::OsTicketClient;
use wicket::outcome::SubmitOutcome;
use wicket::params::TicketParams;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Path to the ticket parameter document (JSON); "-" reads stdin.
    #[arg(value_name = "PARAMS")]
    params: PathBuf,

    /// Build and validate the request without sending it.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    // Logging goes to stderr; stdout is reserved for the result record.
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wicket=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let outcome = run(&cli).await;

    println!("{}", serde_json::to_string(&outcome)?);

    if outcome.failed {
        std::process::exit(1);
    }

    Ok(())
}

/// Runs one invocation end to end, folding every failure into the record.
async fn run(cli: &Cli) -> SubmitOutcome {
    let params = match load_params(cli) {
        Ok(params) => params,
        Err(e) => {
            // The key is still unknown here; nothing to sanitize against.
            tracing::error!(error = %e, "could not load ticket parameters");
            return SubmitOutcome::from_error(&e, "");
        }
    };

    match submit(&params, cli.check).await {
        Ok(outcome) => outcome,
        Err(e) => {
            let api_key = params.api_key_for_sanitization();
            tracing::error!(error = %e.sanitized_display(api_key), "ticket submission failed");
            SubmitOutcome::from_error(&e, api_key)
        }
    }
}

/// Reads, parses, and resolves the ticket parameter document.
fn load_params(cli: &Cli) -> Result<TicketParams, WicketError> {
    let document = read_document(&cli.params)?;
    let params: TicketParams = serde_json::from_str(&document)?;

    let config = Config::from_env()?;
    Ok(params.sanitize().resolve(&config))
}

/// Reads the parameter document from a file, or stdin for "-".
fn read_document(path: &Path) -> Result<String, WicketError> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Builds the client and runs one submission.
async fn submit(params: &TicketParams, check: bool) -> Result<SubmitOutcome, WicketError> {
    let client = OsTicketClient::from_params(params)?;

    if check {
        tracing::info!("check mode: the request will not be sent");
    }

    client.submit(params, check).await
}
