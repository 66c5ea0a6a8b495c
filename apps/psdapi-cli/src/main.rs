//! PSD API command-line tool.
//!
//! Runs the two PSD API operations without the HTTP server:
//!
//! ```text
//! psdapi parse LegalEntityMapping_SFDC-PSD-076858_1767096012389.csv
//! psdapi lookup SFDC-PSD-076858
//! ```
//!
//! `lookup` reads the same `COSMOS_DB_*` variables (and `.env` file) as the
//! server. Log output goes to stderr and is off unless `LOG_LEVEL` or
//! `RUST_LOG` asks for it.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use psdapi_core::store::cosmos::CosmosStore;
use psdapi_core::{CosmosConfig, LookupOutcome, ParentIdLookup, ParentRecordSource, parse_psd};

/// Printed when the lookup finds no usable record.
const NOT_FOUND_MESSAGE: &str = "No matching record found for the given PSD number.";

/// PSD number extraction and parent ID lookup
#[derive(Parser, Debug)]
#[command(name = "psdapi")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Extract the PSD number from a mapping-sheet filename
    Parse {
        /// Filename such as LegalEntityMapping_SFDC-PSD-076858_1767096012389.csv
        filename: String,
    },

    /// Look up the parent ID of the active main parent record
    Lookup {
        /// PSD number such as SFDC-PSD-076858
        psd_number: String,
    },
}

/// Initialize the tracing subscriber on stderr.
///
/// Uses `RUST_LOG` if set, otherwise `LOG_LEVEL`, otherwise logs nothing.
fn init_tracing() -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "off".to_owned());
        EnvFilter::try_new(&level)
            .with_context(|| format!("invalid log level filter: {level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Run `parse` and return the line to print.
fn run_parse(filename: &str) -> Result<String> {
    let psd_number = parse_psd(filename)?;
    Ok(psd_number.into_inner())
}

/// Run `lookup` against `source` and return the line to print.
///
/// Not-found is a normal outcome; only store failures are errors.
async fn run_lookup(source: Arc<dyn ParentRecordSource>, psd_number: &str) -> Result<String> {
    let lookup = ParentIdLookup::new(source);
    let outcome = lookup
        .lookup_parent_id(psd_number)
        .await
        .with_context(|| format!("failed to fetch parent ID for {psd_number}"))?;

    Ok(match outcome {
        LookupOutcome::Found(parent_id) => parent_id.to_string(),
        LookupOutcome::NotFound => NOT_FOUND_MESSAGE.to_owned(),
    })
}

async fn run(command: Command) -> Result<String> {
    match command {
        Command::Parse { filename } => run_parse(&filename),
        Command::Lookup { psd_number } => {
            let store = CosmosStore::new(&CosmosConfig::from_env())
                .context("failed to configure Cosmos DB")?;
            run_lookup(Arc::new(store), &psd_number).await
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = init_tracing() {
        eprintln!("{e:#}");
        return ExitCode::FAILURE;
    }

    match run(cli.command).await {
        Ok(line) => {
            println!("{line}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
