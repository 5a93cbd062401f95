//! Bulk Order CLI - validate an address file and order a test kit per row.
//!
//! # Usage
//!
//! ```bash
//! # Validate the file and submit one order per address
//! bulk-order addresses.csv
//!
//! # Only validate the file
//! bulk-order addresses.csv --check
//!
//! # Watch the browser, with a longer confirmation window
//! bulk-order addresses.csv --headed --timeout 10
//! ```

use anyhow::Context;
use bulkorder_browser::ChromiumAutomation;
use bulkorder_core::{AppConfig, ConsoleReporter, Reporter};
use bulkorder_submit::{SubmissionEngine, SubmissionSettings};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "bulk-order")]
#[command(author, version, about = "Order test kits for every address in a CSV file")]
struct Cli {
    /// CSV file with a header line: first_name, last_name, email,
    /// street_address, city, state, zip_code (plus optional *_shipping overrides)
    file: PathBuf,

    /// Configuration file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    headed: bool,

    /// Confirmation wait window in seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Validate the file without submitting anything
    #[arg(long)]
    check: bool,

    /// Verbose logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if self.headed {
            config.browser.headless = false;
        }
        if let Some(secs) = self.timeout {
            config.service.confirmation_timeout_secs = secs;
        }
    }
}

/// Initialize tracing subscriber for logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = if verbose { "info,bulkorder=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Returns whether the input was accepted; per-record failures don't count.
async fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut config =
        AppConfig::load_with_env(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply_overrides(&mut config);

    let reporter = Arc::new(ConsoleReporter::new());

    // Every ingestion error is already on the reporter as a FAILURE line
    let Ok(records) = bulkorder_ingest::ingest_file(&cli.file, reporter.as_ref()) else {
        return Ok(false);
    };

    if cli.check {
        info!("check only, no orders submitted");
        return Ok(true);
    }

    let engine = SubmissionEngine::new(
        Arc::new(ChromiumAutomation::new()),
        SubmissionSettings::from_config(&config),
        reporter,
    );
    let report = engine.run_batch(&records).await;

    info!(
        processed = report.len(),
        elapsed_ms = report.elapsed().map(|d| d.num_milliseconds()),
        "batch finished"
    );
    Ok(true)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    info!("Starting bulk-order v{}", env!("CARGO_PKG_VERSION"));

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            ConsoleReporter::new().failure(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
