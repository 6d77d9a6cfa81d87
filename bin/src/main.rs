//! barcheck CLI - Reconcile vendor daily OHLC bars against intraday tick captures.

use anyhow::{Context, Result};
use barcheck_lib::prelude::*;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

mod display;

use display::ConsoleSink;

#[derive(Parser)]
#[command(name = "barcheck")]
#[command(
    about = "Compare a vendor's daily OHLC bars with bars built from intraday ticks",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Instrument symbol (e.g., RUT)
    #[arg(short, long, env = "BARCHECK_SYMBOL", default_value = "RUT")]
    symbol: String,

    /// Root data directory holding one subdirectory per symbol. Defaults to ~/IBData
    #[arg(short, long, env = "BARCHECK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Reference CSV file. Defaults to <data-dir>/<SYMBOL>/<symbol>.csv
    #[arg(short, long)]
    reference: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let started = Instant::now();

    let config = match cli.data_dir {
        Some(dir) => ReconcileConfig::new(&cli.symbol, dir),
        None => ReconcileConfig::with_default_data_dir(&cli.symbol),
    }
    .context("Invalid configuration")?;
    let config = match cli.reference {
        Some(path) => config.with_reference_path(path),
        None => config,
    };

    Reconciler::new(config)
        .run(ConsoleSink::stdout())
        .context("Reconciliation aborted")?;

    tracing::info!(
        "barcheck elapsed time is {} milliseconds",
        started.elapsed().as_millis()
    );
    Ok(())
}

/// Installs the log subscriber. `RUST_LOG` takes precedence over the flags.
fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
