//! MRTD witness derivation CLI
//!
//! Reads one document record (decoded security-object tree plus data-group
//! payloads), derives the witness, and writes the two circuit artifacts.
//!
//! Run with: cargo run --release -- document.json

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use mrtd_witness::{artifacts, witness, InputDocument};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for the witness derivation tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the input document record (JSON)
    input: PathBuf,

    /// Output path for the parameterized circuit source unit
    #[arg(long, default_value = "main.nr")]
    circuit_out: PathBuf,

    /// Output path for the witness-value file
    #[arg(long, default_value = "Prover.toml")]
    witness_out: PathBuf,

    /// Increase output verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("witness derivation failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> mrtd_witness::Result<()> {
    info!(input = %cli.input.display(), "loading document record");
    let doc = InputDocument::from_path(&cli.input)?;

    let record = witness::derive_witness(&doc)?;
    info!(
        profile = %artifacts::profile_name(&record),
        "derivation complete"
    );

    std::fs::write(&cli.circuit_out, artifacts::circuit_source(&record))?;
    std::fs::write(&cli.witness_out, artifacts::witness_values(&record))?;
    info!(
        circuit = %cli.circuit_out.display(),
        witness = %cli.witness_out.display(),
        "artifacts written"
    );

    Ok(())
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "info,mrtd_witness=info",
        1 => "debug,mrtd_witness=debug",
        _ => "mrtd_witness=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    use tracing_tree::HierarchicalLayer;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            HierarchicalLayer::new(2)
                .with_targets(false)
                .with_bracketed_fields(true),
        )
        .init();
}
