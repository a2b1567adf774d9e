//! Command-line interface for session-synth
//!
//! # Usage Examples
//!
//! ```bash
//! # Generate records with the default inputs and output path
//! session-synth generate
//!
//! # Reproducible run against a fixed reference instant
//! session-synth generate --count 100 --seed 7 --now 2025-06-01T12:00:00Z
//!
//! # Stop on the first broken record
//! session-synth generate --fail-fast
//!
//! # Inspect tags assigned to the schema
//! session-synth annotate --schema schemas/schema.json
//!
//! # Check an output file
//! session-synth verify --input output/generated_records.json
//! ```
//!
//! Set `RUST_LOG=info` (or `debug` for per-record detail) to see progress.

use clap::{Parser, Subcommand};
use session_synth::commands::{run_annotate, run_generate, run_verify};
use session_synth::{AnnotateArgs, GenerateArgs, VerifyArgs};

#[derive(Parser)]
#[command(name = "session-synth")]
#[command(about = "Generate fake user-session records with consistent timestamps and locations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate records and write them as a JSON array
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },
    /// Print the schema with generator tags attached
    Annotate {
        #[command(flatten)]
        args: AnnotateArgs,
    },
    /// Check a generated file against the record invariants
    Verify {
        #[command(flatten)]
        args: VerifyArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { args } => run_generate(args).await,
        Commands::Annotate { args } => run_annotate(args).await,
        Commands::Verify { args } => run_verify(args).await,
    }
}
