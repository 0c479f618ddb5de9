// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use bbwrap_prover::PipelineError;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::SourceArgs;

#[derive(Parser)]
#[command(
    name = "bbwrap",
    about = "Prove BabyBear sanity relations inside a pairing-friendly SNARK"
)]
struct Cli {
    /// JSON config file, applied before environment and flags
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print machine-readable JSON on stdout
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Load, compile, set up, prove and verify
    Run {
        #[command(flatten)]
        source: SourceArgs,
        /// Project the verifier witness from the full witness instead of
        /// building it from public values
        #[arg(long)]
        from_full_witness: bool,
        /// Seed for the toy SRS
        #[arg(long)]
        srs_seed: Option<u64>,
        /// Fixed prover seed, for reproducible proofs
        #[arg(long)]
        prover_seed: Option<u64>,
        /// Use a stored SRS instead of generating one
        #[arg(long)]
        srs: Option<PathBuf>,
        /// Write proof, verifying key and public witness here
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Load and compile only; print shape and counts
    Inspect {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Write a toy SRS file
    Srs {
        #[command(flatten)]
        source: SourceArgs,
        /// Number of G1 powers; sized for the witness when omitted
        #[arg(long)]
        size: Option<usize>,
        /// Seed for tau
        #[arg(long)]
        seed: Option<u64>,
        /// Output file
        #[arg(long)]
        out: PathBuf,
    },
    /// Verify artifacts written by `run --out`
    Verify {
        /// Artifacts directory
        dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    output::set_json_mode(cli.json);

    match dispatch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Print `err` as JSON in JSON mode, falling back to plain stderr when
/// stdout cannot be written.
fn report_error(err: &anyhow::Error) {
    if output::is_json() {
        match output::json_output(&error_json(err)) {
            Ok(()) => return,
            Err(write_err) => {
                output::set_json_mode(false);
                output::error_msg(&format!("cannot write JSON error: {write_err:#}"));
            }
        }
    }
    output::error_msg(&format!("{err:#}"));
}

fn error_json(err: &anyhow::Error) -> serde_json::Value {
    let stage = err.downcast_ref::<PipelineError>().map(|e| e.stage());
    serde_json::json!({
        "error": format!("{err:#}"),
        "stage": stage,
    })
}

fn dispatch(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Cmd::Run {
            source,
            from_full_witness,
            srs_seed,
            prover_seed,
            srs,
            out,
        } => {
            let mut config = commands::load_config(config_path, &source)?;
            if from_full_witness {
                config.public_only = false;
            }
            if let Some(seed) = srs_seed {
                config.srs_seed = seed;
            }
            if prover_seed.is_some() {
                config.prover_seed = prover_seed;
            }
            if srs.is_some() {
                config.srs_path = srs;
            }
            if out.is_some() {
                config.artifacts_dir = out;
            }
            commands::run::run(&config)
        }
        Cmd::Inspect { source } => {
            commands::inspect::run(&commands::load_config(config_path, &source)?)
        }
        Cmd::Srs {
            source,
            size,
            seed,
            out,
        } => {
            let mut config = commands::load_config(config_path, &source)?;
            if let Some(seed) = seed {
                config.srs_seed = seed;
            }
            commands::srs::run(&config, size, &out)
        }
        Cmd::Verify { dir } => commands::verify::run(&dir),
    }
}

/// 2 when a proof was checked and rejected, 1 for any other failure.
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<PipelineError>() {
        Some(e) if e.is_rejection() => 2,
        _ => 1,
    }
}
