// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Groth16 pipeline for [`SanityCircuit`](bbwrap_circuit::SanityCircuit):
//! compile, derive an SRS and keys, prove, verify.
//!
//! | Module | Purpose |
//! |---|---|
//! | [`compile`] | lower a circuit to R1CS, with counts and digest |
//! | [`srs`] | structured reference string, toy generation and persistence |
//! | [`setup`] | SRS sizing and key derivation |
//! | [`keys`] | keys and proofs carrying their binding record |
//! | [`witness`] | frontend witness objects (full or public-only) |
//! | [`prove`] / [`verify`] | the proving and verification stages |
//! | [`artifacts`] | hex/JSON export of proof, verifying key, public witness |
//! | [`config`] | [`PipelineConfig`] and its env/file layers |
//! | [`pipeline`] | stage orchestration and the [`RunReport`] |
//!
//! # Example
//!
//! ```rust,no_run
//! use bbwrap_prover::{run, PipelineConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PipelineConfig::default().with_env()?;
//! let report = run(&config)?;
//! println!("{} constraints, verified", report.constraint_count);
//! # Ok(())
//! # }
//! ```

pub mod artifacts;
pub mod compile;
pub mod config;
pub mod curve;
pub mod digest;
pub mod error;
pub mod keys;
pub mod pipeline;
pub mod prove;
pub mod setup;
pub mod srs;
pub mod verify;
pub mod witness;

pub use artifacts::Artifacts;
pub use compile::{compile, required_srs_size, CompiledCircuit};
pub use config::PipelineConfig;
pub use curve::ProvingCurve;
pub use digest::Digest;
pub use error::{
    ArtifactError, CompileError, ConfigError, ConstructionError, PipelineError, ProvingError,
    SetupError, VerificationError,
};
pub use keys::{KeyBinding, Proof, ProvingKey, VerifyingKey};
pub use pipeline::{
    inspect, run, run_with_progress, run_witness, verify_artifacts, write_toy_srs, InspectReport,
    RunReport, Stage, StageTiming,
};
pub use prove::{prove, prover_rng};
pub use setup::{derive_keys, derive_srs};
pub use srs::Srs;
pub use verify::{verify, verify_bytes};
pub use witness::{build_witness, FullWitness, PublicWitness, WitnessObject};
