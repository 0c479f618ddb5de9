// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Typed errors for each pipeline stage, and [`PipelineError`] tagging them
//! with the stage that failed.

use std::path::PathBuf;

use bbwrap_circuit::CircuitError;
use bbwrap_types::{CircuitShape, FieldId, LoadError};

use crate::pipeline::Stage;

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("circuit built for {actual} cannot be compiled over {expected}")]
    FieldMismatch { expected: FieldId, actual: FieldId },

    #[error(transparent)]
    Shape(#[from] CircuitError),

    #[error("synthesis failed: {0}")]
    Synthesis(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("SRS size must be a nonzero power of two, got {0}")]
    InvalidSrsSize(usize),

    #[error("invalid SRS: {0}")]
    InvalidSrs(String),

    #[error("SRS too small: constraint system needs {required} powers, SRS has {actual}")]
    SrsTooSmall { required: usize, actual: usize },

    #[error("SRS is over {actual}, constraint system is over {expected}")]
    FieldMismatch { expected: FieldId, actual: FieldId },

    #[error("key generation failed: {0}")]
    Synthesis(String),

    #[error("serialization: {0}")]
    Serialization(String),

    #[error("cannot access SRS file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConstructionError {
    #[error("circuit carries no assignment")]
    MissingAssignment,

    #[error("witness requested over {actual}, circuit is over {expected}")]
    FieldMismatch { expected: FieldId, actual: FieldId },
}

#[derive(Debug, thiserror::Error)]
pub enum ProvingError {
    #[error("witness does not satisfy {relation}")]
    Unsatisfied { relation: String },

    #[error("proving key is not bound to this constraint system")]
    KeyMismatch,

    #[error("a public-only witness cannot be used for proving")]
    PublicOnlyWitness,

    #[error("witness is over {actual}, constraint system is over {expected}")]
    FieldMismatch { expected: FieldId, actual: FieldId },

    #[error("witness shape {actual} does not match constraint system shape {expected}")]
    ShapeMismatch {
        expected: CircuitShape,
        actual: CircuitShape,
    },

    #[error("synthesis failed: {0}")]
    Synthesis(String),
}

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("proof and verifying key come from different setups")]
    KeyMismatch,

    #[error("expected {expected} public inputs, got {actual}")]
    PublicInputLength { expected: usize, actual: usize },

    #[error("malformed proof: {0}")]
    Malformed(String),

    #[error("proof rejected")]
    Rejected,
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid artifact JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid hex in {field}: {source}")]
    Hex {
        field: &'static str,
        source: hex::FromHexError,
    },

    #[error("cannot decode {field}: {reason}")]
    Decode { field: &'static str, reason: String },

    #[error("artifacts disagree on field: {0} vs {1}")]
    FieldMismatch(FieldId, FieldId),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{name}={value}: {reason}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Any stage failure. Every variant is fatal to the run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("load: {0}")]
    Load(#[from] LoadError),

    #[error("circuit: {0}")]
    Circuit(#[from] CircuitError),

    #[error("compile: {0}")]
    Compile(#[from] CompileError),

    #[error("setup: {0}")]
    Setup(#[from] SetupError),

    #[error("witness: {0}")]
    Construction(#[from] ConstructionError),

    #[error("prove: {0}")]
    Proving(#[from] ProvingError),

    #[error("verify: {0}")]
    Verification(#[from] VerificationError),

    #[error("artifacts: {0}")]
    Artifact(#[from] ArtifactError),
}

impl PipelineError {
    /// The stage that was being entered when the run failed.
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Load(_) => Stage::Loaded,
            PipelineError::Circuit(_) => Stage::Circuited,
            PipelineError::Compile(_) => Stage::Compiled,
            PipelineError::Setup(_) => Stage::SetUp,
            PipelineError::Construction(_) | PipelineError::Proving(_) => Stage::Proved,
            PipelineError::Verification(_) | PipelineError::Artifact(_) => Stage::Verified,
        }
    }

    /// A verifier rejection: the proof was checked and found wanting, as
    /// opposed to the pipeline failing to get that far.
    pub fn is_rejection(&self) -> bool {
        matches!(self, PipelineError::Verification(_))
    }
}
