// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Stage orchestration: load → circuit → compile → setup → prove → verify.
//!
//! Stages run strictly in order and the first error ends the run. There is
//! no resume; a failed run starts again from loading.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use ark_bls12_381::Bls12_381;
use ark_bn254::Bn254;
use rand::{
    rngs::{OsRng, StdRng},
    SeedableRng,
};
use bbwrap_circuit::SanityCircuit;
use bbwrap_types::{CircuitShape, FieldId, Witness};
use serde::{Deserialize, Serialize};

use crate::{
    artifacts::Artifacts,
    compile::compile,
    config::PipelineConfig,
    curve::ProvingCurve,
    digest::Digest,
    error::{PipelineError, SetupError, VerificationError},
    prove::{prove, prover_rng},
    setup::{derive_keys, derive_srs},
    srs::Srs,
    verify::verify,
    witness::build_witness,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Loaded,
    Circuited,
    Compiled,
    SetUp,
    Proved,
    Verified,
    Failed,
}

impl Stage {
    /// Successful states in the order a run passes through them.
    pub const SEQUENCE: [Stage; 6] = [
        Stage::Loaded,
        Stage::Circuited,
        Stage::Compiled,
        Stage::SetUp,
        Stage::Proved,
        Stage::Verified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Loaded => "loaded",
            Stage::Circuited => "circuited",
            Stage::Compiled => "compiled",
            Stage::SetUp => "set_up",
            Stage::Proved => "proved",
            Stage::Verified => "verified",
            Stage::Failed => "failed",
        }
    }

    /// Present-tense label for progress output.
    pub fn action(&self) -> &'static str {
        match self {
            Stage::Loaded => "loading witness",
            Stage::Circuited => "building circuit",
            Stage::Compiled => "compiling",
            Stage::SetUp => "deriving SRS and keys",
            Stage::Proved => "proving",
            Stage::Verified => "verifying",
            Stage::Failed => "failed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageTiming {
    pub stage: Stage,
    pub millis: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub source: String,
    pub field_id: FieldId,
    pub shape: CircuitShape,
    pub constraint_count: usize,
    pub variable_count: usize,
    pub public_inputs: usize,
    pub srs_size: usize,
    pub public_only: bool,
    pub circuit_digest: Digest,
    pub stage: Stage,
    pub timings: Vec<StageTiming>,
    pub artifacts_dir: Option<PathBuf>,
}

impl RunReport {
    pub fn total_millis(&self) -> f64 {
        self.timings.iter().map(|t| t.millis).sum()
    }
}

/// Result of loading and compiling only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InspectReport {
    pub source: String,
    pub field_id: FieldId,
    pub shape: CircuitShape,
    pub constraint_count: usize,
    pub variable_count: usize,
    pub public_inputs: usize,
    pub required_srs_size: usize,
    pub circuit_digest: Digest,
    pub relations: Vec<String>,
}

/// Times each stage, logs it inside a span, and reports it to the caller.
struct Progress<'a> {
    timings: Vec<StageTiming>,
    on_stage: &'a mut dyn FnMut(Stage),
}

impl Progress<'_> {
    fn stage<T>(
        &mut self,
        stage: Stage,
        f: impl FnOnce() -> Result<T, PipelineError>,
    ) -> Result<T, PipelineError> {
        let span = tracing::info_span!("stage", %stage);
        let _guard = span.enter();

        let start = Instant::now();
        let out = f()?;
        let millis = start.elapsed().as_secs_f64() * 1000.0;

        tracing::info!(elapsed_ms = millis, "{}", stage.action());
        self.timings.push(StageTiming { stage, millis });
        (self.on_stage)(stage);
        Ok(out)
    }
}

/// Run every stage for the witness named by `config`.
pub fn run(config: &PipelineConfig) -> Result<RunReport, PipelineError> {
    run_with_progress(config, |_| {})
}

/// [`run`], calling `on_stage` as each stage completes.
pub fn run_with_progress(
    config: &PipelineConfig,
    mut on_stage: impl FnMut(Stage),
) -> Result<RunReport, PipelineError> {
    let source = config.witness_source();
    let mut progress = Progress {
        timings: Vec::with_capacity(Stage::SEQUENCE.len()),
        on_stage: &mut on_stage,
    };

    let result = progress
        .stage(Stage::Loaded, || Ok(source.load()?))
        .and_then(|witness| dispatch(config, &witness, source.describe(), &mut progress));
    if let Err(e) = &result {
        tracing::error!(stage = %e.stage(), error = %e, "run failed");
    }
    result
}

/// Run every stage after loading, on an already parsed witness.
pub fn run_witness(config: &PipelineConfig, witness: &Witness) -> Result<RunReport, PipelineError> {
    let mut on_stage = |_: Stage| {};
    let mut progress = Progress {
        timings: Vec::with_capacity(Stage::SEQUENCE.len()),
        on_stage: &mut on_stage,
    };
    dispatch(config, witness, "<in memory>".into(), &mut progress)
}

fn dispatch(
    config: &PipelineConfig,
    witness: &Witness,
    source: String,
    progress: &mut Progress<'_>,
) -> Result<RunReport, PipelineError> {
    match config.field_id {
        FieldId::Bn254 => run_on::<Bn254>(config, witness, source, progress),
        FieldId::Bls12_381 => run_on::<Bls12_381>(config, witness, source, progress),
    }
}

fn run_on<E: ProvingCurve>(
    config: &PipelineConfig,
    witness: &Witness,
    source: String,
    progress: &mut Progress<'_>,
) -> Result<RunReport, PipelineError> {
    let field_id = config.field_id;

    let circuit = progress.stage(Stage::Circuited, || {
        Ok(SanityCircuit::<E::ScalarField>::from_witness(witness)?)
    })?;

    let cs = progress.stage(Stage::Compiled, || Ok(compile::<E>(field_id, &circuit)?))?;
    tracing::info!(
        constraints = cs.constraint_count(),
        variables = cs.variable_count(),
        public_inputs = cs.public_input_count(),
        "constraint system"
    );

    let (srs_size, pk, vk) = progress.stage(Stage::SetUp, || {
        let srs = match &config.srs_path {
            Some(path) => Srs::<E>::load(path)?,
            None => derive_srs(&cs, &mut StdRng::seed_from_u64(config.srs_seed))?,
        };
        let (pk, vk) = derive_keys(&cs, &srs, &mut OsRng)?;
        Ok((srs.size(), pk, vk))
    })?;

    let (proof, public) = progress.stage(Stage::Proved, || {
        let full = build_witness::<E>(&circuit, field_id, false)?;
        let proof = prove(&cs, &pk, &full, &mut prover_rng(config.prover_seed))?;
        let public = if config.public_only {
            build_witness::<E>(&circuit, field_id, true)?.public()
        } else {
            full.public()
        };
        Ok((proof, public))
    })?;

    progress.stage(Stage::Verified, || Ok(verify(&proof, &vk, &public)?))?;

    if let Some(dir) = &config.artifacts_dir {
        Artifacts::new(&proof, &vk, &public)?.write_dir(dir)?;
    }

    Ok(RunReport {
        source,
        field_id,
        shape: cs.shape(),
        constraint_count: cs.constraint_count(),
        variable_count: cs.variable_count(),
        public_inputs: cs.public_input_count(),
        srs_size,
        public_only: config.public_only,
        circuit_digest: cs.digest(),
        stage: Stage::Verified,
        timings: std::mem::take(&mut progress.timings),
        artifacts_dir: config.artifacts_dir.clone(),
    })
}

/// Load and compile only.
pub fn inspect(config: &PipelineConfig) -> Result<InspectReport, PipelineError> {
    let source = config.witness_source();
    let witness = source.load()?;
    match config.field_id {
        FieldId::Bn254 => inspect_on::<Bn254>(config.field_id, &witness, source.describe()),
        FieldId::Bls12_381 => inspect_on::<Bls12_381>(config.field_id, &witness, source.describe()),
    }
}

fn inspect_on<E: ProvingCurve>(
    field_id: FieldId,
    witness: &Witness,
    source: String,
) -> Result<InspectReport, PipelineError> {
    let circuit = SanityCircuit::<E::ScalarField>::from_witness(witness)?;
    let cs = compile::<E>(field_id, &circuit)?;
    Ok(InspectReport {
        source,
        field_id,
        shape: cs.shape(),
        constraint_count: cs.constraint_count(),
        variable_count: cs.variable_count(),
        public_inputs: cs.public_input_count(),
        required_srs_size: cs.required_srs_size(),
        circuit_digest: cs.digest(),
        relations: circuit.relations().iter().map(|r| r.name()).collect(),
    })
}

/// Verify exported artifacts, returning the field they are over.
pub fn verify_artifacts(artifacts: &Artifacts) -> Result<FieldId, PipelineError> {
    let field_id = artifacts.field_id()?;
    match field_id {
        FieldId::Bn254 => verify_artifacts_on::<Bn254>(artifacts)?,
        FieldId::Bls12_381 => verify_artifacts_on::<Bls12_381>(artifacts)?,
    }
    Ok(field_id)
}

fn verify_artifacts_on<E: ProvingCurve>(artifacts: &Artifacts) -> Result<(), PipelineError> {
    let vk = artifacts.verifying_key.to_key::<E>()?;
    let public = artifacts.public_witness.to_public::<E>()?;
    let proof = artifacts
        .proof
        .to_proof::<E>()
        .map_err(|e| VerificationError::Malformed(e.to_string()))?;
    verify(&proof, &vk, &public)?;
    Ok(())
}

/// Generate a toy SRS of `size` powers and write it to `path`.
pub fn write_toy_srs(
    field_id: FieldId,
    size: usize,
    seed: u64,
    path: &Path,
) -> Result<Digest, SetupError> {
    fn write<E: ProvingCurve>(size: usize, seed: u64, path: &Path) -> Result<Digest, SetupError> {
        let srs = Srs::<E>::generate(size, &mut StdRng::seed_from_u64(seed))?;
        srs.save(path)?;
        srs.digest()
    }
    match field_id {
        FieldId::Bn254 => write::<Bn254>(size, seed, path),
        FieldId::Bls12_381 => write::<Bls12_381>(size, seed, path),
    }
}
