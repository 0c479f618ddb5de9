// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::path::Path;

use anyhow::Result;
use bbwrap_prover::{Artifacts, PipelineError};

use crate::output;

/// Verify the artifacts a previous `run --out` wrote to `dir`.
pub fn run(dir: &Path) -> Result<()> {
    let artifacts = Artifacts::read_dir(dir).map_err(PipelineError::from)?;

    let sp = output::spinner("verifying...");
    let result = bbwrap_prover::verify_artifacts(&artifacts);
    sp.finish_and_clear();
    let field_id = result?;

    if output::is_json() {
        return output::json_output(&serde_json::json!({
            "verified": true,
            "field_id": field_id,
            "circuit_digest": artifacts.verifying_key.binding.circuit_digest,
            "public_inputs": artifacts.public_witness.values,
        }));
    }
    output::success("proof verified");
    output::label("field", field_id.as_str());
    output::label(
        "circuit digest",
        &artifacts.verifying_key.binding.circuit_digest.to_string(),
    );
    output::label("public inputs", &artifacts.public_witness.values.len().to_string());
    Ok(())
}
