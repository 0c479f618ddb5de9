// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use bbwrap_prover::PipelineConfig;

use crate::output;

pub fn run(config: &PipelineConfig) -> Result<()> {
    let sp = output::spinner("compiling...");
    let report = bbwrap_prover::inspect(config);
    sp.finish_and_clear();
    let report = report.context("inspect failed")?;

    if output::is_json() {
        return output::json_output(&report);
    }
    output::label("witness", &report.source);
    output::label("field", report.field_id.as_str());
    output::label("shape", &report.shape.to_string());
    output::label("constraints", &report.constraint_count.to_string());
    output::label("variables", &report.variable_count.to_string());
    output::label("public inputs", &report.public_inputs.to_string());
    output::label("required srs size", &report.required_srs_size.to_string());
    output::label("circuit digest", &report.circuit_digest.to_string());
    output::label("relations", &report.relations.len().to_string());
    for name in &report.relations {
        output::info(&format!("  {name}"));
    }
    Ok(())
}
