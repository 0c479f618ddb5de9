// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::path::Path;

use anyhow::{Context, Result};
use bbwrap_prover::PipelineConfig;

use crate::output;

/// Write a toy SRS to `out`. Without `size`, the SRS is sized for the
/// configured witness.
pub fn run(config: &PipelineConfig, size: Option<usize>, out: &Path) -> Result<()> {
    let size = match size {
        Some(size) => size,
        None => {
            bbwrap_prover::inspect(config)
                .context("cannot size SRS from witness")?
                .required_srs_size
        }
    };
    if size == 0 || !size.is_power_of_two() {
        return Err(output::fail_with_hint(
            &format!("invalid SRS size {size}"),
            "size must be a nonzero power of two",
        ));
    }

    let sp = output::spinner(&format!("generating {size}-power SRS..."));
    let digest = bbwrap_prover::write_toy_srs(config.field_id, size, config.srs_seed, out);
    sp.finish_and_clear();
    let digest = digest.with_context(|| format!("cannot write SRS to {}", out.display()))?;

    if output::is_json() {
        return output::json_output(&serde_json::json!({
            "path": out,
            "field_id": config.field_id,
            "size": size,
            "seed": config.srs_seed,
            "digest": digest,
        }));
    }
    output::success(&format!("SRS written to {}", out.display()));
    output::label("field", config.field_id.as_str());
    output::label("size", &size.to_string());
    output::label("digest", &digest.to_string());
    output::info("toy SRS: the seed reveals tau, do not use outside testing");
    Ok(())
}
