// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use bbwrap_prover::{PipelineConfig, RunReport, Stage};

use crate::output;

/// Stage that starts once `done` has completed.
fn next_stage(done: Stage) -> Option<Stage> {
    Stage::SEQUENCE
        .iter()
        .skip_while(|s| **s != done)
        .nth(1)
        .copied()
}

pub fn run(config: &PipelineConfig) -> Result<()> {
    let sp = output::spinner(&format!("{}...", Stage::Loaded.action()));
    let result = bbwrap_prover::run_with_progress(config, |done| {
        if let Some(next) = next_stage(done) {
            sp.set_message(format!("{}...", next.action()));
        }
    });
    sp.finish_and_clear();

    let report = result.map_err(|e| {
        let action = e.stage().action();
        anyhow::Error::new(e).context(format!("pipeline failed while {action}"))
    })?;

    if output::is_json() {
        return output::json_output(&report);
    }
    print_report(&report);
    Ok(())
}

fn print_report(report: &RunReport) {
    output::success("proof verified");
    output::label("witness", &report.source);
    output::label("field", report.field_id.as_str());
    output::label("shape", &report.shape.to_string());
    output::label("constraints", &report.constraint_count.to_string());
    output::label("variables", &report.variable_count.to_string());
    output::label("public inputs", &report.public_inputs.to_string());
    output::label("srs size", &report.srs_size.to_string());
    output::label("circuit digest", &report.circuit_digest.to_string());
    for t in &report.timings {
        output::label(&format!("  {}", t.stage), &format!("{:.1} ms", t.millis));
    }
    output::label("total", &format!("{:.1} ms", report.total_millis()));
    if let Some(dir) = &report.artifacts_dir {
        output::info(&format!("artifacts written to {}", dir.display()));
    }
}
