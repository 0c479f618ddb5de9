// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

pub mod inspect;
pub mod run;
pub mod srs;
pub mod verify;

use std::path::{Path, PathBuf};

use anyhow::Result;
use bbwrap_prover::PipelineConfig;
use bbwrap_types::FieldId;
use clap::Args;

/// Where the witness comes from and which field to prove over.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Witness JSON file [default: $WITNESS_JSON, then witness.json]
    #[arg(long)]
    pub witness: Option<PathBuf>,
    /// Proving field: bn254 or bls12-381 [default: $BBWRAP_FIELD, then bn254]
    #[arg(long)]
    pub field: Option<FieldId>,
}

/// Defaults, then `config_path`, then the environment, then flags.
pub fn load_config(config_path: Option<&Path>, source: &SourceArgs) -> Result<PipelineConfig> {
    let base = match config_path {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::default(),
    };
    let mut config = base.with_env()?;
    if let Some(path) = &source.witness {
        config.source_path = Some(path.clone());
    }
    if let Some(field) = source.field {
        config.field_id = field;
    }
    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bbwrap.json");
        std::fs::write(&path, r#"{ "field_id": "bls12-381", "srs_seed": 9 }"#).unwrap();

        let source = SourceArgs {
            witness: Some(PathBuf::from("w.json")),
            field: Some(FieldId::Bn254),
        };
        let config = load_config(Some(&path), &source).unwrap();
        assert_eq!(config.field_id, FieldId::Bn254);
        assert_eq!(config.srs_seed, 9);
        assert_eq!(config.source_path, Some(PathBuf::from("w.json")));
    }
}
