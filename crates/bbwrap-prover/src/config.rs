// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Run configuration.
//!
//! Layering, lowest first: [`PipelineConfig::default`], a JSON config file,
//! environment variables, then whatever the caller sets explicitly.
//!
//! ```json
//! { "source_path": "witness.json", "field_id": "bn254", "public_only": true }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use bbwrap_types::{FieldId, WitnessSource, WITNESS_ENV_VAR};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable selecting the proving field.
pub const FIELD_ENV_VAR: &str = "BBWRAP_FIELD";

pub const DEFAULT_SRS_SEED: u64 = 42;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Witness payload; `witness.json` when unset.
    pub source_path: Option<PathBuf>,
    pub field_id: FieldId,
    /// Build the verifier's witness directly from public values. When
    /// false it is projected from the prover's full witness instead.
    pub public_only: bool,
    /// Seed for the toy SRS. Ignored when `srs_path` is set.
    pub srs_seed: u64,
    /// Fixed prover seed; the OS RNG is used when unset.
    pub prover_seed: Option<u64>,
    /// Previously generated SRS to use instead of a toy one.
    pub srs_path: Option<PathBuf>,
    /// Directory to write proof, verifying key and public witness to.
    pub artifacts_dir: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_path: None,
            field_id: FieldId::default(),
            public_only: true,
            srs_seed: DEFAULT_SRS_SEED,
            prover_seed: None,
            srs_path: None,
            artifacts_dir: None,
        }
    }
}

impl PipelineConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `WITNESS_JSON` and `BBWRAP_FIELD` from the process environment.
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_env_from(|name| std::env::var(name).ok())
    }

    /// Apply environment overrides read through `lookup`. Empty values are
    /// treated as unset.
    pub fn with_env_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if let Some(path) = get(WITNESS_ENV_VAR) {
            self.source_path = Some(PathBuf::from(path));
        }
        if let Some(value) = get(FIELD_ENV_VAR) {
            self.field_id = value
                .parse()
                .map_err(|reason| ConfigError::InvalidEnv {
                    name: FIELD_ENV_VAR,
                    value: value.clone(),
                    reason,
                })?;
        }
        Ok(self)
    }

    pub fn witness_source(&self) -> WitnessSource {
        WitnessSource::file_or_default(self.source_path.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.field_id, FieldId::Bn254);
        assert!(cfg.public_only);
        assert_eq!(
            cfg.witness_source(),
            WitnessSource::File(PathBuf::from("witness.json"))
        );
    }

    #[test]
    fn env_overrides_source_and_field() {
        let cfg = PipelineConfig::default()
            .with_env_from(env(&[("WITNESS_JSON", "/tmp/w.json"), ("BBWRAP_FIELD", "bls12-381")]))
            .unwrap();
        assert_eq!(cfg.source_path, Some(PathBuf::from("/tmp/w.json")));
        assert_eq!(cfg.field_id, FieldId::Bls12_381);
    }

    #[test]
    fn empty_env_is_unset() {
        let cfg = PipelineConfig::default()
            .with_env_from(env(&[("WITNESS_JSON", "")]))
            .unwrap();
        assert_eq!(cfg.source_path, None);
    }

    #[test]
    fn bad_field_env_is_reported() {
        let err = PipelineConfig::default()
            .with_env_from(env(&[("BBWRAP_FIELD", "goldilocks")]))
            .unwrap_err();
        assert!(err.to_string().starts_with("BBWRAP_FIELD=goldilocks"));
    }

    #[test]
    fn file_layer_fills_missing_fields_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bbwrap.json");
        fs::write(&path, r#"{ "field_id": "bls12-381", "public_only": false }"#).unwrap();
        let cfg = PipelineConfig::from_file(&path).unwrap();
        assert_eq!(cfg.field_id, FieldId::Bls12_381);
        assert!(!cfg.public_only);
        assert_eq!(cfg.srs_seed, DEFAULT_SRS_SEED);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bbwrap.json");
        fs::write(&path, r#"{ "feild_id": "bn254" }"#).unwrap();
        assert!(matches!(
            PipelineConfig::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
