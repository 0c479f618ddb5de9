// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! JSON witness loader.
//!
//! The payload is an object with three arrays:
//!
//! ```json
//! { "vars": ["3"], "felts": ["5"], "exts": [["1", "0", "0", "0"]] }
//! ```
//!
//! Scalars may be JSON unsigned integers or decimal strings. The capitalised
//! keys `Vars`, `Felts` and `Exts` are accepted as aliases.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::witness::{Decimal, Witness, EXT_DEGREE};

pub const DEFAULT_WITNESS_FILE: &str = "witness.json";

/// Environment variable overriding the witness location.
pub const WITNESS_ENV_VAR: &str = "WITNESS_JSON";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read witness at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed witness payload: {0}")]
    Deserialize(String),
}

/// Where the witness payload comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WitnessSource {
    File(PathBuf),
    Bytes(Vec<u8>),
}

impl WitnessSource {
    /// File source for `path`, or [`DEFAULT_WITNESS_FILE`] when unset.
    pub fn file_or_default(path: Option<&Path>) -> Self {
        WitnessSource::File(
            path.map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_WITNESS_FILE)),
        )
    }

    pub fn describe(&self) -> String {
        match self {
            WitnessSource::File(path) => path.display().to_string(),
            WitnessSource::Bytes(bytes) => format!("<{} bytes in memory>", bytes.len()),
        }
    }

    /// Read the payload once and parse it.
    pub fn load(&self) -> Result<Witness, LoadError> {
        match self {
            WitnessSource::File(path) => load_witness(path),
            WitnessSource::Bytes(bytes) => Witness::from_slice(bytes),
        }
    }
}

pub fn load_witness(path: &Path) -> Result<Witness, LoadError> {
    let data = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "read witness payload");
    Witness::from_slice(&data)
}

#[derive(Deserialize)]
struct RawWitness {
    #[serde(alias = "Vars")]
    vars: Vec<RawScalar>,
    #[serde(alias = "Felts")]
    felts: Vec<RawScalar>,
    #[serde(alias = "Exts")]
    exts: Vec<Vec<RawScalar>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Int(u64),
    Text(String),
}

impl RawScalar {
    fn to_decimal(&self) -> Result<Decimal, String> {
        match self {
            RawScalar::Int(v) => Ok(Decimal::from(*v)),
            RawScalar::Text(s) => Decimal::parse(s),
        }
    }

    fn to_u32(&self) -> Result<u32, String> {
        let d = self.to_decimal()?;
        d.as_str()
            .parse::<u32>()
            .map_err(|_| format!("{d} does not fit in 32 bits"))
    }
}

fn malformed(slot: &str, index: usize, reason: String) -> LoadError {
    LoadError::Deserialize(format!("{slot}[{index}]: {reason}"))
}

impl Witness {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, LoadError> {
        let raw: RawWitness =
            serde_json::from_slice(bytes).map_err(|e| LoadError::Deserialize(e.to_string()))?;

        let vars = raw
            .vars
            .iter()
            .enumerate()
            .map(|(i, v)| v.to_decimal().map_err(|e| malformed("vars", i, e)))
            .collect::<Result<Vec<_>, _>>()?;

        let felts = raw
            .felts
            .iter()
            .enumerate()
            .map(|(i, v)| v.to_u32().map_err(|e| malformed("felts", i, e)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut exts = Vec::with_capacity(raw.exts.len());
        for (i, limbs) in raw.exts.iter().enumerate() {
            if limbs.len() != EXT_DEGREE {
                return Err(malformed(
                    "exts",
                    i,
                    format!("expected {EXT_DEGREE} limbs, got {}", limbs.len()),
                ));
            }
            let mut ext = [0u32; EXT_DEGREE];
            for (j, limb) in limbs.iter().enumerate() {
                ext[j] = limb
                    .to_u32()
                    .map_err(|e| malformed("exts", i, format!("limb {j}: {e}")))?;
            }
            exts.push(ext);
        }

        Ok(Witness::new(vars, felts, exts))
    }
}
