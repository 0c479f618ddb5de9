// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Scalar field a circuit is compiled over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldId {
    #[default]
    Bn254,
    #[serde(rename = "bls12-381")]
    Bls12_381,
}

impl FieldId {
    pub const ALL: [FieldId; 2] = [FieldId::Bn254, FieldId::Bls12_381];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::Bn254 => "bn254",
            FieldId::Bls12_381 => "bls12-381",
        }
    }

    /// Stable one-byte tag used in binding records and digests.
    pub fn tag(&self) -> u8 {
        match self {
            FieldId::Bn254 => 1,
            FieldId::Bls12_381 => 2,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.tag() == tag)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "bn254" | "bn-254" => Ok(FieldId::Bn254),
            "bls12-381" | "bls12381" => Ok(FieldId::Bls12_381),
            other => Err(format!("unknown field id: {other} (expected bn254 or bls12-381)")),
        }
    }
}
