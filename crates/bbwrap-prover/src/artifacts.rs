// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Hex/JSON export of the verifier-side artifacts of a run.
//!
//! A run directory holds three files:
//!
//! | file | contents |
//! |---|---|
//! | `proof.json` | binding record, proof points `a`, `b`, `c` |
//! | `verifying_key.json` | binding record, `alpha_g1`, `beta_g2`, `gamma_g2`, `delta_g2`, `ic` |
//! | `public_witness.json` | field id, public input values as decimals |
//!
//! Points use the arkworks compressed encoding, hex without prefix. The full
//! witness is never written.

use std::fs;
use std::path::Path;

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use bbwrap_circuit::embed_var;
use bbwrap_types::{Decimal, FieldId};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    curve::ProvingCurve,
    error::ArtifactError,
    keys::{KeyBinding, Proof, VerifyingKey},
    witness::PublicWitness,
};

pub const PROOF_FILE: &str = "proof.json";
pub const VERIFYING_KEY_FILE: &str = "verifying_key.json";
pub const PUBLIC_WITNESS_FILE: &str = "public_witness.json";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofArtifact {
    #[serde(flatten)]
    pub binding: KeyBinding,
    pub a: String,
    pub b: String,
    pub c: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyingKeyArtifact {
    #[serde(flatten)]
    pub binding: KeyBinding,
    pub alpha_g1: String,
    pub beta_g2: String,
    pub gamma_g2: String,
    pub delta_g2: String,
    /// ic\[0\] = constant term, ic\[1..\] = public input coefficients
    pub ic: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicWitnessArtifact {
    pub field_id: FieldId,
    pub values: Vec<Decimal>,
}

/// Everything a standalone verifier needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifacts {
    pub proof: ProofArtifact,
    pub verifying_key: VerifyingKeyArtifact,
    pub public_witness: PublicWitnessArtifact,
}

fn to_hex<T: CanonicalSerialize>(field: &'static str, value: &T) -> Result<String, ArtifactError> {
    let mut bytes = Vec::new();
    value
        .serialize_compressed(&mut bytes)
        .map_err(|e| ArtifactError::Decode {
            field,
            reason: e.to_string(),
        })?;
    Ok(hex::encode(&bytes))
}

fn from_hex<T: CanonicalDeserialize>(field: &'static str, s: &str) -> Result<T, ArtifactError> {
    let bytes = hex::decode(s).map_err(|source| ArtifactError::Hex { field, source })?;
    T::deserialize_compressed(bytes.as_slice()).map_err(|e| ArtifactError::Decode {
        field,
        reason: e.to_string(),
    })
}

fn check_field<E: ProvingCurve>(actual: FieldId) -> Result<(), ArtifactError> {
    if actual != E::FIELD_ID {
        return Err(ArtifactError::FieldMismatch(E::FIELD_ID, actual));
    }
    Ok(())
}

impl ProofArtifact {
    pub fn from_proof<E: ProvingCurve>(proof: &Proof<E>) -> Result<Self, ArtifactError> {
        Ok(Self {
            binding: proof.binding,
            a: to_hex("proof.a", &proof.inner.a)?,
            b: to_hex("proof.b", &proof.inner.b)?,
            c: to_hex("proof.c", &proof.inner.c)?,
        })
    }

    pub fn to_proof<E: ProvingCurve>(&self) -> Result<Proof<E>, ArtifactError> {
        check_field::<E>(self.binding.field_id)?;
        Ok(Proof {
            inner: ark_groth16::Proof {
                a: from_hex("proof.a", &self.a)?,
                b: from_hex("proof.b", &self.b)?,
                c: from_hex("proof.c", &self.c)?,
            },
            binding: self.binding,
        })
    }
}

impl VerifyingKeyArtifact {
    pub fn from_key<E: ProvingCurve>(vk: &VerifyingKey<E>) -> Result<Self, ArtifactError> {
        let inner = &vk.inner;
        Ok(Self {
            binding: vk.binding,
            alpha_g1: to_hex("vk.alpha_g1", &inner.alpha_g1)?,
            beta_g2: to_hex("vk.beta_g2", &inner.beta_g2)?,
            gamma_g2: to_hex("vk.gamma_g2", &inner.gamma_g2)?,
            delta_g2: to_hex("vk.delta_g2", &inner.delta_g2)?,
            ic: inner
                .gamma_abc_g1
                .iter()
                .map(|p| to_hex("vk.ic", p))
                .collect::<Result<_, _>>()?,
        })
    }

    pub fn to_key<E: ProvingCurve>(&self) -> Result<VerifyingKey<E>, ArtifactError> {
        check_field::<E>(self.binding.field_id)?;
        let inner = ark_groth16::VerifyingKey {
            alpha_g1: from_hex("vk.alpha_g1", &self.alpha_g1)?,
            beta_g2: from_hex("vk.beta_g2", &self.beta_g2)?,
            gamma_g2: from_hex("vk.gamma_g2", &self.gamma_g2)?,
            delta_g2: from_hex("vk.delta_g2", &self.delta_g2)?,
            gamma_abc_g1: self
                .ic
                .iter()
                .map(|p| from_hex("vk.ic", p))
                .collect::<Result<_, _>>()?,
        };
        Ok(VerifyingKey::new(inner, self.binding))
    }
}

impl PublicWitnessArtifact {
    pub fn from_public<E: ProvingCurve>(public: &PublicWitness<E::ScalarField>) -> Self {
        Self {
            field_id: public.field_id(),
            values: public.to_decimals(),
        }
    }

    pub fn to_public<E: ProvingCurve>(&self) -> Result<PublicWitness<E::ScalarField>, ArtifactError> {
        check_field::<E>(self.field_id)?;
        let values = self
            .values
            .iter()
            .map(|v| {
                embed_var(v).ok_or_else(|| ArtifactError::Decode {
                    field: "public_witness.values",
                    reason: format!("{v} is not below the {} modulus", self.field_id),
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(PublicWitness::new(self.field_id, values))
    }
}

impl Artifacts {
    pub fn new<E: ProvingCurve>(
        proof: &Proof<E>,
        vk: &VerifyingKey<E>,
        public: &PublicWitness<E::ScalarField>,
    ) -> Result<Self, ArtifactError> {
        Ok(Self {
            proof: ProofArtifact::from_proof(proof)?,
            verifying_key: VerifyingKeyArtifact::from_key(vk)?,
            public_witness: PublicWitnessArtifact::from_public::<E>(public),
        })
    }

    /// Field the artifacts are over; all three must agree.
    pub fn field_id(&self) -> Result<FieldId, ArtifactError> {
        let field = self.verifying_key.binding.field_id;
        for other in [self.proof.binding.field_id, self.public_witness.field_id] {
            if other != field {
                return Err(ArtifactError::FieldMismatch(field, other));
            }
        }
        Ok(field)
    }

    pub fn write_dir(&self, dir: &Path) -> Result<(), ArtifactError> {
        fs::create_dir_all(dir).map_err(|source| ArtifactError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        write_json(&dir.join(PROOF_FILE), &self.proof)?;
        write_json(&dir.join(VERIFYING_KEY_FILE), &self.verifying_key)?;
        write_json(&dir.join(PUBLIC_WITNESS_FILE), &self.public_witness)?;
        tracing::debug!(dir = %dir.display(), "wrote artifacts");
        Ok(())
    }

    pub fn read_dir(dir: &Path) -> Result<Self, ArtifactError> {
        Ok(Self {
            proof: read_json(&dir.join(PROOF_FILE))?,
            verifying_key: read_json(&dir.join(VERIFYING_KEY_FILE))?,
            public_witness: read_json(&dir.join(PUBLIC_WITNESS_FILE))?,
        })
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ArtifactError> {
    let json = serde_json::to_string_pretty(value).map_err(|source| ArtifactError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let data = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| ArtifactError::Json {
        path: path.to_path_buf(),
        source,
    })
}
