// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! SHA-256 digests binding keys and proofs to a constraint system and SRS.

use std::fmt;

use ark_ff::{BigInteger, PrimeField};
use ark_relations::r1cs::ConstraintMatrices;
use bbwrap_types::{CircuitShape, FieldId};
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

pub const DIGEST_LEN: usize = 32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Digest(pub [u8; DIGEST_LEN]);

impl Digest {
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut out = [0u8; DIGEST_LEN];
        hex::decode_to_slice(s.trim_start_matches("0x"), &mut out)?;
        Ok(Digest(out))
    }

    /// First eight hex chars, for logs.
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Digest {
    type Error = hex::FromHexError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Digest::from_hex(&s)
    }
}

impl From<Digest> for String {
    fn from(d: Digest) -> String {
        d.to_hex()
    }
}

pub(crate) fn finish(hasher: Sha256) -> Digest {
    Digest(hasher.finalize().into())
}

/// Digest of a compiled circuit: field, shape, and every nonzero entry of the
/// A, B and C matrices in row order.
pub fn circuit_digest<F: PrimeField>(
    field_id: FieldId,
    shape: CircuitShape,
    matrices: &ConstraintMatrices<F>,
) -> Digest {
    let mut h = Sha256::new();
    h.update(b"bbwrap/circuit/v1");
    h.update([field_id.tag()]);
    for n in [shape.vars, shape.felts, shape.exts] {
        h.update((n as u64).to_le_bytes());
    }
    for n in [
        matrices.num_instance_variables,
        matrices.num_witness_variables,
        matrices.num_constraints,
    ] {
        h.update((n as u64).to_le_bytes());
    }
    for matrix in [&matrices.a, &matrices.b, &matrices.c] {
        for row in matrix {
            h.update((row.len() as u64).to_le_bytes());
            for (coeff, index) in row {
                h.update(coeff.into_bigint().to_bytes_le());
                h.update((*index as u64).to_le_bytes());
            }
        }
    }
    finish(h)
}
