// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Groth16 keys and proofs tagged with the setup they belong to.
//!
//! Every key and proof carries a [`KeyBinding`]. Mixing artifacts from
//! different (constraint system, SRS) pairs is refused before any pairing
//! work is done.
//!
//! # Proof byte encoding
//!
//! `binding || compressed Groth16 proof`, where `binding` is [`BINDING_LEN`]
//! bytes: the field tag, then the circuit and SRS digests.

use ark_groth16::PreparedVerifyingKey;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, SerializationError};
use bbwrap_types::FieldId;
use serde::{Deserialize, Serialize};

use crate::{
    curve::ProvingCurve,
    digest::{Digest, DIGEST_LEN},
};

pub const BINDING_LEN: usize = 1 + 2 * DIGEST_LEN;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyBinding {
    pub field_id: FieldId,
    pub circuit_digest: Digest,
    pub srs_digest: Digest,
}

impl KeyBinding {
    pub fn to_bytes(&self) -> [u8; BINDING_LEN] {
        let mut out = [0u8; BINDING_LEN];
        out[0] = self.field_id.tag();
        out[1..1 + DIGEST_LEN].copy_from_slice(&self.circuit_digest.0);
        out[1 + DIGEST_LEN..].copy_from_slice(&self.srs_digest.0);
        out
    }

    /// Split a binding prefix off `bytes`, returning the remainder.
    pub fn split_from(bytes: &[u8]) -> Result<(Self, &[u8]), SerializationError> {
        if bytes.len() < BINDING_LEN {
            return Err(SerializationError::NotEnoughSpace);
        }
        let field_id = FieldId::from_tag(bytes[0]).ok_or(SerializationError::InvalidData)?;
        let mut circuit = [0u8; DIGEST_LEN];
        let mut srs = [0u8; DIGEST_LEN];
        circuit.copy_from_slice(&bytes[1..1 + DIGEST_LEN]);
        srs.copy_from_slice(&bytes[1 + DIGEST_LEN..BINDING_LEN]);
        Ok((
            Self {
                field_id,
                circuit_digest: Digest(circuit),
                srs_digest: Digest(srs),
            },
            &bytes[BINDING_LEN..],
        ))
    }
}

#[derive(Clone, Debug)]
pub struct ProvingKey<E: ProvingCurve> {
    pub(crate) inner: ark_groth16::ProvingKey<E>,
    pub(crate) binding: KeyBinding,
}

impl<E: ProvingCurve> ProvingKey<E> {
    pub fn binding(&self) -> &KeyBinding {
        &self.binding
    }
}

#[derive(Clone, Debug)]
pub struct VerifyingKey<E: ProvingCurve> {
    pub(crate) inner: ark_groth16::VerifyingKey<E>,
    pub(crate) prepared: PreparedVerifyingKey<E>,
    pub(crate) binding: KeyBinding,
}

impl<E: ProvingCurve> VerifyingKey<E> {
    pub(crate) fn new(inner: ark_groth16::VerifyingKey<E>, binding: KeyBinding) -> Self {
        let prepared = PreparedVerifyingKey::from(inner.clone());
        Self {
            inner,
            prepared,
            binding,
        }
    }

    pub fn binding(&self) -> &KeyBinding {
        &self.binding
    }

    pub fn public_input_count(&self) -> usize {
        self.inner.gamma_abc_g1.len().saturating_sub(1)
    }

    pub fn inner(&self) -> &ark_groth16::VerifyingKey<E> {
        &self.inner
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Proof<E: ProvingCurve> {
    pub(crate) inner: ark_groth16::Proof<E>,
    pub(crate) binding: KeyBinding,
}

impl<E: ProvingCurve> Proof<E> {
    pub fn binding(&self) -> &KeyBinding {
        &self.binding
    }

    pub fn inner(&self) -> &ark_groth16::Proof<E> {
        &self.inner
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SerializationError> {
        let mut out = self.binding.to_bytes().to_vec();
        self.inner.serialize_compressed(&mut out)?;
        Ok(out)
    }

    /// Decode a proof, checking the points are on the curve and in the
    /// prime-order subgroup.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SerializationError> {
        let (binding, rest) = KeyBinding::split_from(bytes)?;
        if binding.field_id != E::FIELD_ID {
            return Err(SerializationError::InvalidData);
        }
        let inner = ark_groth16::Proof::deserialize_compressed(rest)?;
        Ok(Self { inner, binding })
    }
}
