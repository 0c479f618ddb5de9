// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use ark_groth16::Groth16;
use ark_snark::SNARK;

use crate::{
    curve::ProvingCurve,
    error::VerificationError,
    keys::{Proof, VerifyingKey},
    witness::PublicWitness,
};

/// Check `proof` against `vk` and the public inputs. Only public values are
/// involved.
pub fn verify<E: ProvingCurve>(
    proof: &Proof<E>,
    vk: &VerifyingKey<E>,
    public: &PublicWitness<E::ScalarField>,
) -> Result<(), VerificationError> {
    if proof.binding != vk.binding || public.field_id() != vk.binding.field_id {
        return Err(VerificationError::KeyMismatch);
    }
    if public.len() != vk.public_input_count() {
        return Err(VerificationError::PublicInputLength {
            expected: vk.public_input_count(),
            actual: public.len(),
        });
    }

    match Groth16::<E>::verify_with_processed_vk(&vk.prepared, public.values(), &proof.inner) {
        Ok(true) => Ok(()),
        Ok(false) => Err(VerificationError::Rejected),
        Err(e) => Err(VerificationError::Malformed(e.to_string())),
    }
}

/// [`verify`] on an encoded proof, as produced by [`Proof::to_bytes`].
pub fn verify_bytes<E: ProvingCurve>(
    proof: &[u8],
    vk: &VerifyingKey<E>,
    public: &PublicWitness<E::ScalarField>,
) -> Result<(), VerificationError> {
    let proof =
        Proof::<E>::from_bytes(proof).map_err(|e| VerificationError::Malformed(e.to_string()))?;
    verify(&proof, vk, public)
}
