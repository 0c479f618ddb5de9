// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use ark_groth16::Groth16;
use ark_snark::SNARK;
use rand::{CryptoRng, RngCore};

use crate::{
    compile::CompiledCircuit,
    curve::ProvingCurve,
    error::SetupError,
    keys::{KeyBinding, ProvingKey, VerifyingKey},
    srs::Srs,
};

/// Toy SRS of exactly the size `cs` requires.
pub fn derive_srs<E: ProvingCurve, R: RngCore>(
    cs: &CompiledCircuit<E>,
    rng: &mut R,
) -> Result<Srs<E>, SetupError> {
    let size = cs.required_srs_size();
    let srs = Srs::generate(size, rng)?;
    tracing::debug!(size, "derived toy SRS");
    Ok(srs)
}

/// Derive the key pair for `cs` under `srs`.
///
/// Fails with [`SetupError::SrsTooSmall`] rather than truncating when `srs`
/// has fewer powers than `cs` needs. The trapdoor is sampled from `rng` and
/// dropped once the keys exist; `rng` must be secret, since anyone who can
/// replay it can forge proofs. Both keys record the circuit and SRS digests.
pub fn derive_keys<E: ProvingCurve, R: RngCore + CryptoRng>(
    cs: &CompiledCircuit<E>,
    srs: &Srs<E>,
    rng: &mut R,
) -> Result<(ProvingKey<E>, VerifyingKey<E>), SetupError> {
    srs.validate()?;
    let required = cs.required_srs_size();
    if srs.size() < required {
        return Err(SetupError::SrsTooSmall {
            required,
            actual: srs.size(),
        });
    }

    let binding = KeyBinding {
        field_id: cs.field_id(),
        circuit_digest: cs.digest(),
        srs_digest: srs.digest()?,
    };

    let (pk, vk) = Groth16::<E>::circuit_specific_setup(cs.circuit().without_assignment(), rng)
        .map_err(|e| SetupError::Synthesis(e.to_string()))?;

    tracing::debug!(
        circuit = %binding.circuit_digest.short(),
        srs = %binding.srs_digest.short(),
        "derived keys"
    );

    Ok((
        ProvingKey { inner: pk, binding },
        VerifyingKey::new(vk, binding),
    ))
}
