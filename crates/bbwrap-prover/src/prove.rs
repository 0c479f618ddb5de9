// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use ark_groth16::Groth16;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystem, OptimizationGoal};
use ark_snark::SNARK;
use rand::{rngs::StdRng, CryptoRng, RngCore, SeedableRng};

use crate::{
    compile::CompiledCircuit,
    curve::ProvingCurve,
    error::ProvingError,
    keys::{Proof, ProvingKey},
    witness::WitnessObject,
};

/// Prover RNG: a fixed seed for reproducible runs, otherwise seeded from the
/// operating system.
pub fn prover_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Prove that `witness` satisfies `cs`.
///
/// The assignment is checked against the declared relations first, then
/// against the synthesized R1CS, so no proof is produced for an
/// unsatisfying assignment.
pub fn prove<E: ProvingCurve, R: RngCore + CryptoRng>(
    cs: &CompiledCircuit<E>,
    pk: &ProvingKey<E>,
    witness: &WitnessObject<E>,
    rng: &mut R,
) -> Result<Proof<E>, ProvingError> {
    if pk.binding.circuit_digest != cs.digest() || pk.binding.field_id != cs.field_id() {
        return Err(ProvingError::KeyMismatch);
    }
    let full = match witness {
        WitnessObject::Full(full) => full,
        WitnessObject::Public(_) => return Err(ProvingError::PublicOnlyWitness),
    };
    if full.field_id() != cs.field_id() {
        return Err(ProvingError::FieldMismatch {
            expected: cs.field_id(),
            actual: full.field_id(),
        });
    }
    if full.shape() != cs.shape() {
        return Err(ProvingError::ShapeMismatch {
            expected: cs.shape(),
            actual: full.shape(),
        });
    }

    let circuit = cs
        .circuit()
        .with_assignment(full.assignment().clone())
        .map_err(|e| ProvingError::Synthesis(e.to_string()))?;

    if let Some(rel) = circuit.first_unsatisfied() {
        return Err(ProvingError::Unsatisfied {
            relation: rel.name(),
        });
    }

    let check = ConstraintSystem::<E::ScalarField>::new_ref();
    check.set_optimization_goal(OptimizationGoal::Constraints);
    circuit
        .clone()
        .generate_constraints(check.clone())
        .map_err(|e| ProvingError::Synthesis(e.to_string()))?;
    if let Some(name) = check
        .which_is_unsatisfied()
        .map_err(|e| ProvingError::Synthesis(e.to_string()))?
    {
        return Err(ProvingError::Unsatisfied { relation: name });
    }

    let inner = Groth16::<E>::prove(&pk.inner, circuit, rng)
        .map_err(|e| ProvingError::Synthesis(e.to_string()))?;

    Ok(Proof {
        inner,
        binding: pk.binding,
    })
}
