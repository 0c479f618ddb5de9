// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::marker::PhantomData;

use ark_relations::r1cs::{
    ConstraintSynthesizer, ConstraintSystem, OptimizationGoal, SynthesisMode,
};
use bbwrap_circuit::SanityCircuit;
use bbwrap_types::{CircuitShape, FieldId};

use crate::{
    curve::ProvingCurve,
    digest::{circuit_digest, Digest},
    error::CompileError,
};

/// A circuit lowered to R1CS over `E::ScalarField`.
///
/// Counts and digest depend only on the circuit's shape and declared
/// relations, never on assigned values.
#[derive(Clone, Debug)]
pub struct CompiledCircuit<E: ProvingCurve> {
    circuit: SanityCircuit<E::ScalarField>,
    constraint_count: usize,
    instance_count: usize,
    witness_count: usize,
    digest: Digest,
    _curve: PhantomData<E>,
}

impl<E: ProvingCurve> CompiledCircuit<E> {
    pub fn field_id(&self) -> FieldId {
        E::FIELD_ID
    }

    pub fn shape(&self) -> CircuitShape {
        self.circuit.shape()
    }

    /// The unassigned circuit this system was compiled from.
    pub fn circuit(&self) -> &SanityCircuit<E::ScalarField> {
        &self.circuit
    }

    pub fn constraint_count(&self) -> usize {
        self.constraint_count
    }

    /// Instance plus witness variables, including the constant one.
    pub fn variable_count(&self) -> usize {
        self.instance_count + self.witness_count
    }

    pub fn public_input_count(&self) -> usize {
        self.instance_count.saturating_sub(1)
    }

    pub fn digest(&self) -> Digest {
        self.digest
    }

    /// Least power of two at least `max(constraints, variables)`.
    pub fn required_srs_size(&self) -> usize {
        required_srs_size(self.constraint_count, self.variable_count())
    }
}

pub fn required_srs_size(constraints: usize, variables: usize) -> usize {
    constraints.max(variables).next_power_of_two()
}

/// Lower `circuit` to R1CS over the scalar field of `E`.
pub fn compile<E: ProvingCurve>(
    field_id: FieldId,
    circuit: &SanityCircuit<E::ScalarField>,
) -> Result<CompiledCircuit<E>, CompileError> {
    if field_id != E::FIELD_ID {
        return Err(CompileError::FieldMismatch {
            expected: E::FIELD_ID,
            actual: field_id,
        });
    }
    circuit.validate()?;

    let unassigned = circuit.without_assignment();
    let cs = ConstraintSystem::<E::ScalarField>::new_ref();
    cs.set_optimization_goal(OptimizationGoal::Constraints);
    cs.set_mode(SynthesisMode::Setup);
    unassigned
        .clone()
        .generate_constraints(cs.clone())
        .map_err(|e| CompileError::Synthesis(e.to_string()))?;
    cs.finalize();

    let matrices = cs
        .to_matrices()
        .ok_or_else(|| CompileError::Synthesis("constraint matrices unavailable".into()))?;
    let digest = circuit_digest(field_id, circuit.shape(), &matrices);

    tracing::debug!(
        constraints = matrices.num_constraints,
        instance = matrices.num_instance_variables,
        witness = matrices.num_witness_variables,
        digest = %digest.short(),
        "compiled"
    );

    Ok(CompiledCircuit {
        circuit: unassigned,
        constraint_count: matrices.num_constraints,
        instance_count: matrices.num_instance_variables,
        witness_count: matrices.num_witness_variables,
        digest,
        _curve: PhantomData,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bls12_381::Bls12_381;
    use ark_bn254::Bn254;
    use bbwrap_circuit::Relation;
    use bbwrap_types::{Decimal, Witness};

    fn witness(vars: &[u64], felts: &[u32], exts: &[[u32; 4]]) -> Witness {
        Witness::new(
            vars.iter().map(|v| Decimal::from(*v)).collect(),
            felts.to_vec(),
            exts.to_vec(),
        )
    }

    #[test]
    fn counts_for_minimal_witness() {
        let w = witness(&[3], &[5], &[[1, 0, 0, 0]]);
        let circuit = SanityCircuit::from_witness(&w).unwrap();
        let cs = compile::<Bn254>(FieldId::Bn254, &circuit).unwrap();
        assert!(cs.constraint_count() > 0);
        assert_eq!(cs.public_input_count(), 1);
        let n = cs.required_srs_size();
        assert!(n.is_power_of_two());
        assert!(n >= cs.constraint_count() && n >= cs.variable_count());
        assert!(n / 2 < cs.constraint_count().max(cs.variable_count()));
    }

    #[test]
    fn digest_ignores_values_but_not_relations() {
        let w = witness(&[3], &[5], &[[1, 0, 0, 0]]);
        let circuit = SanityCircuit::from_witness(&w).unwrap();
        let a = compile::<Bn254>(FieldId::Bn254, &circuit).unwrap();

        let reassigned = circuit.assign(&witness(&[4], &[6], &[[2, 0, 0, 0]])).unwrap();
        let b = compile::<Bn254>(FieldId::Bn254, &reassigned).unwrap();
        assert_eq!(a.digest(), b.digest());
        assert_eq!(a.constraint_count(), b.constraint_count());

        let other = SanityCircuit::from_witness(&witness(&[4], &[6], &[[2, 0, 0, 0]])).unwrap();
        let c = compile::<Bn254>(FieldId::Bn254, &other).unwrap();
        assert_eq!(a.constraint_count(), c.constraint_count());
        assert_ne!(a.digest(), c.digest());
    }

    #[test]
    fn rejects_wrong_field() {
        let w = witness(&[3], &[5], &[]);
        let circuit = SanityCircuit::from_witness(&w).unwrap();
        let err = compile::<Bn254>(FieldId::Bls12_381, &circuit).unwrap_err();
        assert!(matches!(err, CompileError::FieldMismatch { .. }));
    }

    #[test]
    fn out_of_shape_relation_is_shape_mismatch() {
        let w = witness(&[3], &[], &[]);
        let circuit = SanityCircuit::<ark_bn254::Fr>::from_witness(&w)
            .unwrap()
            .with_relations(vec![Relation::FeltSquare { index: 0 }]);
        match compile::<Bn254>(FieldId::Bn254, &circuit) {
            Err(CompileError::Shape(e)) => assert!(e.is_shape_mismatch()),
            other => panic!("expected shape mismatch, got {other:?}"),
        }
    }

    #[test]
    fn compiles_over_bls12_381() {
        let w = witness(&[3], &[5], &[[1, 0, 0, 0]]);
        let circuit = SanityCircuit::from_witness(&w).unwrap();
        let cs = compile::<Bls12_381>(FieldId::Bls12_381, &circuit).unwrap();
        assert_eq!(cs.field_id(), FieldId::Bls12_381);
    }
}
