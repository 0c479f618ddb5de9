// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use ark_ff::PrimeField;
use ark_r1cs_std::{alloc::AllocVar, fields::fp::FpVar};
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};
use bbwrap_types::{CircuitShape, Witness};

use crate::{
    embed::Assignment,
    ext_gadget::Ext4Var,
    felt_gadget::FeltVar,
    relation::{sanity_checks, Relation, Slots},
    CircuitError,
};

/// Vars (public), felts and exts (private), and the relations declared over
/// them. The shape and relation set are fixed at construction; only the
/// assignment can be swapped.
#[derive(Clone, Debug)]
pub struct SanityCircuit<F: PrimeField> {
    shape: CircuitShape,
    relations: Vec<Relation<F>>,
    assignment: Option<Assignment<F>>,
}

impl<F: PrimeField> SanityCircuit<F> {
    /// Embed `witness` and declare the default sanity relations over it.
    pub fn from_witness(witness: &Witness) -> Result<Self, CircuitError> {
        let assignment = Assignment::from_witness(witness)?;
        Ok(Self {
            shape: assignment.shape(),
            relations: sanity_checks(&assignment),
            assignment: Some(assignment),
        })
    }

    /// Replace the declared relations.
    pub fn with_relations(mut self, relations: Vec<Relation<F>>) -> Self {
        self.relations = relations;
        self
    }

    /// Same circuit, new values.
    pub fn assign(&self, witness: &Witness) -> Result<Self, CircuitError> {
        if witness.shape() != self.shape {
            return Err(CircuitError::ShapeMismatch {
                expected: self.shape,
                actual: witness.shape(),
            });
        }
        self.with_assignment(Assignment::from_witness(witness)?)
    }

    /// Same circuit with an already embedded assignment.
    pub fn with_assignment(&self, assignment: Assignment<F>) -> Result<Self, CircuitError> {
        if assignment.shape() != self.shape {
            return Err(CircuitError::ShapeMismatch {
                expected: self.shape,
                actual: assignment.shape(),
            });
        }
        Ok(Self {
            shape: self.shape,
            relations: self.relations.clone(),
            assignment: Some(assignment),
        })
    }

    /// Circuit with no values, for key generation.
    pub fn without_assignment(&self) -> Self {
        Self {
            shape: self.shape,
            relations: self.relations.clone(),
            assignment: None,
        }
    }

    pub fn shape(&self) -> CircuitShape {
        self.shape
    }

    pub fn relations(&self) -> &[Relation<F>] {
        &self.relations
    }

    pub fn assignment(&self) -> Option<&Assignment<F>> {
        self.assignment.as_ref()
    }

    /// Public input values in allocation order.
    pub fn public_inputs(&self) -> Option<&[F]> {
        self.assignment.as_ref().map(|a| a.vars.as_slice())
    }

    /// Check that every relation and the assignment agree with the shape.
    pub fn validate(&self) -> Result<(), CircuitError> {
        if let Some(rel) = self.relations.iter().find(|r| !r.fits(&self.shape)) {
            return Err(CircuitError::RelationOutOfShape {
                relation: rel.name(),
                shape: self.shape,
            });
        }
        if let Some(a) = &self.assignment {
            if a.shape() != self.shape {
                return Err(CircuitError::ShapeMismatch {
                    expected: self.shape,
                    actual: a.shape(),
                });
            }
        }
        Ok(())
    }

    /// First declared relation the assignment violates, evaluated natively.
    pub fn first_unsatisfied(&self) -> Option<&Relation<F>> {
        let a = self.assignment.as_ref()?;
        self.relations.iter().find(|r| !r.holds(a))
    }
}

impl<F: PrimeField> ConstraintSynthesizer<F> for SanityCircuit<F> {
    fn generate_constraints(self, cs: ConstraintSystemRef<F>) -> Result<(), SynthesisError> {
        let a = self.assignment.as_ref();

        // === Public inputs ===
        let mut vars = Vec::with_capacity(self.shape.vars);
        for i in 0..self.shape.vars {
            vars.push(FpVar::new_input(cs.clone(), || {
                a.and_then(|a| a.vars.get(i).copied())
                    .ok_or(SynthesisError::AssignmentMissing)
            })?);
        }

        // === Private witnesses ===
        let mut felts = Vec::with_capacity(self.shape.felts);
        for i in 0..self.shape.felts {
            felts.push(FeltVar::new_witness(cs.clone(), || {
                a.and_then(|a| a.felts.get(i).copied())
                    .ok_or(SynthesisError::AssignmentMissing)
            })?);
        }

        let mut exts = Vec::with_capacity(self.shape.exts);
        for i in 0..self.shape.exts {
            exts.push(Ext4Var::new_witness(cs.clone(), || {
                a.and_then(|a| a.exts.get(i).copied())
                    .ok_or(SynthesisError::AssignmentMissing)
            })?);
        }

        // === Relations ===
        let slots = Slots { vars, felts, exts };
        for rel in &self.relations {
            rel.enforce(&slots)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_relations::r1cs::{ConstraintSystem, OptimizationGoal, SynthesisMode};
    use bbwrap_types::Decimal;

    fn witness(vars: &[u64], felts: &[u32], exts: &[[u32; 4]]) -> Witness {
        Witness::new(
            vars.iter().map(|v| Decimal::from(*v)).collect(),
            felts.to_vec(),
            exts.to_vec(),
        )
    }

    fn satisfied<F: PrimeField>(circuit: SanityCircuit<F>) -> bool {
        let cs = ConstraintSystem::<F>::new_ref();
        circuit.generate_constraints(cs.clone()).unwrap();
        cs.is_satisfied().unwrap()
    }

    fn setup_constraints<F: PrimeField>(circuit: &SanityCircuit<F>) -> usize {
        let cs = ConstraintSystem::<F>::new_ref();
        cs.set_optimization_goal(OptimizationGoal::Constraints);
        cs.set_mode(SynthesisMode::Setup);
        circuit
            .without_assignment()
            .generate_constraints(cs.clone())
            .unwrap();
        cs.finalize();
        cs.num_constraints()
    }

    #[test]
    fn minimal_witness_satisfies_bn254() {
        let w = witness(&[3], &[5], &[[1, 0, 0, 0]]);
        let c = SanityCircuit::<ark_bn254::Fr>::from_witness(&w).unwrap();
        assert!(c.first_unsatisfied().is_none());
        assert!(satisfied(c));
    }

    #[test]
    fn minimal_witness_satisfies_bls12_381() {
        let w = witness(&[3], &[5], &[[1, 0, 0, 0]]);
        let c = SanityCircuit::<ark_bls12_381::Fr>::from_witness(&w).unwrap();
        assert!(satisfied(c));
    }

    #[test]
    fn larger_witness_satisfies() {
        let m = bbwrap_babybear::MODULUS - 1;
        let w = witness(
            &[0, 1, u64::MAX],
            &[0, m, 12345],
            &[[m, m, m, m], [0, 0, 0, 0], [7, 0, 0, 9]],
        );
        let c = SanityCircuit::<ark_bn254::Fr>::from_witness(&w).unwrap();
        assert!(satisfied(c));
    }

    #[test]
    fn mutated_var_is_unsatisfied() {
        let w = witness(&[3], &[5], &[[1, 0, 0, 0]]);
        let c = SanityCircuit::<ark_bn254::Fr>::from_witness(&w).unwrap();
        let mutated = c.assign(&w.with_var(0, Decimal::from(4)).unwrap()).unwrap();
        assert_eq!(
            mutated.first_unsatisfied().map(Relation::name).as_deref(),
            Some("var_equals[0]")
        );
        assert!(!satisfied(mutated));
    }

    #[test]
    fn mutated_private_values_still_satisfy() {
        let w = witness(&[3], &[5], &[[1, 0, 0, 0]]);
        let c = SanityCircuit::<ark_bn254::Fr>::from_witness(&w).unwrap();
        let mutated = c
            .assign(&w.with_felt(0, 0).unwrap().with_ext(0, [0, 0, 0, 0]).unwrap())
            .unwrap();
        assert!(mutated.first_unsatisfied().is_none());
        assert!(satisfied(mutated));
    }

    #[test]
    fn opt_in_ext_equality_rejects_mutation() {
        let w = witness(&[3], &[5], &[[1, 0, 0, 0]]);
        let c = SanityCircuit::<ark_bn254::Fr>::from_witness(&w)
            .unwrap()
            .with_relations(vec![Relation::ExtEquals {
                index: 0,
                value: bbwrap_babybear::ext([1, 0, 0, 0]).unwrap(),
            }]);
        let mutated = c.assign(&w.with_ext(0, [1, 0, 0, 1]).unwrap()).unwrap();
        assert_eq!(
            mutated.first_unsatisfied().map(Relation::name).as_deref(),
            Some("ext_equals[0]")
        );
        assert!(!satisfied(mutated));
    }

    #[test]
    fn assign_rejects_other_shape() {
        let w = witness(&[3], &[5], &[[1, 0, 0, 0]]);
        let c = SanityCircuit::<ark_bn254::Fr>::from_witness(&w).unwrap();
        let err = c.assign(&witness(&[3, 4], &[5], &[[1, 0, 0, 0]])).unwrap_err();
        assert!(err.is_shape_mismatch());
    }

    #[test]
    fn validate_rejects_out_of_shape_relation() {
        let w = witness(&[3], &[5], &[]);
        let c = SanityCircuit::<ark_bn254::Fr>::from_witness(&w)
            .unwrap()
            .with_relations(vec![Relation::ExtInverse { index: 0 }]);
        assert!(matches!(
            c.validate(),
            Err(CircuitError::RelationOutOfShape { .. })
        ));
    }

    #[test]
    fn constraint_count_independent_of_values() {
        let a = witness(&[3], &[5], &[[1, 0, 0, 0]]);
        let c = SanityCircuit::<ark_bn254::Fr>::from_witness(&a).unwrap();
        for (felts, exts) in [([17], [[4, 3, 2, 1]]), ([0], [[0, 0, 0, 0]])] {
            let other = SanityCircuit::<ark_bn254::Fr>::from_witness(&witness(&[3], &felts, &exts))
                .unwrap();
            assert_eq!(other.relations(), c.relations());
            assert_eq!(setup_constraints(&other), setup_constraints(&c));

            let reassigned = c.assign(&witness(&[3], &felts, &exts)).unwrap();
            let cs = ConstraintSystem::new_ref();
            cs.set_optimization_goal(OptimizationGoal::Constraints);
            reassigned.generate_constraints(cs.clone()).unwrap();
            cs.finalize();
            assert!(cs.is_satisfied().unwrap());
            assert_eq!(cs.num_constraints(), setup_constraints(&c));
        }
    }

    #[test]
    fn public_inputs_are_the_vars() {
        let w = witness(&[3, 8], &[5], &[]);
        let c = SanityCircuit::<ark_bn254::Fr>::from_witness(&w).unwrap();
        assert_eq!(
            c.public_inputs().unwrap(),
            &[ark_bn254::Fr::from(3u64), ark_bn254::Fr::from(8u64)]
        );
        assert!(c.without_assignment().public_inputs().is_none());
    }
}
