// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Frontend witness objects handed to the prover and verifier.

use ark_ff::PrimeField;
use bbwrap_circuit::{var_to_decimal, Assignment, SanityCircuit};
use bbwrap_types::{CircuitShape, Decimal, FieldId};

use crate::{curve::ProvingCurve, error::ConstructionError};

/// Full assignment for proving. Never leaves the prover.
#[derive(Clone, Debug)]
pub struct FullWitness<E: ProvingCurve> {
    assignment: Assignment<E::ScalarField>,
}

impl<E: ProvingCurve> FullWitness<E> {
    pub fn field_id(&self) -> FieldId {
        E::FIELD_ID
    }

    pub fn shape(&self) -> CircuitShape {
        self.assignment.shape()
    }

    pub fn assignment(&self) -> &Assignment<E::ScalarField> {
        &self.assignment
    }

    /// Projection onto the public slots.
    pub fn public(&self) -> PublicWitness<E::ScalarField> {
        PublicWitness {
            field_id: E::FIELD_ID,
            values: self.assignment.vars.clone(),
        }
    }
}

/// Values of the public inputs, in allocation order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicWitness<F: PrimeField> {
    field_id: FieldId,
    values: Vec<F>,
}

impl<F: PrimeField> PublicWitness<F> {
    pub fn new(field_id: FieldId, values: Vec<F>) -> Self {
        Self { field_id, values }
    }

    pub fn field_id(&self) -> FieldId {
        self.field_id
    }

    pub fn values(&self) -> &[F] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_decimals(&self) -> Vec<Decimal> {
        self.values.iter().map(|v| var_to_decimal(*v)).collect()
    }
}

#[derive(Clone, Debug)]
pub enum WitnessObject<E: ProvingCurve> {
    Full(FullWitness<E>),
    Public(PublicWitness<E::ScalarField>),
}

impl<E: ProvingCurve> WitnessObject<E> {
    pub fn is_public_only(&self) -> bool {
        matches!(self, WitnessObject::Public(_))
    }

    /// Public projection; available from either variant.
    pub fn public(&self) -> PublicWitness<E::ScalarField> {
        match self {
            WitnessObject::Full(full) => full.public(),
            WitnessObject::Public(public) => public.clone(),
        }
    }
}

/// Wrap the assignment of `circuit` for the prover, or only its public part
/// for the verifier when `public_only` is set.
pub fn build_witness<E: ProvingCurve>(
    circuit: &SanityCircuit<E::ScalarField>,
    field_id: FieldId,
    public_only: bool,
) -> Result<WitnessObject<E>, ConstructionError> {
    if field_id != E::FIELD_ID {
        return Err(ConstructionError::FieldMismatch {
            expected: E::FIELD_ID,
            actual: field_id,
        });
    }
    let assignment = circuit
        .assignment()
        .ok_or(ConstructionError::MissingAssignment)?;

    if public_only {
        return Ok(WitnessObject::Public(PublicWitness::new(
            field_id,
            assignment.vars.clone(),
        )));
    }
    Ok(WitnessObject::Full(FullWitness {
        assignment: assignment.clone(),
    }))
}
