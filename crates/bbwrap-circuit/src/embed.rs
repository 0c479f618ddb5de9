// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Lifting a raw [`Witness`] into typed values.

use ark_ff::PrimeField;
use bbwrap_babybear::{BabyBear, Ext4};
use bbwrap_types::{CircuitShape, Decimal, Witness};

use crate::CircuitError;

/// A witness after embedding: vars in the proving field, felts and exts in
/// BabyBear and its extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment<F: PrimeField> {
    pub vars: Vec<F>,
    pub felts: Vec<BabyBear>,
    pub exts: Vec<Ext4>,
}

impl<F: PrimeField> Assignment<F> {
    pub fn from_witness(witness: &Witness) -> Result<Self, CircuitError> {
        let vars = witness
            .vars()
            .iter()
            .enumerate()
            .map(|(index, v)| embed_var(v).ok_or_else(|| CircuitError::VarOutOfRange {
                index,
                value: v.to_string(),
            }))
            .collect::<Result<Vec<F>, _>>()?;

        let felts = witness
            .felts()
            .iter()
            .enumerate()
            .map(|(index, v)| {
                bbwrap_babybear::felt(*v).map_err(|source| CircuitError::Felt { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let exts = witness
            .exts()
            .iter()
            .enumerate()
            .map(|(index, v)| {
                bbwrap_babybear::ext(*v).map_err(|source| CircuitError::Ext { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { vars, felts, exts })
    }

    pub fn shape(&self) -> CircuitShape {
        CircuitShape::new(self.vars.len(), self.felts.len(), self.exts.len())
    }
}

/// Embed a decimal into `F`, or `None` if it is not below the modulus.
pub fn embed_var<F: PrimeField>(value: &Decimal) -> Option<F> {
    let digits = value.as_str();
    let modulus = modulus_decimal::<F>();
    let below = digits.len() < modulus.len()
        || (digits.len() == modulus.len() && digits < modulus.as_str());
    if !below {
        return None;
    }

    let ten = F::from(10u64);
    Some(digits.bytes().fold(F::zero(), |acc, b| {
        acc * ten + F::from((b - b'0') as u64)
    }))
}

/// Decimal digits of the modulus of `F`, most significant first.
fn modulus_decimal<F: PrimeField>() -> String {
    Decimal::from_le_limbs(F::MODULUS.as_ref()).into()
}

/// Canonical decimal of a field element; inverse of [`embed_var`].
pub fn var_to_decimal<F: PrimeField>(x: F) -> Decimal {
    Decimal::from_le_limbs(x.into_bigint().as_ref())
}
