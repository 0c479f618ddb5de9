// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Declared relations over the three witness slots.
//!
//! Relations over the public vars carry their expected value, fixed when the
//! circuit is built, so a mutated var fails the relation it no longer
//! satisfies. The default relations over felts and exts are identities every
//! canonical value satisfies: they carry no private data and add the same
//! constraints whatever the values, so the constraint system and keys depend
//! only on the shape.

use std::fmt;

use ark_ff::PrimeField;
use ark_r1cs_std::{eq::EqGadget, fields::fp::FpVar, fields::FieldVar};
use ark_relations::r1cs::SynthesisError;
use bbwrap_babybear::{BabyBear, Ext4};
use bbwrap_types::CircuitShape;

use crate::{embed::Assignment, ext_gadget::Ext4Var, felt_gadget::FeltVar};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Relation<F: PrimeField> {
    /// `var == value`
    VarEquals { index: usize, value: F },
    /// `var * var == value`
    VarSquare { index: usize, value: F },
    /// `felt == value`. Bakes the value into the circuit; not in the default set.
    FeltEquals { index: usize, value: BabyBear },
    /// `(felt + 1)^2 == felt^2 + felt + felt + 1`, reduced mod p throughout.
    FeltSquare { index: usize },
    /// Zero-safe inverse: `felt * inv == 1` unless `felt == 0`.
    FeltInverse { index: usize },
    /// `ext == value`. Bakes the value into the circuit; not in the default set.
    ExtEquals { index: usize, value: Ext4 },
    /// `(ext + 1)^2 == ext^2 + ext + ext + 1` in the extension.
    ExtSquare { index: usize },
    /// Zero-safe inverse: `ext * inv == 1` unless `ext == 0`.
    ExtInverse { index: usize },
    /// `lift(felt) * ext == felt * ext` limb by limb.
    ExtLiftProduct { ext: usize, felt: usize },
}

/// Allocated slots a relation is enforced against.
pub struct Slots<F: PrimeField> {
    pub vars: Vec<FpVar<F>>,
    pub felts: Vec<FeltVar<F>>,
    pub exts: Vec<Ext4Var<F>>,
}

impl<F: PrimeField> Relation<F> {
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Whether every slot index the relation touches exists in `shape`.
    pub fn fits(&self, shape: &CircuitShape) -> bool {
        match *self {
            Relation::VarEquals { index, .. } | Relation::VarSquare { index, .. } => {
                index < shape.vars
            }
            Relation::FeltEquals { index, .. }
            | Relation::FeltSquare { index }
            | Relation::FeltInverse { index } => index < shape.felts,
            Relation::ExtEquals { index, .. }
            | Relation::ExtSquare { index }
            | Relation::ExtInverse { index } => index < shape.exts,
            Relation::ExtLiftProduct { ext, felt } => ext < shape.exts && felt < shape.felts,
        }
    }

    /// Evaluate the relation natively. Out-of-shape relations never hold.
    pub fn holds(&self, a: &Assignment<F>) -> bool {
        match self {
            Relation::VarEquals { index, value } => a.vars.get(*index) == Some(value),
            Relation::VarSquare { index, value } => {
                a.vars.get(*index).map(|v| v.square()) == Some(*value)
            }
            Relation::FeltEquals { index, value } => a.felts.get(*index) == Some(value),
            Relation::ExtEquals { index, value } => a.exts.get(*index) == Some(value),
            // Identities over canonical values; the embedding guarantees canonical.
            Relation::FeltSquare { .. }
            | Relation::FeltInverse { .. }
            | Relation::ExtSquare { .. }
            | Relation::ExtInverse { .. }
            | Relation::ExtLiftProduct { .. } => self.fits(&a.shape()),
        }
    }

    pub fn enforce(&self, slots: &Slots<F>) -> Result<(), SynthesisError> {
        match self {
            Relation::VarEquals { index, value } => {
                var(slots, *index)?.enforce_equal(&FpVar::constant(*value))
            }
            Relation::VarSquare { index, value } => var(slots, *index)?
                .square()?
                .enforce_equal(&FpVar::constant(*value)),
            Relation::FeltEquals { index, value } => {
                felt(slots, *index)?.enforce_equal(&FeltVar::constant(*value))
            }
            Relation::FeltSquare { index } => {
                let x = felt(slots, *index)?;
                let lhs = x.add(&FeltVar::one())?.square()?;
                let rhs = x.square()?.add(x)?.add(x)?.add(&FeltVar::one())?;
                lhs.enforce_equal(&rhs)
            }
            Relation::FeltInverse { index } => felt(slots, *index)?.inverse_or_zero().map(|_| ()),
            Relation::ExtEquals { index, value } => {
                ext(slots, *index)?.enforce_equal(&Ext4Var::constant(*value))
            }
            Relation::ExtSquare { index } => {
                let x = ext(slots, *index)?;
                let lhs = x.add(&Ext4Var::one())?.square()?;
                let rhs = x.square()?.add(x)?.add(x)?.add(&Ext4Var::one())?;
                lhs.enforce_equal(&rhs)
            }
            Relation::ExtInverse { index } => ext(slots, *index)?.inverse_or_zero().map(|_| ()),
            Relation::ExtLiftProduct { ext: e, felt: f } => {
                let x = ext(slots, *e)?;
                let y = felt(slots, *f)?;
                let lifted = Ext4Var::from_base(y).mul(x)?;
                for (limb, lhs) in x.limbs().iter().zip(lifted.limbs()) {
                    lhs.enforce_equal(&y.mul(limb)?)?;
                }
                Ok(())
            }
        }
    }
}

impl<F: PrimeField> fmt::Display for Relation<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::VarEquals { index, .. } => write!(f, "var_equals[{index}]"),
            Relation::VarSquare { index, .. } => write!(f, "var_square[{index}]"),
            Relation::FeltEquals { index, .. } => write!(f, "felt_equals[{index}]"),
            Relation::FeltSquare { index } => write!(f, "felt_square[{index}]"),
            Relation::FeltInverse { index } => write!(f, "felt_inverse[{index}]"),
            Relation::ExtEquals { index, .. } => write!(f, "ext_equals[{index}]"),
            Relation::ExtSquare { index } => write!(f, "ext_square[{index}]"),
            Relation::ExtInverse { index } => write!(f, "ext_inverse[{index}]"),
            Relation::ExtLiftProduct { ext, felt } => {
                write!(f, "ext_lift_product[{ext}, {felt}]")
            }
        }
    }
}

fn var<F: PrimeField>(slots: &Slots<F>, index: usize) -> Result<&FpVar<F>, SynthesisError> {
    slots.vars.get(index).ok_or(SynthesisError::Unsatisfiable)
}

fn felt<F: PrimeField>(slots: &Slots<F>, index: usize) -> Result<&FeltVar<F>, SynthesisError> {
    slots.felts.get(index).ok_or(SynthesisError::Unsatisfiable)
}

fn ext<F: PrimeField>(slots: &Slots<F>, index: usize) -> Result<&Ext4Var<F>, SynthesisError> {
    slots.exts.get(index).ok_or(SynthesisError::Unsatisfiable)
}

/// Default relation set for an assignment: equality and squaring on every
/// var, the square identity and zero-safe inverse on every felt and ext, and
/// a lifted product pairing each ext with felt `i % felts.len()`.
///
/// Only the var relations read values; everything else follows from the
/// shape, so witnesses that agree on vars share one circuit.
pub fn sanity_checks<F: PrimeField>(a: &Assignment<F>) -> Vec<Relation<F>> {
    let mut out = Vec::new();

    for (index, v) in a.vars.iter().enumerate() {
        out.push(Relation::VarEquals { index, value: *v });
        out.push(Relation::VarSquare {
            index,
            value: v.square(),
        });
    }

    let shape = a.shape();
    for index in 0..shape.felts {
        out.push(Relation::FeltSquare { index });
        out.push(Relation::FeltInverse { index });
    }

    for index in 0..shape.exts {
        out.push(Relation::ExtSquare { index });
        out.push(Relation::ExtInverse { index });
        if shape.felts > 0 {
            out.push(Relation::ExtLiftProduct {
                ext: index,
                felt: index % shape.felts,
            });
        }
    }

    out
}
