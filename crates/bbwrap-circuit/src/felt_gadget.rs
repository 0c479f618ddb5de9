// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! BabyBear elements emulated inside a larger prime field.
//!
//! A [`FeltVar`] always holds a canonical value (`< p`): allocation range
//! checks it, and every operation reduces its result with a witnessed
//! quotient/remainder pair, `x = q * p + r`.

use std::borrow::Borrow;

use ark_ff::{Field, PrimeField, Zero};
use ark_r1cs_std::{
    alloc::{AllocVar, AllocationMode},
    boolean::Boolean,
    eq::EqGadget,
    fields::fp::FpVar,
    fields::FieldVar,
    R1CSVar,
};
use ark_relations::r1cs::{Namespace, SynthesisError};
use bbwrap_babybear::{to_canonical_u32, BabyBear, MODULUS};

use crate::bits::{enforce_bits, enforce_canonical_babybear, to_u128};

/// Quotient width after adding two canonical elements.
const ADD_QUOTIENT_BITS: usize = 1;

/// Quotient width after multiplying two canonical elements (`q < p < 2^31`).
const MUL_QUOTIENT_BITS: usize = 31;

#[derive(Clone, Debug)]
pub struct FeltVar<F: PrimeField> {
    value: FpVar<F>,
}

impl<F: PrimeField> FeltVar<F> {
    pub fn constant(x: BabyBear) -> Self {
        Self {
            value: FpVar::Constant(F::from(to_canonical_u32(x))),
        }
    }

    pub fn zero() -> Self {
        Self::constant(BabyBear::from(0u32))
    }

    pub fn one() -> Self {
        Self::constant(BabyBear::from(1u32))
    }

    pub fn as_fp(&self) -> &FpVar<F> {
        &self.value
    }

    /// Assigned value, if any.
    pub fn native(&self) -> Option<BabyBear> {
        self.value
            .value()
            .ok()
            .map(|v| BabyBear::from(to_u128(v) as u64))
    }

    /// Reduce an unreduced integer `x < 2^quotient_bits * p` to a canonical felt.
    pub(crate) fn reduce(x: FpVar<F>, quotient_bits: usize) -> Result<Self, SynthesisError> {
        let cs = x.cs();
        let native = x.value().ok().map(to_u128);
        let p = MODULUS as u128;

        if cs.is_none() {
            let v = native.ok_or(SynthesisError::AssignmentMissing)?;
            return Ok(Self::constant(BabyBear::from((v % p) as u64)));
        }

        let quotient = FpVar::new_witness(cs.clone(), || {
            native
                .map(|v| F::from(v / p))
                .ok_or(SynthesisError::AssignmentMissing)
        })?;
        let remainder = Self::new_witness(cs.clone(), || {
            native
                .map(|v| BabyBear::from((v % p) as u64))
                .ok_or(SynthesisError::AssignmentMissing)
        })?;
        enforce_bits(cs, &quotient, quotient_bits)?;

        let recomposed = quotient * F::from(MODULUS) + &remainder.value;
        recomposed.enforce_equal(&x)?;
        Ok(remainder)
    }

    pub fn add(&self, other: &Self) -> Result<Self, SynthesisError> {
        Self::reduce(&self.value + &other.value, ADD_QUOTIENT_BITS)
    }

    pub fn mul(&self, other: &Self) -> Result<Self, SynthesisError> {
        Self::reduce(&self.value * &other.value, MUL_QUOTIENT_BITS)
    }

    pub fn square(&self) -> Result<Self, SynthesisError> {
        self.mul(self)
    }

    /// Witness `(inv, is_zero)` with `self * inv == 1 - is_zero` and
    /// `self * is_zero == 0`. Zero maps to `(0, true)`; any other value to
    /// its inverse and `false`. Satisfiable for every canonical input.
    pub fn inverse_or_zero(&self) -> Result<(Self, Boolean<F>), SynthesisError> {
        let native = self.native();
        if self.value.is_constant() {
            let x = native.ok_or(SynthesisError::AssignmentMissing)?;
            return Ok(match x.inverse() {
                Some(inv) => (Self::constant(inv), Boolean::FALSE),
                None => (Self::zero(), Boolean::TRUE),
            });
        }

        let cs = self.value.cs();
        let inv = Self::new_witness(cs.clone(), || {
            let x = native.ok_or(SynthesisError::AssignmentMissing)?;
            Ok(x.inverse().unwrap_or_default())
        })?;
        let is_zero = Boolean::new_witness(cs, || {
            native
                .map(|x| x.is_zero())
                .ok_or(SynthesisError::AssignmentMissing)
        })?;

        let flag = FpVar::from(is_zero.clone());
        self.mul(&inv)?
            .value
            .enforce_equal(&(FpVar::one() - &flag))?;
        (&self.value * &flag).enforce_equal(&FpVar::zero())?;
        Ok((inv, is_zero))
    }

    pub fn enforce_equal(&self, other: &Self) -> Result<(), SynthesisError> {
        self.value.enforce_equal(&other.value)
    }
}

impl<F: PrimeField> AllocVar<BabyBear, F> for FeltVar<F> {
    fn new_variable<T: Borrow<BabyBear>>(
        cs: impl Into<Namespace<F>>,
        f: impl FnOnce() -> Result<T, SynthesisError>,
        mode: AllocationMode,
    ) -> Result<Self, SynthesisError> {
        let ns = cs.into();
        let cs = ns.cs();

        if let AllocationMode::Constant = mode {
            let x = *f()?.borrow();
            return Ok(Self::constant(x));
        }

        let value = FpVar::new_variable(
            cs.clone(),
            || f().map(|x| F::from(to_canonical_u32(*x.borrow()))),
            mode,
        )?;
        enforce_canonical_babybear(cs, &value)?;
        Ok(Self { value })
    }
}
