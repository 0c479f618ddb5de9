// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Emulated arithmetic over `BabyBear[X] / (X^4 - W)`.

use std::borrow::Borrow;

use ark_ff::PrimeField;
use ark_r1cs_std::{
    alloc::{AllocVar, AllocationMode},
    boolean::Boolean,
    eq::EqGadget,
    fields::fp::FpVar,
    fields::FieldVar,
    R1CSVar,
};
use ark_relations::r1cs::{ConstraintSystemRef, Namespace, SynthesisError};
use bbwrap_babybear::{Ext4, EXT_DEGREE, W};

use crate::felt_gadget::FeltVar;

/// Each output limb of a product sums at most `1 + 3 * W = 34` limb
/// products, so the quotient stays below `34 * p < 2^36`.
const MUL_QUOTIENT_BITS: usize = 36;

#[derive(Clone, Debug)]
pub struct Ext4Var<F: PrimeField> {
    limbs: [FeltVar<F>; EXT_DEGREE],
}

impl<F: PrimeField> Ext4Var<F> {
    pub fn constant(x: Ext4) -> Self {
        Self {
            limbs: x.0.map(FeltVar::constant),
        }
    }

    pub fn one() -> Self {
        Self::constant(Ext4::one())
    }

    /// `(x, 0, 0, 0)`
    pub fn from_base(x: &FeltVar<F>) -> Self {
        Self {
            limbs: [x.clone(), FeltVar::zero(), FeltVar::zero(), FeltVar::zero()],
        }
    }

    pub fn limbs(&self) -> &[FeltVar<F>; EXT_DEGREE] {
        &self.limbs
    }

    pub fn native(&self) -> Option<Ext4> {
        let mut out = [bbwrap_babybear::BabyBear::from(0u32); EXT_DEGREE];
        for (slot, limb) in out.iter_mut().zip(&self.limbs) {
            *slot = limb.native()?;
        }
        Some(Ext4::new(out))
    }

    pub fn add(&self, other: &Self) -> Result<Self, SynthesisError> {
        let mut limbs = Vec::with_capacity(EXT_DEGREE);
        for (a, b) in self.limbs.iter().zip(&other.limbs) {
            limbs.push(a.add(b)?);
        }
        Ok(Self::from_vec(limbs))
    }

    /// Schoolbook product with `X^4 = W` folded in before a single reduction
    /// per limb.
    pub fn mul(&self, other: &Self) -> Result<Self, SynthesisError> {
        let w = F::from(W);
        let mut acc: Vec<FpVar<F>> = vec![FpVar::zero(); EXT_DEGREE];
        for (i, a) in self.limbs.iter().enumerate() {
            for (j, b) in other.limbs.iter().enumerate() {
                let prod = a.as_fp() * b.as_fp();
                let k = i + j;
                if k < EXT_DEGREE {
                    acc[k] += prod;
                } else {
                    acc[k - EXT_DEGREE] += prod * w;
                }
            }
        }

        let mut limbs = Vec::with_capacity(EXT_DEGREE);
        for unreduced in acc {
            limbs.push(FeltVar::reduce(unreduced, MUL_QUOTIENT_BITS)?);
        }
        Ok(Self::from_vec(limbs))
    }

    pub fn square(&self) -> Result<Self, SynthesisError> {
        self.mul(self)
    }

    /// Zero-safe inverse: witness `(inv, is_zero)` with
    /// `self * inv == (1 - is_zero, 0, 0, 0)` and every limb times `is_zero`
    /// equal to zero. Zero maps to `(0, true)`.
    pub fn inverse_or_zero(&self) -> Result<(Self, Boolean<F>), SynthesisError> {
        let native = self.native();
        if self.is_constant() {
            let x = native.ok_or(SynthesisError::AssignmentMissing)?;
            return Ok(match x.inverse() {
                Some(inv) => (Self::constant(inv), Boolean::FALSE),
                None => (Self::constant(Ext4::zero()), Boolean::TRUE),
            });
        }

        let cs = self
            .limbs
            .iter()
            .map(|l| l.as_fp().cs())
            .fold(ConstraintSystemRef::None, |acc, cs| acc.or(cs));
        let inv = Self::new_witness(cs.clone(), || {
            let x = native.ok_or(SynthesisError::AssignmentMissing)?;
            Ok(x.inverse().unwrap_or_else(Ext4::zero))
        })?;
        let is_zero = Boolean::new_witness(cs, || {
            native
                .map(|x| x.is_zero())
                .ok_or(SynthesisError::AssignmentMissing)
        })?;

        let flag = FpVar::from(is_zero.clone());
        let product = self.mul(&inv)?;
        for (k, limb) in product.limbs.iter().enumerate() {
            if k == 0 {
                limb.as_fp().enforce_equal(&(FpVar::one() - &flag))?;
            } else {
                limb.as_fp().enforce_equal(&FpVar::zero())?;
            }
        }
        for limb in &self.limbs {
            (limb.as_fp() * &flag).enforce_equal(&FpVar::zero())?;
        }
        Ok((inv, is_zero))
    }

    pub fn enforce_equal(&self, other: &Self) -> Result<(), SynthesisError> {
        for (a, b) in self.limbs.iter().zip(&other.limbs) {
            a.enforce_equal(b)?;
        }
        Ok(())
    }

    fn is_constant(&self) -> bool {
        self.limbs.iter().all(|l| l.as_fp().is_constant())
    }

    fn from_vec(limbs: Vec<FeltVar<F>>) -> Self {
        let mut it = limbs.into_iter();
        Self {
            limbs: std::array::from_fn(|_| it.next().unwrap_or_else(FeltVar::zero)),
        }
    }
}

impl<F: PrimeField> AllocVar<Ext4, F> for Ext4Var<F> {
    fn new_variable<T: Borrow<Ext4>>(
        cs: impl Into<Namespace<F>>,
        f: impl FnOnce() -> Result<T, SynthesisError>,
        mode: AllocationMode,
    ) -> Result<Self, SynthesisError> {
        let ns = cs.into();
        let cs = ns.cs();
        let value = f().map(|v| *v.borrow());

        if let AllocationMode::Constant = mode {
            return Ok(Self::constant(value?));
        }

        let value = value.ok();
        let mut limbs = Vec::with_capacity(EXT_DEGREE);
        for i in 0..EXT_DEGREE {
            limbs.push(FeltVar::new_variable(
                cs.clone(),
                || {
                    value
                        .map(|v| v.0[i])
                        .ok_or(SynthesisError::AssignmentMissing)
                },
                mode,
            )?);
        }
        Ok(Self::from_vec(limbs))
    }
}
