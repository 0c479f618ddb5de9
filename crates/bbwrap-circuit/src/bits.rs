// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use ark_ff::PrimeField;
use ark_r1cs_std::{
    alloc::AllocVar, boolean::Boolean, eq::EqGadget, fields::fp::FpVar, fields::FieldVar, R1CSVar,
};
use ark_relations::r1cs::{ConstraintSystemRef, SynthesisError};

/// Bits needed for a canonical BabyBear element.
pub const FELT_BITS: usize = 31;

/// Bits 27..31 are exactly the set bits of `p - 1 = 15 * 2^27`.
const HIGH_BITS: std::ops::Range<usize> = 27..31;

/// Low 128 bits of a field element; every value the gadgets decompose fits.
pub fn to_u128<F: PrimeField>(x: F) -> u128 {
    let big = x.into_bigint();
    let limbs = big.as_ref();
    let lo = limbs.first().copied().unwrap_or(0) as u128;
    let hi = limbs.get(1).copied().unwrap_or(0) as u128;
    lo | (hi << 64)
}

/// Decompose `val` into `num_bits` little-endian Boolean witnesses and
/// constrain their weighted sum to equal `val`.
pub fn enforce_bits<F: PrimeField>(
    cs: ConstraintSystemRef<F>,
    val: &FpVar<F>,
    num_bits: usize,
) -> Result<Vec<Boolean<F>>, SynthesisError> {
    let native = val.value().ok().map(to_u128);

    let mut bits: Vec<Boolean<F>> = Vec::with_capacity(num_bits);
    for i in 0..num_bits {
        let bit = Boolean::new_witness(cs.clone(), || {
            let v = native.ok_or(SynthesisError::AssignmentMissing)?;
            Ok((v >> i) & 1 == 1)
        })?;
        bits.push(bit);
    }

    pack_bits(&bits).enforce_equal(val)?;
    Ok(bits)
}

/// `Σ bit_i * 2^i` as a linear combination.
pub fn pack_bits<F: PrimeField>(bits: &[Boolean<F>]) -> FpVar<F> {
    let mut sum = FpVar::zero();
    let mut coeff = F::one();
    for bit in bits {
        sum += FpVar::from(bit.clone()) * coeff;
        coeff.double_in_place();
    }
    sum
}

/// Constrain `val < p` for the BabyBear modulus `p = 2^31 - 2^27 + 1`.
///
/// After a 31-bit decomposition, `val` is canonical unless bits 27..31 are
/// all set while some lower bit is set too.
pub fn enforce_canonical_babybear<F: PrimeField>(
    cs: ConstraintSystemRef<F>,
    val: &FpVar<F>,
) -> Result<(), SynthesisError> {
    let bits = enforce_bits(cs, val, FELT_BITS)?;

    let mut high = FpVar::one();
    for bit in &bits[HIGH_BITS] {
        high *= FpVar::from(bit.clone());
    }
    let low = pack_bits(&bits[..HIGH_BITS.start]);

    (high * low).enforce_equal(&FpVar::zero())
}
