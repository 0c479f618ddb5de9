// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! BabyBear (`p = 2^31 - 2^27 + 1`) and its binomial extension
//! `BabyBear[X] / (X^4 - 11)`, plus the embedding functions that lift raw
//! `u32` encodings into them.

pub mod ext;

use ark_ff::fields::{Fp64, MontBackend, MontConfig};
use ark_ff::PrimeField;

pub use ext::Ext4;

#[derive(MontConfig)]
#[modulus = "2013265921"]
#[generator = "31"]
pub struct BabyBearConfig;

pub type BabyBear = Fp64<MontBackend<BabyBearConfig, 1>>;

pub const MODULUS: u32 = 2013265921;

/// Non-residue defining the extension: `X^4 = W`.
pub const W: u32 = 11;

pub const EXT_DEGREE: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EmbeddingError {
    #[error("{value} is not a canonical BabyBear element (modulus {MODULUS})")]
    NonCanonical { value: u32 },
}

/// Embed a raw felt. Values at or above the modulus are rejected, not reduced.
pub fn felt(value: u32) -> Result<BabyBear, EmbeddingError> {
    if value >= MODULUS {
        return Err(EmbeddingError::NonCanonical { value });
    }
    Ok(BabyBear::from(value))
}

/// Embed a raw extension element limb by limb.
pub fn ext(limbs: [u32; EXT_DEGREE]) -> Result<Ext4, EmbeddingError> {
    let mut out = [BabyBear::from(0u32); EXT_DEGREE];
    for (slot, limb) in out.iter_mut().zip(limbs) {
        *slot = felt(limb)?;
    }
    Ok(Ext4::new(out))
}

/// Lift a base element into the extension as `(x, 0, 0, 0)`.
pub fn lift(x: BabyBear) -> Ext4 {
    Ext4::from_base(x)
}

pub fn to_canonical_u32(x: BabyBear) -> u32 {
    x.into_bigint().0[0] as u32
}
