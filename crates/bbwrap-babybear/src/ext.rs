// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use ark_ff::{One, Zero};

use crate::{to_canonical_u32, BabyBear, EXT_DEGREE, MODULUS, W};

/// `p^4 - 2`: exponent for inversion by Fermat in the order-`p^4` field.
const INVERSE_EXPONENT: u128 = (MODULUS as u128).pow(4) - 2;

/// Element of `BabyBear[X] / (X^4 - W)`, coefficients low degree first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Ext4(pub [BabyBear; EXT_DEGREE]);

impl Ext4 {
    pub fn new(limbs: [BabyBear; EXT_DEGREE]) -> Self {
        Self(limbs)
    }

    pub fn zero() -> Self {
        Self([BabyBear::zero(); EXT_DEGREE])
    }

    pub fn one() -> Self {
        Self::from_base(BabyBear::one())
    }

    pub fn from_base(x: BabyBear) -> Self {
        let mut limbs = [BabyBear::zero(); EXT_DEGREE];
        limbs[0] = x;
        Self(limbs)
    }

    pub fn limbs(&self) -> &[BabyBear; EXT_DEGREE] {
        &self.0
    }

    pub fn to_canonical(&self) -> [u32; EXT_DEGREE] {
        self.0.map(to_canonical_u32)
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(Zero::is_zero)
    }

    pub fn square(&self) -> Self {
        *self * *self
    }

    pub fn pow(&self, mut exp: u128) -> Self {
        let mut base = *self;
        let mut acc = Self::one();
        while exp > 0 {
            if exp & 1 == 1 {
                acc = acc * base;
            }
            base = base.square();
            exp >>= 1;
        }
        acc
    }

    pub fn inverse(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        Some(self.pow(INVERSE_EXPONENT))
    }
}

impl Add for Ext4 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut out = self.0;
        for (o, r) in out.iter_mut().zip(rhs.0) {
            *o += r;
        }
        Self(out)
    }
}

impl Sub for Ext4 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        let mut out = self.0;
        for (o, r) in out.iter_mut().zip(rhs.0) {
            *o -= r;
        }
        Self(out)
    }
}

impl Neg for Ext4 {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.map(|x| -x))
    }
}

impl Mul for Ext4 {
    type Output = Self;

    /// Schoolbook product with `X^(4+k)` folded back as `W * X^k`.
    fn mul(self, rhs: Self) -> Self {
        let w = BabyBear::from(W);
        let mut out = [BabyBear::zero(); EXT_DEGREE];
        for (i, a) in self.0.iter().enumerate() {
            for (j, b) in rhs.0.iter().enumerate() {
                let t = *a * b;
                if i + j < EXT_DEGREE {
                    out[i + j] += t;
                } else {
                    out[i + j - EXT_DEGREE] += w * t;
                }
            }
        }
        Self(out)
    }
}

impl fmt::Display for Ext4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.to_canonical();
        write!(f, "[{a}, {b}, {c}, {d}]")
    }
}
