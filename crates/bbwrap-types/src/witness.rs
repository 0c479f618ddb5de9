// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::shape::CircuitShape;

/// Number of BabyBear limbs in an extension element.
pub const EXT_DEGREE: usize = 4;

/// Unsigned decimal integer in normalised form (no sign, no leading zeros).
///
/// Vars target the proving field, which is wider than any primitive integer,
/// so they are kept as text until the circuit embeds them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Decimal(String);

impl Decimal {
    pub fn parse(s: &str) -> Result<Self, String> {
        if s.is_empty() {
            return Err("empty number".into());
        }
        if let Some(c) = s.chars().find(|c| !c.is_ascii_digit()) {
            return Err(format!("invalid digit {c:?} in {s:?}"));
        }
        let trimmed = s.trim_start_matches('0');
        Ok(Self(if trimmed.is_empty() { "0".into() } else { trimmed.into() }))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decimal form of a little-endian `u64` limb integer, such as a field
    /// element's big-integer representation.
    pub fn from_le_limbs(limbs: &[u64]) -> Self {
        let mut limbs = limbs.to_vec();
        let mut digits = Vec::new();
        while limbs.iter().any(|&l| l != 0) {
            let mut rem: u128 = 0;
            for limb in limbs.iter_mut().rev() {
                let cur = (rem << 64) | *limb as u128;
                *limb = (cur / 10) as u64;
                rem = cur % 10;
            }
            digits.push(char::from(b'0' + rem as u8));
        }
        if digits.is_empty() {
            digits.push('0');
        }
        Self(digits.into_iter().rev().collect())
    }
}

impl From<u64> for Decimal {
    fn from(v: u64) -> Self {
        Self(v.to_string())
    }
}

impl TryFrom<String> for Decimal {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Decimal::parse(&s)
    }
}

impl From<Decimal> for String {
    fn from(d: Decimal) -> Self {
        d.0
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Values assigned to one circuit instance, in slot order.
///
/// `felts` and the limbs of `exts` are raw `u32` encodings; whether they are
/// canonical BabyBear elements is decided when the circuit embeds them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Witness {
    vars: Vec<Decimal>,
    felts: Vec<u32>,
    exts: Vec<[u32; EXT_DEGREE]>,
}

impl Witness {
    pub fn new(vars: Vec<Decimal>, felts: Vec<u32>, exts: Vec<[u32; EXT_DEGREE]>) -> Self {
        Self { vars, felts, exts }
    }

    pub fn vars(&self) -> &[Decimal] {
        &self.vars
    }

    pub fn felts(&self) -> &[u32] {
        &self.felts
    }

    pub fn exts(&self) -> &[[u32; EXT_DEGREE]] {
        &self.exts
    }

    pub fn shape(&self) -> CircuitShape {
        CircuitShape::new(self.vars.len(), self.felts.len(), self.exts.len())
    }

    /// Copy of this witness with var `index` replaced, or `None` if out of range.
    pub fn with_var(&self, index: usize, value: Decimal) -> Option<Self> {
        let mut next = self.clone();
        *next.vars.get_mut(index)? = value;
        Some(next)
    }

    /// Copy of this witness with felt `index` replaced, or `None` if out of range.
    pub fn with_felt(&self, index: usize, value: u32) -> Option<Self> {
        let mut next = self.clone();
        *next.felts.get_mut(index)? = value;
        Some(next)
    }

    /// Copy of this witness with ext `index` replaced, or `None` if out of range.
    pub fn with_ext(&self, index: usize, value: [u32; EXT_DEGREE]) -> Option<Self> {
        let mut next = self.clone();
        *next.exts.get_mut(index)? = value;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_normalises_leading_zeros() {
        assert_eq!(Decimal::parse("0007").unwrap().as_str(), "7");
        assert_eq!(Decimal::parse("000").unwrap().as_str(), "0");
        assert_eq!(Decimal::parse("0").unwrap().as_str(), "0");
    }

    #[test]
    fn decimal_from_limbs() {
        assert_eq!(Decimal::from_le_limbs(&[]).as_str(), "0");
        assert_eq!(Decimal::from_le_limbs(&[0, 0]).as_str(), "0");
        assert_eq!(Decimal::from_le_limbs(&[u64::MAX]).as_str(), u64::MAX.to_string());
        // 2^64
        assert_eq!(Decimal::from_le_limbs(&[0, 1]).as_str(), "18446744073709551616");
    }

    #[test]
    fn decimal_rejects_non_digits() {
        assert!(Decimal::parse("").is_err());
        assert!(Decimal::parse("-1").is_err());
        assert!(Decimal::parse("+1").is_err());
        assert!(Decimal::parse("1.5").is_err());
        assert!(Decimal::parse("0x10").is_err());
        assert!(Decimal::parse(" 1").is_err());
    }

    #[test]
    fn with_var_leaves_original_untouched() {
        let w = Witness::new(vec![Decimal::from(3)], vec![5], vec![[1, 0, 0, 0]]);
        let mutated = w.with_var(0, Decimal::from(4)).unwrap();
        assert_eq!(w.vars()[0].as_str(), "3");
        assert_eq!(mutated.vars()[0].as_str(), "4");
        assert!(w.with_var(1, Decimal::from(4)).is_none());
    }

    #[test]
    fn shape_counts_slots() {
        let w = Witness::new(vec![], vec![1, 2], vec![[0; 4]; 3]);
        assert_eq!(w.shape(), CircuitShape::new(0, 2, 3));
    }
}
