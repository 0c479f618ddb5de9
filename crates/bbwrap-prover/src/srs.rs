// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Structured reference string: powers of a secret `tau` in G1, plus
//! `[1]_2` and `[tau]_2`.
//!
//! [`Srs::generate`] samples `tau` from the caller's RNG and is only fit for
//! tests and demos. A ceremony SRS in the same encoding can be loaded with
//! [`Srs::read_from`] and used in its place; nothing downstream changes.
//!
//! # Encoding
//!
//! One byte of [`FieldId::tag`] followed by the arkworks compressed encoding
//! of the powers, `[1]_2` and `[tau]_2`.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup, PrimeGroup};
use ark_ff::{One, UniformRand};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use rand::RngCore;
use bbwrap_types::FieldId;
use sha2::{Digest as _, Sha256};

use crate::{
    curve::ProvingCurve,
    digest::{finish, Digest},
    error::SetupError,
};

#[derive(Clone, Debug, CanonicalSerialize, CanonicalDeserialize)]
pub struct Srs<E: Pairing> {
    g1_powers: Vec<E::G1Affine>,
    g2: E::G2Affine,
    tau_g2: E::G2Affine,
}

impl<E: ProvingCurve> Srs<E> {
    /// Toy SRS with `size` G1 powers of a freshly sampled `tau`.
    pub fn generate<R: RngCore>(size: usize, rng: &mut R) -> Result<Self, SetupError> {
        if size == 0 || !size.is_power_of_two() {
            return Err(SetupError::InvalidSrsSize(size));
        }

        let tau = E::ScalarField::rand(rng);
        let g1 = E::G1::generator();
        let g2 = E::G2::generator();

        let mut powers = Vec::with_capacity(size);
        let mut cur = E::ScalarField::one();
        for _ in 0..size {
            powers.push(g1 * cur);
            cur *= tau;
        }

        Ok(Self {
            g1_powers: E::G1::normalize_batch(&powers),
            g2: g2.into_affine(),
            tau_g2: (g2 * tau).into_affine(),
        })
    }

    pub fn size(&self) -> usize {
        self.g1_powers.len()
    }

    pub fn field_id(&self) -> FieldId {
        E::FIELD_ID
    }

    /// Structural and pairing checks; cheap enough to run on every use.
    pub fn validate(&self) -> Result<(), SetupError> {
        let size = self.size();
        if size == 0 || !size.is_power_of_two() {
            return Err(SetupError::InvalidSrs(format!(
                "{size} powers is not a nonzero power of two"
            )));
        }
        if self.g1_powers[0] != E::G1Affine::generator() {
            return Err(SetupError::InvalidSrs("first G1 power is not the generator".into()));
        }
        if self.g2 != E::G2Affine::generator() {
            return Err(SetupError::InvalidSrs("G2 element is not the generator".into()));
        }
        if size > 1 {
            let lhs = E::pairing(self.g1_powers[1], self.g2);
            let rhs = E::pairing(self.g1_powers[0], self.tau_g2);
            if lhs != rhs {
                return Err(SetupError::InvalidSrs(
                    "G1 and G2 powers use different tau".into(),
                ));
            }
        }
        Ok(())
    }

    pub fn digest(&self) -> Result<Digest, SetupError> {
        let mut h = Sha256::new();
        h.update(b"bbwrap/srs/v1");
        h.update([E::FIELD_ID.tag()]);
        self.serialize_compressed(&mut h)
            .map_err(|e| SetupError::Serialization(e.to_string()))?;
        Ok(finish(h))
    }

    pub fn write_to<W: Write>(&self, mut w: W) -> Result<(), SetupError> {
        w.write_all(&[E::FIELD_ID.tag()])
            .map_err(|e| SetupError::Serialization(e.to_string()))?;
        self.serialize_compressed(&mut w)
            .map_err(|e| SetupError::Serialization(e.to_string()))
    }

    /// Decode and validate an SRS written by [`Srs::write_to`].
    pub fn read_from<R: Read>(mut r: R) -> Result<Self, SetupError> {
        let mut tag = [0u8; 1];
        r.read_exact(&mut tag)
            .map_err(|e| SetupError::Serialization(e.to_string()))?;
        let actual = FieldId::from_tag(tag[0])
            .ok_or_else(|| SetupError::InvalidSrs(format!("unknown field tag {}", tag[0])))?;
        if actual != E::FIELD_ID {
            return Err(SetupError::FieldMismatch {
                expected: E::FIELD_ID,
                actual,
            });
        }

        let srs = Self::deserialize_compressed(&mut r)
            .map_err(|e| SetupError::Serialization(e.to_string()))?;
        srs.validate()?;
        Ok(srs)
    }

    pub fn save(&self, path: &Path) -> Result<(), SetupError> {
        let file = File::create(path).map_err(|source| SetupError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut w = BufWriter::new(file);
        self.write_to(&mut w)?;
        w.flush().map_err(|source| SetupError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, SetupError> {
        let file = File::open(path).map_err(|source| SetupError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::read_from(BufReader::new(file))
    }

    /// Same SRS truncated to its first `size` powers.
    pub fn truncated(&self, size: usize) -> Result<Self, SetupError> {
        if size == 0 || !size.is_power_of_two() || size > self.size() {
            return Err(SetupError::InvalidSrsSize(size));
        }
        Ok(Self {
            g1_powers: self.g1_powers[..size].to_vec(),
            g2: self.g2,
            tau_g2: self.tau_g2,
        })
    }
}
