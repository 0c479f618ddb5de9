// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Circuit model for BabyBear sanity checks inside a pairing-friendly
//! scalar field.
//!
//! | Module | Purpose |
//! |---|---|
//! | [`bits`] | bit decomposition and the canonical-BabyBear range check |
//! | [`felt_gadget`] | [`FeltVar`], emulated BabyBear arithmetic |
//! | [`ext_gadget`] | [`Ext4Var`], emulated quartic extension arithmetic |
//! | [`relation`] | the pluggable [`Relation`] set and the default sanity checks |
//! | [`sanity`] | [`SanityCircuit`], the `ConstraintSynthesizer` |

pub mod bits;
pub mod embed;
pub mod ext_gadget;
pub mod felt_gadget;
pub mod relation;
pub mod sanity;

use bbwrap_babybear::EmbeddingError;
use bbwrap_types::CircuitShape;

pub use embed::{embed_var, var_to_decimal, Assignment};
pub use ext_gadget::Ext4Var;
pub use felt_gadget::FeltVar;
pub use relation::{sanity_checks, Relation};
pub use sanity::SanityCircuit;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CircuitError {
    #[error("shape mismatch: circuit declares {expected}, witness has {actual}")]
    ShapeMismatch {
        expected: CircuitShape,
        actual: CircuitShape,
    },

    #[error("shape mismatch: relation {relation} references a slot outside {shape}")]
    RelationOutOfShape {
        relation: String,
        shape: CircuitShape,
    },

    #[error("vars[{index}]: {value} is not below the proving field modulus")]
    VarOutOfRange { index: usize, value: String },

    #[error("felts[{index}]: {source}")]
    Felt {
        index: usize,
        source: EmbeddingError,
    },

    #[error("exts[{index}]: {source}")]
    Ext {
        index: usize,
        source: EmbeddingError,
    },
}

impl CircuitError {
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(
            self,
            CircuitError::ShapeMismatch { .. } | CircuitError::RelationOutOfShape { .. }
        )
    }
}
