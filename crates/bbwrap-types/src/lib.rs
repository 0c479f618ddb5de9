// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Shared types for the bbwrap pipeline: the proving-field selector, the
//! circuit shape, and the raw [`Witness`] with its JSON loader.

pub mod field;
pub mod load;
pub mod shape;
pub mod witness;

pub use field::FieldId;
pub use load::{load_witness, LoadError, WitnessSource, DEFAULT_WITNESS_FILE, WITNESS_ENV_VAR};
pub use shape::CircuitShape;
pub use witness::{Decimal, Witness, EXT_DEGREE};
