// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared arity of the three witness slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CircuitShape {
    pub vars: usize,
    pub felts: usize,
    pub exts: usize,
}

impl CircuitShape {
    pub fn new(vars: usize, felts: usize, exts: usize) -> Self {
        Self { vars, felts, exts }
    }
}

impl fmt::Display for CircuitShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vars={} felts={} exts={}", self.vars, self.felts, self.exts)
    }
}
