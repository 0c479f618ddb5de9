// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use ark_ec::pairing::Pairing;
use bbwrap_types::FieldId;

/// Pairing curve whose scalar field a circuit can be compiled over.
pub trait ProvingCurve: Pairing {
    const FIELD_ID: FieldId;
}

impl ProvingCurve for ark_bn254::Bn254 {
    const FIELD_ID: FieldId = FieldId::Bn254;
}

impl ProvingCurve for ark_bls12_381::Bls12_381 {
    const FIELD_ID: FieldId = FieldId::Bls12_381;
}
