// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! End-to-end tests: witness in, verified proof out, and every way the
//! stages are expected to refuse.

use std::fs;

use ark_bls12_381::Bls12_381;
use ark_bn254::{Bn254, Fr};
use bbwrap_circuit::SanityCircuit;
use bbwrap_prover::{
    build_witness, compile, derive_keys, derive_srs, inspect, prove, required_srs_size, run,
    run_with_progress, verify, verify_artifacts, verify_bytes, write_toy_srs, Artifacts,
    CompiledCircuit, PipelineConfig, PipelineError, Proof, ProvingCurve, ProvingError, ProvingKey,
    PublicWitness, SetupError, Srs, Stage, VerificationError, VerifyingKey,
};
use bbwrap_types::{Decimal, FieldId, Witness};
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn witness(vars: &[u64], felts: &[u32], exts: &[[u32; 4]]) -> Witness {
    Witness::new(
        vars.iter().map(|v| Decimal::from(*v)).collect(),
        felts.to_vec(),
        exts.to_vec(),
    )
}

fn sample() -> Witness {
    witness(&[3], &[5], &[[1, 0, 0, 0]])
}

fn setup<E: ProvingCurve>(
    circuit: &SanityCircuit<E::ScalarField>,
) -> (CompiledCircuit<E>, ProvingKey<E>, VerifyingKey<E>) {
    let cs = compile::<E>(E::FIELD_ID, circuit).unwrap();
    let srs = derive_srs(&cs, &mut rng()).unwrap();
    let (pk, vk) = derive_keys(&cs, &srs, &mut rng()).unwrap();
    (cs, pk, vk)
}

fn roundtrip<E: ProvingCurve>() {
    let circuit = SanityCircuit::<E::ScalarField>::from_witness(&sample()).unwrap();
    let (cs, pk, vk) = setup::<E>(&circuit);

    let full = build_witness::<E>(&circuit, E::FIELD_ID, false).unwrap();
    let proof = prove(&cs, &pk, &full, &mut rng()).unwrap();

    let public = build_witness::<E>(&circuit, E::FIELD_ID, true)
        .unwrap()
        .public();
    verify(&proof, &vk, &public).unwrap();
    verify_bytes(&proof.to_bytes().unwrap(), &vk, &public).unwrap();
}

// ── round trip ──

#[test]
fn roundtrip_bn254() {
    roundtrip::<Bn254>();
}

#[test]
fn roundtrip_bls12_381() {
    roundtrip::<Bls12_381>();
}

#[test]
fn constraint_count_depends_only_on_shape() {
    let a = SanityCircuit::<Fr>::from_witness(&sample()).unwrap();
    let ca = compile::<Bn254>(FieldId::Bn254, &a).unwrap();
    assert!(ca.constraint_count() > 0);
    assert_eq!(ca.public_input_count(), 1);

    for other in [
        witness(&[9], &[7], &[[2, 4, 6, 8]]),
        witness(&[3], &[0], &[[0, 0, 0, 0]]),
    ] {
        let b = SanityCircuit::<Fr>::from_witness(&other).unwrap();
        let cb = compile::<Bn254>(FieldId::Bn254, &b).unwrap();
        assert_eq!(ca.constraint_count(), cb.constraint_count());
        assert_eq!(ca.variable_count(), cb.variable_count());
    }
}

#[test]
fn private_values_do_not_change_the_circuit_digest() {
    let a = SanityCircuit::<Fr>::from_witness(&sample()).unwrap();
    let b = SanityCircuit::<Fr>::from_witness(&witness(&[3], &[0], &[[0, 0, 0, 0]])).unwrap();
    let ca = compile::<Bn254>(FieldId::Bn254, &a).unwrap();
    let cb = compile::<Bn254>(FieldId::Bn254, &b).unwrap();
    assert_eq!(ca.digest(), cb.digest());
}

// ── soundness ──

#[test]
fn mutated_var_is_refused_before_proving() {
    let w = sample();
    let circuit = SanityCircuit::<Fr>::from_witness(&w).unwrap();
    let (cs, pk, _) = setup::<Bn254>(&circuit);

    let mutated = circuit
        .assign(&w.with_var(0, Decimal::from(4)).unwrap())
        .unwrap();
    let full = build_witness::<Bn254>(&mutated, FieldId::Bn254, false).unwrap();
    match prove(&cs, &pk, &full, &mut rng()) {
        Err(ProvingError::Unsatisfied { relation }) => assert_eq!(relation, "var_equals[0]"),
        other => panic!("expected unsatisfied, got {other:?}"),
    }
}

#[test]
fn public_only_witness_cannot_prove() {
    let circuit = SanityCircuit::<Fr>::from_witness(&sample()).unwrap();
    let (cs, pk, _) = setup::<Bn254>(&circuit);
    let public = build_witness::<Bn254>(&circuit, FieldId::Bn254, true).unwrap();
    assert!(matches!(
        prove(&cs, &pk, &public, &mut rng()),
        Err(ProvingError::PublicOnlyWitness)
    ));
}

// ── binding ──

#[test]
fn proof_is_bound_to_its_keys() {
    let c1 = SanityCircuit::<Fr>::from_witness(&sample()).unwrap();
    let c2 = SanityCircuit::<Fr>::from_witness(&witness(&[3, 4], &[5], &[[1, 0, 0, 0]])).unwrap();
    let (cs1, pk1, _) = setup::<Bn254>(&c1);
    let (_, pk2, vk2) = setup::<Bn254>(&c2);

    let full = build_witness::<Bn254>(&c1, FieldId::Bn254, false).unwrap();
    let proof = prove(&cs1, &pk1, &full, &mut rng()).unwrap();
    let public = full.public();

    assert!(matches!(
        verify(&proof, &vk2, &public),
        Err(VerificationError::KeyMismatch)
    ));
    assert!(matches!(
        prove(&cs1, &pk2, &full, &mut rng()),
        Err(ProvingError::KeyMismatch)
    ));
}

#[test]
fn same_circuit_under_another_srs_is_refused() {
    let circuit = SanityCircuit::<Fr>::from_witness(&sample()).unwrap();
    let (cs, pk, _) = setup::<Bn254>(&circuit);
    let other_srs = derive_srs(&cs, &mut StdRng::seed_from_u64(43)).unwrap();
    let (_, vk2) = derive_keys(&cs, &other_srs, &mut StdRng::seed_from_u64(43)).unwrap();
    assert_eq!(vk2.binding().circuit_digest, pk.binding().circuit_digest);
    assert_ne!(vk2.binding().srs_digest, pk.binding().srs_digest);

    let full = build_witness::<Bn254>(&circuit, FieldId::Bn254, false).unwrap();
    let proof = prove(&cs, &pk, &full, &mut rng()).unwrap();
    let public = full.public();
    assert!(matches!(
        verify(&proof, &vk2, &public),
        Err(VerificationError::KeyMismatch)
    ));

    // Relabelling the proof with the other binding still fails the pairing.
    let mut bytes = proof.to_bytes().unwrap();
    bytes[..vk2.binding().to_bytes().len()].copy_from_slice(&vk2.binding().to_bytes());
    assert!(matches!(
        verify_bytes(&bytes, &vk2, &public),
        Err(VerificationError::Rejected)
    ));
}

#[test]
fn verification_sees_only_public_inputs() {
    let w1 = sample();
    let w2 = witness(&[3], &[0], &[[0, 0, 0, 0]]);
    let circuit = SanityCircuit::<Fr>::from_witness(&w1).unwrap();
    let (cs, pk, vk) = setup::<Bn254>(&circuit);
    let public = PublicWitness::new(FieldId::Bn254, vec![Fr::from(3u64)]);
    let other = PublicWitness::new(FieldId::Bn254, vec![Fr::from(4u64)]);

    for w in [&w1, &w2] {
        let assigned = circuit.assign(w).unwrap();
        let full = build_witness::<Bn254>(&assigned, FieldId::Bn254, false).unwrap();
        let proof = prove(&cs, &pk, &full, &mut rng()).unwrap();
        verify(&proof, &vk, &public).unwrap();
        assert_eq!(full.public(), public);
        assert!(matches!(
            verify(&proof, &vk, &other),
            Err(VerificationError::Rejected)
        ));
    }
}

#[test]
fn witnesses_built_separately_share_keys_when_vars_agree() {
    let c1 = SanityCircuit::<Fr>::from_witness(&sample()).unwrap();
    let c2 = SanityCircuit::<Fr>::from_witness(&witness(&[3], &[9], &[[0, 0, 7, 0]])).unwrap();
    let (cs, pk, vk) = setup::<Bn254>(&c1);

    let full = build_witness::<Bn254>(&c2, FieldId::Bn254, false).unwrap();
    let proof = prove(&cs, &pk, &full, &mut rng()).unwrap();
    verify(&proof, &vk, &full.public()).unwrap();
}

#[test]
fn proof_bytes_decode_to_the_same_proof() {
    let circuit = SanityCircuit::<Fr>::from_witness(&sample()).unwrap();
    let (cs, pk, _) = setup::<Bn254>(&circuit);
    let full = build_witness::<Bn254>(&circuit, FieldId::Bn254, false).unwrap();
    let proof = prove(&cs, &pk, &full, &mut rng()).unwrap();
    let back = Proof::<Bn254>::from_bytes(&proof.to_bytes().unwrap()).unwrap();
    assert_eq!(back, proof);
}

#[test]
fn wrong_public_input_count_is_refused() {
    let circuit = SanityCircuit::<Fr>::from_witness(&sample()).unwrap();
    let (cs, pk, vk) = setup::<Bn254>(&circuit);
    let full = build_witness::<Bn254>(&circuit, FieldId::Bn254, false).unwrap();
    let proof = prove(&cs, &pk, &full, &mut rng()).unwrap();

    let public = PublicWitness::new(FieldId::Bn254, vec![Fr::from(3u64), Fr::from(3u64)]);
    assert!(matches!(
        verify(&proof, &vk, &public),
        Err(VerificationError::PublicInputLength {
            expected: 1,
            actual: 2
        })
    ));
}

#[test]
fn malformed_proof_bytes() {
    let circuit = SanityCircuit::<Fr>::from_witness(&sample()).unwrap();
    let (cs, pk, vk) = setup::<Bn254>(&circuit);
    let full = build_witness::<Bn254>(&circuit, FieldId::Bn254, false).unwrap();
    let proof = prove(&cs, &pk, &full, &mut rng()).unwrap();
    let public = full.public();

    assert!(matches!(
        verify_bytes(&[0u8; 10], &vk, &public),
        Err(VerificationError::Malformed(_))
    ));

    let bytes = proof.to_bytes().unwrap();
    assert!(matches!(
        verify_bytes(&bytes[..bytes.len() - 1], &vk, &public),
        Err(VerificationError::Malformed(_))
    ));
}

// ── SRS sizing ──

#[test]
fn undersized_srs_is_refused() {
    let circuit = SanityCircuit::<Fr>::from_witness(&sample()).unwrap();
    let cs = compile::<Bn254>(FieldId::Bn254, &circuit).unwrap();
    let srs = Srs::<Bn254>::generate(2, &mut rng()).unwrap();
    match derive_keys(&cs, &srs, &mut rng()) {
        Err(SetupError::SrsTooSmall { required, actual }) => {
            assert_eq!(required, cs.required_srs_size());
            assert_eq!(actual, 2);
        }
        other => panic!("expected SrsTooSmall, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn oversized_srs_is_accepted() {
    let circuit = SanityCircuit::<Fr>::from_witness(&sample()).unwrap();
    let cs = compile::<Bn254>(FieldId::Bn254, &circuit).unwrap();
    let srs = Srs::<Bn254>::generate(cs.required_srs_size() * 2, &mut rng()).unwrap();
    let (pk, vk) = derive_keys(&cs, &srs, &mut rng()).unwrap();
    let full = build_witness::<Bn254>(&circuit, FieldId::Bn254, false).unwrap();
    let proof = prove(&cs, &pk, &full, &mut rng()).unwrap();
    verify(&proof, &vk, &full.public()).unwrap();
}

proptest! {
    #[test]
    fn srs_size_is_least_covering_power_of_two(c in 1usize..1 << 20, v in 1usize..1 << 20) {
        let n = required_srs_size(c, v);
        prop_assert!(n.is_power_of_two());
        prop_assert!(n >= c.max(v));
        prop_assert!(n / 2 < c.max(v));
    }
}

// ── pipeline ──

fn write_sample(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("witness.json");
    fs::write(&path, r#"{"Vars":[3],"Felts":[5],"Exts":[[1,0,0,0]]}"#).unwrap();
    path
}

fn config(dir: &std::path::Path) -> PipelineConfig {
    PipelineConfig {
        source_path: Some(write_sample(dir)),
        prover_seed: Some(7),
        ..PipelineConfig::default()
    }
}

#[test]
fn run_passes_every_stage_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut seen = Vec::new();
    let report = run_with_progress(&config(dir.path()), |s| seen.push(s)).unwrap();

    assert_eq!(seen, Stage::SEQUENCE);
    assert_eq!(report.stage, Stage::Verified);
    assert_eq!(report.timings.len(), Stage::SEQUENCE.len());
    assert_eq!(report.public_inputs, 1);
    assert!(report.srs_size >= report.constraint_count);
}

#[test]
fn run_writes_verifiable_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let cfg = PipelineConfig {
        artifacts_dir: Some(out.clone()),
        ..config(dir.path())
    };
    run(&cfg).unwrap();

    let mut artifacts = Artifacts::read_dir(&out).unwrap();
    assert_eq!(verify_artifacts(&artifacts).unwrap(), FieldId::Bn254);
    assert_eq!(artifacts.public_witness.values, vec![Decimal::from(3)]);

    artifacts.public_witness.values = vec![Decimal::from(4)];
    let err = verify_artifacts(&artifacts).unwrap_err();
    assert!(err.is_rejection(), "{err}");
}

#[test]
fn run_without_public_only_projects_the_full_witness() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = PipelineConfig {
        public_only: false,
        field_id: FieldId::Bls12_381,
        ..config(dir.path())
    };
    let report = run(&cfg).unwrap();
    assert!(!report.public_only);
    assert_eq!(report.field_id, FieldId::Bls12_381);
}

#[test]
fn run_with_stored_srs() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());
    let required = inspect(&cfg).unwrap().required_srs_size;

    let srs_path = dir.path().join("srs.bin");
    write_toy_srs(FieldId::Bn254, required, 42, &srs_path).unwrap();
    let report = run(&PipelineConfig {
        srs_path: Some(srs_path),
        ..cfg.clone()
    })
    .unwrap();
    assert_eq!(report.srs_size, required);

    let small = dir.path().join("small.bin");
    write_toy_srs(FieldId::Bn254, 2, 42, &small).unwrap();
    let err = run(&PipelineConfig {
        srs_path: Some(small),
        ..cfg
    })
    .unwrap_err();
    assert_eq!(err.stage(), Stage::SetUp);
    assert!(matches!(
        err,
        PipelineError::Setup(SetupError::SrsTooSmall { .. })
    ));
}

#[test]
fn srs_over_another_field_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let srs_path = dir.path().join("srs.bin");
    write_toy_srs(FieldId::Bls12_381, 4, 42, &srs_path).unwrap();
    let err = run(&PipelineConfig {
        srs_path: Some(srs_path),
        ..config(dir.path())
    })
    .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Setup(SetupError::FieldMismatch { .. })
    ));
}

#[test]
fn missing_witness_fails_at_load() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = PipelineConfig {
        source_path: Some(dir.path().join("absent.json")),
        ..PipelineConfig::default()
    };
    let err = run(&cfg).unwrap_err();
    assert_eq!(err.stage(), Stage::Loaded);
    assert!(!err.is_rejection());
}

#[test]
fn non_canonical_felt_fails_at_circuit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("witness.json");
    fs::write(&path, r#"{"Vars":[3],"Felts":[2013265921],"Exts":[]}"#).unwrap();
    let err = run(&PipelineConfig {
        source_path: Some(path),
        ..PipelineConfig::default()
    })
    .unwrap_err();
    assert_eq!(err.stage(), Stage::Circuited);
}
