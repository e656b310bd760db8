#![no_main]

use libfuzzer_sys::fuzz_target;
use smiles_core::smiles::{EmitOptions, emit_smiles, parse_smiles};

/// Canonical emission must be a fixed point: re-parsing a canonical string
/// and emitting it again must reproduce the same string.
fuzz_target!(|data: &str| {
    let first = parse_smiles(data);
    if first.has_errors() {
        return;
    }

    let canonical_once = emit_smiles(first.molecules(), EmitOptions::default());
    let second = parse_smiles(&canonical_once);
    assert!(!second.has_errors(), "canonical output failed to reparse: {data:?} -> {canonical_once:?}");

    let canonical_twice = emit_smiles(second.molecules(), EmitOptions::default());
    assert_eq!(
        canonical_once, canonical_twice,
        "canonicalization is not a fixed point for {data:?}"
    );
});
