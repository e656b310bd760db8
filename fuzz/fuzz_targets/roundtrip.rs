#![no_main]

use libfuzzer_sys::fuzz_target;
use smiles_core::smiles::{EmitOptions, emit_smiles, parse_smiles};

fuzz_target!(|data: &str| {
    let result = parse_smiles(data);
    if result.has_errors() {
        return;
    }

    let emitted = emit_smiles(result.molecules(), EmitOptions::default());
    let reparsed = parse_smiles(&emitted);
    assert!(
        !reparsed.has_errors(),
        "canonical emission of a valid parse failed to reparse: {data:?} -> {emitted:?}"
    );
    assert_eq!(
        reparsed.molecules().len(),
        result.molecules().len(),
        "round-trip changed component count: {data:?} -> {emitted:?}"
    );
});
