#![no_main]

use libfuzzer_sys::fuzz_target;
use smiles_core::smiles::{EmitOptions, emit_smiles, parse_smiles};

/// Every aromatic ring that parses cleanly must still read as aromatic after
/// a canonical emit/reparse round trip, whether it held together under
/// Hückel's rule or needed Kekulization to get there.
fuzz_target!(|data: &str| {
    let result = parse_smiles(data);
    if result.has_errors() {
        return;
    }

    for molecule in result.molecules() {
        if !molecule.atoms().iter().any(|atom| atom.aromatic()) {
            continue;
        }

        let emitted = emit_smiles(std::slice::from_ref(molecule), EmitOptions::default());
        let reparsed = parse_smiles(&emitted);
        assert!(!reparsed.has_errors(), "aromatic molecule failed to reparse: {data:?} -> {emitted:?}");

        let reparsed_aromatic_count = reparsed.molecules()[0].atoms().iter().filter(|a| a.aromatic()).count();
        let original_aromatic_count = molecule.atoms().iter().filter(|a| a.aromatic()).count();
        assert_eq!(
            reparsed_aromatic_count, original_aromatic_count,
            "aromatic atom count changed across round trip: {data:?} -> {emitted:?}"
        );
    }
});
