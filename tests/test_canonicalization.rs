//! Integration tests asserting that canonical emission gives every
//! differently-written form of the same molecule one unique string.

use smiles_core::smiles::{EmitOptions, emit_smiles, parse_smiles};

fn canonicalize(smiles: &str) -> String {
    let result = parse_smiles(smiles);
    assert!(!result.has_errors(), "{smiles} failed to parse: {:?}", result.diagnostics());
    emit_smiles(result.molecules(), EmitOptions::default())
}

#[test]
fn differently_rooted_benzene_strings_canonicalize_identically() {
    let forms = ["c1ccccc1", "c1ccc(cc1)", "C1=CC=CC=C1"];
    let canonical: Vec<_> = forms.iter().map(|s| canonicalize(s)).collect();
    assert!(canonical.windows(2).all(|w| w[0] == w[1]), "{canonical:?}");
}

#[test]
fn differently_written_phenol_forms_canonicalize_identically() {
    let forms = ["c1ccccc1O", "Oc1ccccc1", "OC1=CC=CC=C1"];
    let canonical: Vec<_> = forms.iter().map(|s| canonicalize(s)).collect();
    assert!(canonical.windows(2).all(|w| w[0] == w[1]), "{canonical:?}");
}

#[test]
fn canonical_ethanol_is_reached_from_either_direction() {
    assert_eq!(canonicalize("CCO"), canonicalize("OCC"));
}

#[test]
fn dot_separated_components_each_canonicalize_on_their_own() {
    let combined = canonicalize("CCO.c1ccccc1");
    let parts: Vec<&str> = combined.split('.').collect();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0], canonicalize("CCO"));
    assert_eq!(parts[1], canonicalize("c1ccccc1"));
}

#[test]
fn canonicalization_is_idempotent() {
    let once = canonicalize("c1ccc(C(=O)O)cc1");
    let twice = canonicalize(&once);
    assert_eq!(once, twice);
}

#[test]
fn as_is_emission_preserves_parse_order_while_canonical_does_not_require_it() {
    let result = parse_smiles("OCC");
    let as_is = emit_smiles(result.molecules(), EmitOptions::default().with_canonical(false));
    assert_eq!(as_is, "OCC");
}
