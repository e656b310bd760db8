use criterion::{Criterion, criterion_group, criterion_main};
use smiles_core::smiles::{EmitOptions, emit_smiles, parse_smiles};

const SMILES_STRINGS: &[&str] = &[
    "CO",
    "C1=CC=CC=C1",
    "C[C@H](O)[C@@H](O)C(=O)O",
    "C1CC1C(=O)O",
    "O=Cc1ccc(O)c(OC)c1COc1cc(C=O)ccc1O",
    "CC(=O)NCCC1=CNc2c1cc(OC)cc2CC(=O)NCCc1c[nH]c2ccc(OC)cc12",
    "CC1=C(C(=O)C[C@@H]1OC(=O)[C@@H]2[C@H](C2(C)C)/C=C(\\C)/C(=O)OC)C/C=C\\C=C",
    "OC[C@@H](O1)[C@@H](O)[C@H](O)[C@@H]2[C@@H]1c3c(O)c(OC)c(O)cc3C(=O)O2",
    "CC(=O)OCCC(/C)=C\\C[C@H](C(C)=C)CCC=C",
    "OCCc1c(C)[n+](cs1)Cc2cnc(C)nc2N",
];

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_smiles", |b| {
        b.iter(|| {
            for smiles in SMILES_STRINGS {
                let result = parse_smiles(smiles);
                assert!(!result.has_errors());
            }
        });
    });
}

fn bench_canonicalize(c: &mut Criterion) {
    let parsed: Vec<_> = SMILES_STRINGS.iter().map(|s| parse_smiles(s)).collect();

    c.bench_function("canonicalize", |b| {
        b.iter(|| {
            for result in &parsed {
                let _ = emit_smiles(result.molecules(), EmitOptions::default());
            }
        });
    });
}

fn bench_round_trip(c: &mut Criterion) {
    c.bench_function("parse_emit_reparse", |b| {
        b.iter(|| {
            for smiles in SMILES_STRINGS {
                let result = parse_smiles(smiles);
                let emitted = emit_smiles(result.molecules(), EmitOptions::default());
                let reparsed = parse_smiles(&emitted);
                assert!(!reparsed.has_errors());
            }
        });
    });
}

criterion_group!(benches, bench_parse, bench_canonicalize, bench_round_trip);
criterion_main!(benches);
