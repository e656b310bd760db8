//! Test suite for validating SMILES parsing against PubChem data.
//!
//! # Running Tests
//!
//! This test reads a local PubChem CID-SMILES dump (tab-separated,
//! gzip-compressed, `cid<TAB>smiles` per row) and is ignored by default since
//! it depends on a multi-gigabyte dataset file not checked into the
//! repository:
//!
//! ```text
//! cargo test --release --test test_pubchem -- --ignored --nocapture
//! ```

use std::{fs::File, io::BufReader, path::Path};

use csv::ReaderBuilder;
use flate2::read::GzDecoder;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use smiles_core::smiles::parse_smiles;

/// A single row of PubChem's CID-SMILES dump.
#[derive(Debug, Deserialize)]
struct SmilesPubChemCompound {
    /// The PubChem compound id.
    id: u64,
    /// The compound's SMILES string, as published by PubChem.
    smiles: String,
}

/// Parses every SMILES string in `file_path`, returning `(parsed, failed)`
/// counts. A row "fails" if it raises an error-severity diagnostic.
fn validate_pubchem_smiles(file_path: &Path) -> Result<(usize, usize), Box<dyn std::error::Error>> {
    let file = File::open(file_path)?;
    let decoder = GzDecoder::new(file);
    let reader = BufReader::new(decoder);

    let mut csv_reader =
        ReaderBuilder::new().delimiter(b'\t').has_headers(false).from_reader(reader);
    let pb = ProgressBar::new(123_458_626);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("#>-"),
    );

    let (mut parsed, mut failed) = (0usize, 0usize);
    for record in csv_reader.deserialize::<SmilesPubChemCompound>() {
        let record = record?;
        pb.inc(1);

        let result = parse_smiles(&record.smiles);
        if result.has_errors() {
            failed += 1;
            eprintln!("cid {} failed to parse: {:?}", record.id, result.diagnostics());
        } else {
            parsed += 1;
        }
    }
    pb.finish();
    Ok((parsed, failed))
}

#[test]
#[ignore = "depends on a local PubChem CID-SMILES.gz dump, not checked into the repository"]
fn test_pubchem_smiles_validation() {
    let path = Path::new("tests/fixtures/CID-SMILES.gz");
    let (parsed, failed) =
        validate_pubchem_smiles(path).expect("dataset file must be present and well-formed");
    assert_eq!(failed, 0, "{failed} of {} PubChem SMILES failed to parse", parsed + failed);
}
