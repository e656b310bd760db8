#![doc = include_str!("../README.md")]

pub mod atom;
pub mod bond;
pub mod canonical;
pub mod errors;
pub mod molecule;
pub mod parser;
pub mod smiles;
pub mod token;
pub mod valence;

/// A prelude module to simplify imports.
pub mod prelude {
    pub use crate::{
        errors::{Diagnostic, Severity, SmilesError, SmilesErrorWithSpan},
        molecule::Molecule,
        smiles::{EmitOptions, ParseResult, analyze_rings, emit_smiles, parse_smiles},
    };
}
