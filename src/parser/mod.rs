//! Tokenizing and parsing of SMILES strings into a [`crate::molecule::Molecule`] graph.
pub mod smiles_parser;
pub mod token_iter;
