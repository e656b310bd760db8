//! Canonical labeling and SMILES emission: a deterministic per-atom rank
//! ([`label`]) and the DFS writer that turns a ranked molecule into text
//! ([`emitter`]).
pub mod emitter;
pub mod label;
