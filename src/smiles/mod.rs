//! The external-facing pipeline: tokenize, parse, enrich, and canonicalize
//! a SMILES string in one call, plus the matching emission path.

use std::str::FromStr;

use crate::{
    canonical::{emitter, label},
    errors::{Diagnostic, SmilesErrorWithSpan},
    molecule::{Molecule, RingLimits, aromaticity, hydrogens, ring_analyzer, ring_info::RingInfo, stereo},
    parser::{smiles_parser::SmilesParser, token_iter::TokenIter},
};

/// The outcome of [`parse_smiles`]: one [`Molecule`] per dot-separated
/// component, plus every diagnostic raised while getting there.
///
/// An empty input string produces a `ParseResult` with no molecules and no
/// diagnostics; a lone `.` produces two empty molecules, each carrying an
/// "empty molecule component" warning (§8).
#[derive(Debug, Default)]
pub struct ParseResult {
    molecules: Vec<Molecule>,
    diagnostics: Vec<Diagnostic>,
}

impl ParseResult {
    /// Returns the parsed molecules, one per dot-separated component.
    #[must_use]
    pub fn molecules(&self) -> &[Molecule] {
        &self.molecules
    }

    /// Consumes `self`, returning the parsed molecules.
    #[must_use]
    pub fn into_molecules(self) -> Vec<Molecule> {
        self.molecules
    }

    /// Returns every diagnostic raised while parsing and enriching.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns whether any diagnostic is error-severity.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity() == crate::errors::Severity::Error)
    }
}

/// Controls how [`emit_smiles`] renders a molecule.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    canonical: bool,
}

impl EmitOptions {
    /// Returns whether canonical (rank-ordered, root-chosen) emission is
    /// requested; `false` emits as-is, atom `0` as root, parse order.
    #[must_use]
    pub fn canonical(&self) -> bool {
        self.canonical
    }

    /// Returns a copy of `self` with `canonical` set.
    #[must_use]
    pub fn with_canonical(mut self, canonical: bool) -> Self {
        self.canonical = canonical;
        self
    }
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self { canonical: true }
    }
}

/// Runs the ring-membership, aromaticity, implicit-hydrogen/hybridization,
/// and stereo-validation passes on `molecule` in place, returning every
/// diagnostic they raised.
///
/// Stereo's tetrahedral check needs a canonical rank to tell distinguishable
/// neighbors apart, so the rank is computed here, after aromaticity and
/// hydrogens have settled the invariants it depends on, and discarded: a
/// fresh rank is computed again by [`emit_smiles`] once emission needs one.
fn enrich(molecule: &mut Molecule, atom_offsets: &[usize], limits: RingLimits) -> Vec<Diagnostic> {
    ring_analyzer::mark_ring_membership(molecule, limits);
    let mut diagnostics = aromaticity::perceive(molecule, limits, atom_offsets);
    hydrogens::assign(molecule);
    let rank = label::refine(molecule);
    diagnostics.extend(stereo::validate_tetrahedral(molecule, &rank, atom_offsets));
    diagnostics.extend(stereo::validate_directional_bonds(molecule, limits, atom_offsets));
    diagnostics
}

/// Parses `input` into a [`ParseResult`], running every enrichment pass on
/// each dot-separated component.
///
/// A fatal parser error truncates the pipeline: every component parsed
/// before the error is still enriched and returned, with the error itself
/// recorded as an error-severity diagnostic (§7).
#[must_use]
pub fn parse_smiles(input: &str) -> ParseResult {
    if input.is_empty() {
        return ParseResult::default();
    }

    let mut diagnostics = Vec::new();
    let tokens = match TokenIter::from(input).collect::<Result<Vec<_>, SmilesErrorWithSpan>>() {
        Ok(tokens) => tokens,
        Err(e) => {
            diagnostics.push(Diagnostic::from_error(&e));
            return ParseResult { molecules: Vec::new(), diagnostics };
        }
    };

    let parsed = match SmilesParser::new(tokens).parse() {
        Ok(components) => components,
        Err((components, e)) => {
            diagnostics.push(Diagnostic::from_error(&e));
            components
        }
    };

    let limits = RingLimits::default();
    let mut molecules = Vec::with_capacity(parsed.len());
    for component in parsed {
        let atom_offsets = component.atom_offsets().to_vec();
        let mut molecule = component.into_molecule();

        if molecule.atom_count() == 0 {
            diagnostics.push(Diagnostic::warning("empty molecule component", 0));
            molecules.push(molecule);
            continue;
        }

        diagnostics.extend(enrich(&mut molecule, &atom_offsets, limits));
        molecules.push(molecule);
    }

    ParseResult { molecules, diagnostics }
}

/// Renders `molecules` as a dot-separated SMILES string, per `options`.
#[must_use]
pub fn emit_smiles(molecules: &[Molecule], options: EmitOptions) -> String {
    molecules
        .iter()
        .map(|molecule| {
            if options.canonical() {
                let rank = label::refine(molecule);
                emitter::emit_canonical(molecule, &rank)
            } else {
                emitter::emit_as_is(molecule)
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Returns the ring perception results for `molecule`, using the default
/// ring-size cap.
#[must_use]
pub fn analyze_rings(molecule: &Molecule) -> RingInfo {
    molecule.ring_info(RingLimits::default()).clone()
}

/// Parses a single-component SMILES string directly into its enriched
/// [`Molecule`], bypassing [`ParseResult`]'s diagnostic collection. Returns
/// the first fatal parser error encountered, if any; warnings raised by the
/// enrichment passes are discarded.
impl FromStr for Molecule {
    type Err = SmilesErrorWithSpan;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = TokenIter::from(s).collect::<Result<Vec<_>, SmilesErrorWithSpan>>()?;
        let components = SmilesParser::new(tokens).parse().map_err(|(_, e)| e)?;
        let component = components.into_iter().next().expect("parse() always yields at least one component");

        let atom_offsets = component.atom_offsets().to_vec();
        let mut molecule = component.into_molecule();
        if molecule.atom_count() == 0 {
            return Ok(molecule);
        }

        enrich(&mut molecule, &atom_offsets, RingLimits::default());
        Ok(molecule)
    }
}
