//! Second pass that parses the [`TokenWithSpan`] stream into one
//! [`Molecule`] per dot-separated component.

use hashbrown::HashMap;

use crate::{
    atom::Atom,
    bond::Bond,
    errors::{Diagnostic, SmilesError, SmilesErrorWithSpan},
    molecule::Molecule,
    token::{Token, TokenWithSpan},
};

/// A parsed, not-yet-enriched molecule component, plus the source byte
/// offset of each of its atoms (used by the enrichment passes to anchor
/// diagnostics back to the original input).
#[derive(Debug)]
pub struct ParsedComponent {
    molecule: Molecule,
    atom_offsets: Vec<usize>,
}

impl ParsedComponent {
    /// Returns the parsed molecule.
    #[must_use]
    pub fn molecule(&self) -> &Molecule {
        &self.molecule
    }

    /// Returns the parsed molecule, mutably, for the enrichment passes.
    pub fn molecule_mut(&mut self) -> &mut Molecule {
        &mut self.molecule
    }

    /// Consumes `self`, returning the molecule.
    #[must_use]
    pub fn into_molecule(self) -> Molecule {
        self.molecule
    }

    /// Returns the source byte offset of each atom, indexed by atom id.
    #[must_use]
    pub fn atom_offsets(&self) -> &[usize] {
        &self.atom_offsets
    }
}

/// A ring-closure digit seen once, waiting for its matching partner.
struct RingBookmark {
    atom_id: usize,
    bond: Option<Bond>,
    offset: usize,
}

/// Contains the vec of tokens being iterated on and tracks the current position in that vec
pub struct SmilesParser {
    tokens: Vec<TokenWithSpan>,
    position: usize,
}

impl SmilesParser {
    /// Creates a new `SmilesParser` structure
    #[must_use]
    pub fn new(tokens: Vec<TokenWithSpan>) -> Self {
        SmilesParser { tokens, position: 0 }
    }
    /// Retrieves the `tokens` field of [`Vec<TokenWithSpan>`]
    #[must_use]
    pub fn tokens(&self) -> &[TokenWithSpan] {
        &self.tokens
    }
    /// Retrieves the current position
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    fn peek(&self) -> Option<&TokenWithSpan> {
        self.tokens.get(self.position)
    }

    fn bump(&mut self) {
        self.position += 1;
    }

    /// Parses the full token stream into one [`ParsedComponent`] per
    /// dot-separated component.
    ///
    /// # Errors
    /// Returns the components fully parsed so far alongside the first
    /// fatal error encountered (unbalanced parenthesis, a bond with no
    /// following atom, a ring closure never matched) — partial molecules
    /// are still useful to a caller that wants to report diagnostics for
    /// everything up to the point of failure (§7).
    pub fn parse(mut self) -> Result<Vec<ParsedComponent>, (Vec<ParsedComponent>, SmilesErrorWithSpan)> {
        let mut components = Vec::new();
        loop {
            match self.parse_component() {
                Ok(component) => components.push(component),
                Err(e) => return Err((components, e)),
            }
            match self.peek() {
                Some(tok) if *tok.token() == Token::Dot => self.bump(),
                _ => break,
            }
        }
        Ok(components)
    }

    fn parse_component(&mut self) -> Result<ParsedComponent, SmilesErrorWithSpan> {
        let mut molecule = Molecule::new();
        let mut atom_offsets = Vec::new();
        let mut branch_stack: Vec<Option<usize>> = vec![None];
        let mut pending_bond: Option<(Bond, usize)> = None;
        let mut ring_bookmarks: HashMap<u8, RingBookmark> = HashMap::new();

        loop {
            let Some(tok) = self.peek() else { break };
            let token = tok.token().clone();
            let (start, end) = (tok.start(), tok.end());

            match token {
                Token::Dot => break,
                Token::OpenParen => {
                    self.bump();
                    if pending_bond.is_some() {
                        return Err(SmilesErrorWithSpan::new(SmilesError::MissingAtomAfterBond, start, end));
                    }
                    let current = *branch_stack.last().expect("branch stack never empty");
                    branch_stack.push(current);
                }
                Token::CloseParen => {
                    self.bump();
                    if pending_bond.is_some() {
                        return Err(SmilesErrorWithSpan::new(SmilesError::MissingAtomAfterBond, start, end));
                    }
                    if branch_stack.len() <= 1 {
                        return Err(SmilesErrorWithSpan::new(SmilesError::UnbalancedParenthesis, start, end));
                    }
                    branch_stack.pop();
                }
                Token::Bond(bond) => {
                    self.bump();
                    if pending_bond.is_some() {
                        return Err(SmilesErrorWithSpan::new(SmilesError::MissingAtomAfterBond, start, end));
                    }
                    pending_bond = Some((bond, start));
                }
                Token::RingClosure(ring) => {
                    self.bump();
                    let current = branch_stack
                        .last()
                        .copied()
                        .flatten()
                        .ok_or_else(|| SmilesErrorWithSpan::new(SmilesError::MissingAtomAfterBond, start, end))?;
                    let bond = pending_bond.take().map(|(b, _)| b);
                    let key = ring.get();

                    match ring_bookmarks.remove(&key) {
                        Some(bookmark) => {
                            if bookmark.atom_id == current {
                                return Err(SmilesErrorWithSpan::new(SmilesError::InvalidRingNumber, start, end));
                            }
                            let resolved_bond = match (bookmark.bond, bond) {
                                (Some(a), Some(b)) if a != b => {
                                    return Err(SmilesErrorWithSpan::new(SmilesError::RingClosureBondMismatch, start, end));
                                }
                                (Some(a), _) => a,
                                (None, Some(b)) => b,
                                (None, None) => Bond::Single,
                            };
                            molecule.push_bond(bookmark.atom_id, current, resolved_bond);
                        }
                        None => {
                            ring_bookmarks.insert(key, RingBookmark { atom_id: current, bond, offset: start });
                        }
                    }
                }
                Token::UnbracketedAtom(a) => {
                    self.bump();
                    attach_atom(&mut molecule, &mut atom_offsets, &mut branch_stack, &mut pending_bond, Atom::from(a), start)?;
                }
                Token::BracketedAtom(a) => {
                    self.bump();
                    attach_atom(&mut molecule, &mut atom_offsets, &mut branch_stack, &mut pending_bond, Atom::from(a), start)?;
                }
            }
        }

        if let Some((_, offset)) = pending_bond {
            return Err(SmilesErrorWithSpan::new(SmilesError::MissingAtomAfterBond, offset, offset + 1));
        }
        if branch_stack.len() != 1 {
            let offset = self.tokens.get(self.position.saturating_sub(1)).map_or(0, TokenWithSpan::end);
            return Err(SmilesErrorWithSpan::new(SmilesError::UnbalancedParenthesis, offset, offset));
        }
        if let Some((key, bookmark)) = ring_bookmarks.into_iter().min_by_key(|(k, _)| *k) {
            return Err(SmilesErrorWithSpan::new(SmilesError::UnmatchedRingClosure(key), bookmark.offset, bookmark.offset + 1));
        }

        Ok(ParsedComponent { molecule, atom_offsets })
    }
}

fn attach_atom(
    molecule: &mut Molecule,
    atom_offsets: &mut Vec<usize>,
    branch_stack: &mut [Option<usize>],
    pending_bond: &mut Option<(Bond, usize)>,
    atom: Atom,
    offset: usize,
) -> Result<(), SmilesErrorWithSpan> {
    let id = molecule.push_atom(atom);
    atom_offsets.push(offset);
    let top = branch_stack.last_mut().expect("branch stack never empty");
    if let Some(prev) = *top {
        let bond = pending_bond.take().map_or(Bond::Single, |(b, _)| b);
        molecule.push_bond(prev, id, bond);
    } else if let Some((_, bond_offset)) = pending_bond.take() {
        return Err(SmilesErrorWithSpan::new(SmilesError::MissingAtomAfterBond, bond_offset, bond_offset + 1));
    }
    *top = Some(id);
    Ok(())
}

/// Converts a parser-stage fatal error into a [`Diagnostic`] (used when a
/// caller wants to keep going with whatever components parsed so far).
#[must_use]
pub fn error_diagnostic(err: &SmilesErrorWithSpan) -> Diagnostic {
    Diagnostic::from_error(err)
}

#[cfg(test)]
mod tests {
    use elements_rs::Element;

    use super::SmilesParser;
    use crate::{bond::Bond, errors::SmilesError, parser::token_iter::TokenIter};

    fn parse(input: &str) -> Result<Vec<super::ParsedComponent>, (Vec<super::ParsedComponent>, crate::errors::SmilesErrorWithSpan)> {
        let tokens = TokenIter::from(input).collect::<Result<Vec<_>, _>>().expect("valid tokens");
        SmilesParser::new(tokens).parse()
    }

    #[test]
    fn ethanol_has_three_atoms_and_two_bonds() {
        let components = parse("CCO").unwrap();
        assert_eq!(components.len(), 1);
        let mol = components[0].molecule();
        assert_eq!(mol.atom_count(), 3);
        assert_eq!(mol.bond_count(), 2);
        assert_eq!(*mol.bonds()[0].bond(), Bond::Single);
    }

    #[test]
    fn benzene_ring_closes_into_a_cycle() {
        let components = parse("c1ccccc1").unwrap();
        let mol = components[0].molecule();
        assert_eq!(mol.atom_count(), 6);
        assert_eq!(mol.bond_count(), 6);
        assert_eq!(mol.cyclomatic_number(), 1);
    }

    #[test]
    fn branch_reattaches_to_the_branch_point() {
        // Acetic acid: CC(=O)O — the second O attaches to the branch carbon,
        // not to the branch's own =O atom.
        let components = parse("CC(=O)O").unwrap();
        let mol = components[0].molecule();
        assert_eq!(mol.atom_count(), 4);
        assert_eq!(mol.degree(1), 3);
    }

    #[test]
    fn dot_separates_components() {
        let components = parse("CC.CC").unwrap();
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].molecule().atom_count(), 2);
        assert_eq!(components[1].molecule().atom_count(), 2);
    }

    #[test]
    fn unbalanced_close_paren_is_an_error() {
        let (_, err) = parse("CC)C").unwrap_err();
        assert_eq!(err.smiles_error(), SmilesError::UnbalancedParenthesis);
    }

    #[test]
    fn unclosed_branch_is_an_error() {
        let (_, err) = parse("CC(C").unwrap_err();
        assert_eq!(err.smiles_error(), SmilesError::UnbalancedParenthesis);
    }

    #[test]
    fn dangling_bond_is_an_error() {
        let (_, err) = parse("CC=").unwrap_err();
        assert_eq!(err.smiles_error(), SmilesError::MissingAtomAfterBond);
    }

    #[test]
    fn unmatched_ring_closure_is_an_error() {
        let (_, err) = parse("C1CC").unwrap_err();
        assert_eq!(err.smiles_error(), SmilesError::UnmatchedRingClosure(1));
    }

    #[test]
    fn ring_closure_bond_mismatch_is_an_error() {
        let (_, err) = parse("C=1CCCCC1").unwrap_err();
        assert_eq!(err.smiles_error(), SmilesError::RingClosureBondMismatch);
    }

    #[test]
    fn ring_closure_reuses_bond_specified_at_either_end() {
        let components = parse("C1CCCCC=1").unwrap();
        let mol = components[0].molecule();
        let idx = mol.bond_between(0, 5).unwrap();
        assert_eq!(*mol.bonds()[idx].bond(), Bond::Double);
    }

    #[test]
    fn wildcard_atom_parses_with_no_element() {
        let components = parse("*C").unwrap();
        let mol = components[0].molecule();
        assert_eq!(mol.atom(0).atom().element(), None);
        assert_eq!(mol.atom(1).atom().element(), Some(Element::C));
    }
}
