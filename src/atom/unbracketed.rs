//! Module for an organic- or aromatic-subset atom written outside of
//! brackets `[]`: `B, C, N, O, P, S, F, Cl, Br, I` (aliphatic) or
//! `b, c, n, o, p, s` (aromatic), plus the wildcard `*`.
use elements_rs::Element;

use crate::atom::atom_symbol::AtomSymbol;

#[derive(Copy, Debug, PartialEq, Clone, Eq, Hash)]
/// An unbracketed atom: an [`AtomSymbol`] plus whether it was written
/// lowercase (aromatic).
pub struct UnbracketedAtom {
    /// The parsed symbol.
    symbol: AtomSymbol,
    /// Whether the atom was written lowercase.
    aromatic: bool,
}

impl UnbracketedAtom {
    /// Creates a new `UnbracketedAtom`.
    #[must_use]
    pub const fn new(symbol: AtomSymbol, aromatic: bool) -> Self {
        Self { symbol, aromatic }
    }

    /// Returns the [`AtomSymbol`].
    #[must_use]
    pub fn symbol(&self) -> AtomSymbol {
        self.symbol
    }

    /// Returns the [`Element`], or `None` for the wildcard.
    #[must_use]
    pub fn element(&self) -> Option<Element> {
        self.symbol.element()
    }

    /// Returns whether this atom was written lowercase.
    #[must_use]
    pub fn aromatic(&self) -> bool {
        self.aromatic
    }

    /// Returns true if the symbol is [`AtomSymbol::WildCard`].
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.symbol.is_wildcard()
    }
}
