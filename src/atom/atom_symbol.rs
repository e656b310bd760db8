//! Module for the symbols representing an element in a SMILES string.
use core::fmt;

use elements_rs::Element;

#[derive(Copy, Default, Debug, PartialEq, Clone, Eq, Hash)]
/// Either a standard chemical [`Element`] or the `WildCard` variant (`*`),
/// described [here](http://opensmiles.org/opensmiles.html#inatoms).
pub enum AtomSymbol {
    /// An explicitly named element.
    Element(Element),
    /// The wildcard atom, `*`.
    WildCard,
    /// No symbol parsed yet; never observed on a finished [`Token`](crate::token::Token).
    #[default]
    Unspecified,
}

impl AtomSymbol {
    /// Creates an atom symbol from an optional element.
    #[must_use]
    pub fn new(element_type: Option<Element>) -> Self {
        match element_type {
            Some(element) => AtomSymbol::Element(element),
            None => AtomSymbol::default(),
        }
    }

    /// Creates an `AtomSymbol` set to `WildCard`.
    #[must_use]
    pub fn new_wildcard() -> Self {
        Self::WildCard
    }

    /// Returns whether this symbol is the wildcard.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, AtomSymbol::WildCard)
    }

    /// Returns the [`Element`], or `None` if wildcard/unspecified.
    #[must_use]
    pub fn element(&self) -> Option<Element> {
        match self {
            AtomSymbol::Element(e) => Some(*e),
            AtomSymbol::WildCard | AtomSymbol::Unspecified => None,
        }
    }

    /// Consumes the `AtomSymbol`, returning the [`Element`] or `None`.
    #[must_use]
    pub fn into_element(self) -> Option<Element> {
        match self {
            AtomSymbol::Element(e) => Some(e),
            AtomSymbol::WildCard | AtomSymbol::Unspecified => None,
        }
    }

    /// Returns true if this symbol is one of the organic-subset elements
    /// that may appear unbracketed: `B C N O P S F Cl Br I` (any case
    /// combination is handled by the tokenizer, not here).
    #[must_use]
    pub fn is_organic_subset(&self) -> bool {
        use Element::{B, Br, C, Cl, F, I, N, O, P, S};
        matches!(self.element(), Some(B | C | N | O | P | S | F | Cl | Br | I))
    }

    /// Returns true if this symbol may appear lowercase (aromatic subset):
    /// `b c n o p s` plus `se`/`as` (only reachable through brackets).
    #[must_use]
    pub fn is_aromatic_subset(&self) -> bool {
        use Element::{As, B, C, N, O, P, S, Se};
        matches!(self.element(), Some(B | C | N | O | P | S | Se | As))
    }
}

impl fmt::Display for AtomSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomSymbol::Element(e) => write!(f, "{e}"),
            AtomSymbol::WildCard => write!(f, "*"),
            AtomSymbol::Unspecified => write!(f, "?"),
        }
    }
}
