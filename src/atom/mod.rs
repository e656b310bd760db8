//! Wrapper module for both bracketed and unbracketed atoms.
pub mod atom_node;
pub mod atom_symbol;
pub mod bracketed;
pub mod unbracketed;

use elements_rs::{Element, Isotope};

use crate::{
    atom::{
        atom_symbol::AtomSymbol,
        bracketed::{
            BracketAtom, charge::Charge, chirality::Chirality, hydrogen_count::HydrogenCount,
        },
        unbracketed::UnbracketedAtom,
    },
    errors::SmilesError,
};

/// An atom as written in the SMILES source: either an organic-/aromatic-
/// subset atom outside brackets, or a fully specified bracket atom.
///
/// `Atom` is immutable once constructed by the parser; chemistry-dependent
/// attributes that are only known after enrichment (perceived aromaticity,
/// implicit hydrogens, validated chirality) live on
/// [`crate::atom::atom_node::AtomNode`], not here.
#[derive(Copy, Debug, Clone, PartialEq, Eq, Hash)]
pub enum Atom {
    /// An atom outside of brackets.
    Unbracketed(UnbracketedAtom),
    /// An atom inside `[...]`.
    Bracketed(BracketAtom),
}

impl From<UnbracketedAtom> for Atom {
    fn from(value: UnbracketedAtom) -> Self {
        Self::Unbracketed(value)
    }
}

impl From<BracketAtom> for Atom {
    fn from(value: BracketAtom) -> Self {
        Self::Bracketed(value)
    }
}

impl Atom {
    /// Returns whether this atom was written as aromatic (lowercase symbol,
    /// or a bracket atom with a lowercase element).
    #[must_use]
    pub fn aromatic(&self) -> bool {
        match self {
            Atom::Unbracketed(unbracketed_atom) => unbracketed_atom.aromatic(),
            Atom::Bracketed(bracket_atom) => bracket_atom.aromatic(),
        }
    }

    /// Returns whether this atom was written inside brackets. Bracket
    /// atoms never receive implicit hydrogens (§4.5) and are never
    /// re-bracketed or de-bracketed during canonical emission unless the
    /// emitted form requires brackets regardless (§4.8).
    #[must_use]
    pub fn is_bracketed(&self) -> bool {
        matches!(self, Atom::Bracketed(_))
    }

    /// Returns the [`AtomSymbol`].
    #[must_use]
    pub fn symbol(&self) -> AtomSymbol {
        match self {
            Atom::Unbracketed(unbracketed_atom) => unbracketed_atom.symbol(),
            Atom::Bracketed(bracket_atom) => bracket_atom.symbol(),
        }
    }

    /// Returns the [`Element`], or `None` for the wildcard.
    #[must_use]
    pub fn element(&self) -> Option<Element> {
        self.symbol().element()
    }

    /// Returns the chirality tag as written, if any.
    #[must_use]
    pub fn chirality(&self) -> Option<Chirality> {
        match self {
            Atom::Unbracketed(_) => None,
            Atom::Bracketed(atom) => atom.chiral(),
        }
    }

    /// Returns the class of the atom (`0` if unspecified or unbracketed).
    #[must_use]
    pub fn class(&self) -> u16 {
        match self {
            Atom::Unbracketed(_) => 0,
            Atom::Bracketed(bracket_atom) => bracket_atom.class(),
        }
    }

    /// Returns the [`Charge`] of the atom.
    #[must_use]
    pub fn charge(&self) -> Charge {
        match self {
            Atom::Unbracketed(_) => Charge::default(),
            Atom::Bracketed(bracket_atom) => bracket_atom.charge(),
        }
    }

    /// Returns the charge value as `i8`.
    #[must_use]
    pub fn charge_value(&self) -> i8 {
        match self {
            Atom::Unbracketed(_) => Charge::default().get(),
            Atom::Bracketed(bracket_atom) => bracket_atom.charge_value(),
        }
    }

    /// Returns the explicit hydrogen count, if present. `None` for
    /// unbracketed atoms (they take implicit hydrogens instead) and for
    /// bracket atoms with no `H` written.
    #[must_use]
    pub fn hydrogen_count(&self) -> Option<u8> {
        match self {
            Atom::Unbracketed(_) => None,
            Atom::Bracketed(bracket_atom) => bracket_atom.hydrogen_count(),
        }
    }

    /// Returns the [`HydrogenCount`] for the atom.
    #[must_use]
    pub fn hydrogens(&self) -> HydrogenCount {
        match self {
            Atom::Unbracketed(_) => HydrogenCount::Unspecified,
            Atom::Bracketed(bracket_atom) => bracket_atom.hydrogens(),
        }
    }

    /// Returns the isotope mass number, if any was written.
    #[must_use]
    pub fn isotope_mass_number(&self) -> Option<u16> {
        match self {
            Atom::Unbracketed(_) => None,
            Atom::Bracketed(bracket_atom) => bracket_atom.isotope_mass_number(),
        }
    }

    /// Returns the [`Isotope`] for the atom.
    ///
    /// # Errors
    /// Returns [`SmilesError::InvalidIsotope`] if the atom has no element
    /// (wildcard), or propagates the `elements_rs` error if an explicit
    /// isotope mass number does not correspond to a known isotope.
    pub fn isotope(&self) -> Result<Isotope, SmilesError> {
        match self {
            Atom::Unbracketed(unbracketed_atom) => {
                let element = unbracketed_atom.element().ok_or(SmilesError::InvalidIsotope)?;
                Ok(element.most_abundant_isotope())
            }
            Atom::Bracketed(bracket_atom) => bracket_atom.isotope(),
        }
    }
}

#[cfg(test)]
mod tests {
    use elements_rs::Element;

    use super::Atom;
    use crate::atom::{atom_symbol::AtomSymbol, bracketed::BracketAtom, unbracketed::UnbracketedAtom};

    #[test]
    fn unbracketed_atom_has_no_chirality_or_class() {
        let atom = Atom::from(UnbracketedAtom::new(AtomSymbol::Element(Element::C), false));
        assert_eq!(atom.chirality(), None);
        assert_eq!(atom.class(), 0);
        assert_eq!(atom.charge_value(), 0);
        assert!(!atom.is_bracketed());
    }

    #[test]
    fn bracketed_atom_forwards_fields() {
        let bracket = BracketAtom::builder().with_symbol(AtomSymbol::Element(Element::N)).with_class(5).build();
        let atom = Atom::from(bracket);
        assert_eq!(atom.class(), 5);
        assert!(atom.is_bracketed());
    }
}
