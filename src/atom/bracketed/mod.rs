//! Module for the structures describing an atom found in brackets: `[]`.
pub mod charge;
pub mod chirality;
pub mod hydrogen_count;

use elements_rs::{Element, Isotope};

use crate::{
    atom::{atom_symbol::AtomSymbol, bracketed::{charge::Charge, chirality::Chirality, hydrogen_count::HydrogenCount}},
    errors::SmilesError,
};

#[derive(Copy, Debug, PartialEq, Clone, Eq, Hash)]
/// An atom written inside `[...]`, carrying the element plus whatever
/// optional metadata was specified: isotope, chirality, explicit hydrogen
/// count, formal charge, and atom class.
pub struct BracketAtom {
    /// The parsed symbol.
    symbol: AtomSymbol,
    /// Parsed isotope mass-number value, if any.
    isotope_mass_number: Option<u16>,
    /// Whether the bracket element was written lowercase.
    aromatic: bool,
    /// The number of hydrogens explicitly listed, or `Unspecified` (no `H`
    /// written at all, which means exactly zero).
    hydrogens: HydrogenCount,
    /// The formal charge of the atom; default is `0`.
    charge: Charge,
    /// Atom-class integer from `:n`; default `0`.
    class: u16,
    /// Chirality tag, if present.
    chiral: Option<Chirality>,
}

impl BracketAtom {
    /// Returns a builder for `BracketAtom`.
    #[must_use]
    pub fn builder() -> BracketAtomBuilder {
        BracketAtomBuilder {
            bracket_atom: Self {
                symbol: AtomSymbol::default(),
                aromatic: false,
                isotope_mass_number: None,
                hydrogens: HydrogenCount::Unspecified,
                charge: Charge::default(),
                class: 0,
                chiral: None,
            },
        }
    }

    /// Returns the [`Element`], or `None` for wildcard/unspecified.
    #[must_use]
    pub fn element(&self) -> Option<Element> {
        self.symbol.element()
    }

    /// Returns the [`AtomSymbol`].
    #[must_use]
    pub fn symbol(&self) -> AtomSymbol {
        self.symbol
    }

    /// Returns the isotope mass number, if specified.
    #[must_use]
    pub fn isotope_mass_number(&self) -> Option<u16> {
        self.isotope_mass_number
    }

    /// Returns the [`Isotope`] for this atom's element.
    ///
    /// # Errors
    /// Returns [`SmilesError::InvalidIsotope`] if there is no element, or
    /// propagates the `elements_rs` error if the requested mass number is
    /// not a known isotope of the element.
    pub fn isotope(&self) -> Result<Isotope, SmilesError> {
        let element = self.element().ok_or(SmilesError::InvalidIsotope)?;
        let isotope = match self.isotope_mass_number() {
            None => element.most_abundant_isotope(),
            Some(mass) => Isotope::try_from((element, mass))?,
        };
        Ok(isotope)
    }

    /// Returns whether the atom was written lowercase.
    #[must_use]
    pub fn aromatic(&self) -> bool {
        self.aromatic
    }

    /// Returns the [`HydrogenCount`].
    #[must_use]
    pub fn hydrogens(&self) -> HydrogenCount {
        self.hydrogens
    }

    /// Returns the explicit hydrogen count, or `None` if unspecified
    /// (callers treat unspecified as zero).
    #[must_use]
    pub fn hydrogen_count(&self) -> Option<u8> {
        self.hydrogens.get_count()
    }

    /// Returns the [`Charge`].
    #[must_use]
    pub fn charge(&self) -> Charge {
        self.charge
    }

    /// Returns the charge value as `i8`.
    #[must_use]
    pub fn charge_value(&self) -> i8 {
        self.charge.get()
    }

    /// Returns the atom class (default `0`).
    #[must_use]
    pub fn class(&self) -> u16 {
        self.class
    }

    /// Returns the [`Chirality`], if any.
    #[must_use]
    pub fn chiral(&self) -> Option<Chirality> {
        self.chiral
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
/// Builder for [`BracketAtom`], mutable until [`BracketAtomBuilder::build`]
/// is called.
pub struct BracketAtomBuilder {
    bracket_atom: BracketAtom,
}

impl BracketAtomBuilder {
    /// Sets the isotope mass number.
    #[must_use]
    pub fn with_isotope(mut self, iso: u16) -> Self {
        self.bracket_atom.isotope_mass_number = Some(iso);
        self
    }

    /// Sets the [`AtomSymbol`].
    #[must_use]
    pub fn with_symbol(mut self, symbol: AtomSymbol) -> Self {
        self.bracket_atom.symbol = symbol;
        self
    }

    /// Sets whether the atom was written lowercase.
    #[must_use]
    pub fn with_aromatic(mut self, aromatic: bool) -> Self {
        self.bracket_atom.aromatic = aromatic;
        self
    }

    /// Sets the [`HydrogenCount`].
    #[must_use]
    pub fn with_hydrogens(mut self, h_count: HydrogenCount) -> Self {
        self.bracket_atom.hydrogens = h_count;
        self
    }

    /// Sets the [`Charge`].
    #[must_use]
    pub fn with_charge(mut self, charge: Charge) -> Self {
        self.bracket_atom.charge = charge;
        self
    }

    /// Sets the atom class.
    #[must_use]
    pub fn with_class(mut self, class: u16) -> Self {
        self.bracket_atom.class = class;
        self
    }

    /// Sets the [`Chirality`].
    #[must_use]
    pub fn with_chiral(mut self, chiral: Chirality) -> Self {
        self.bracket_atom.chiral = Some(chiral);
        self
    }

    /// Returns the [`Element`] set so far.
    #[must_use]
    pub fn element(&self) -> Option<Element> {
        self.bracket_atom.element()
    }

    /// Returns the [`AtomSymbol`] set so far.
    #[must_use]
    pub fn symbol(&self) -> AtomSymbol {
        self.bracket_atom.symbol
    }

    /// Consumes the builder, returning the completed [`BracketAtom`].
    #[must_use]
    pub fn build(self) -> BracketAtom {
        self.bracket_atom
    }
}

#[cfg(test)]
mod tests {
    use elements_rs::Element;

    use super::{BracketAtom, Charge, Chirality, HydrogenCount};
    use crate::atom::atom_symbol::AtomSymbol;

    #[test]
    fn builder_round_trips_all_fields() {
        let atom = BracketAtom::builder()
            .with_symbol(AtomSymbol::Element(Element::C))
            .with_isotope(13)
            .with_hydrogens(HydrogenCount::new(Some(1)))
            .with_charge(Charge::try_new(-1).unwrap())
            .with_class(2)
            .with_chiral(Chirality::At)
            .build();

        assert_eq!(atom.element(), Some(Element::C));
        assert_eq!(atom.isotope_mass_number(), Some(13));
        assert_eq!(atom.hydrogen_count(), Some(1));
        assert_eq!(atom.charge_value(), -1);
        assert_eq!(atom.class(), 2);
        assert_eq!(atom.chiral(), Some(Chirality::At));
    }

    #[test]
    fn default_bracket_atom_is_unaromatic_and_neutral() {
        let atom = BracketAtom::builder().with_symbol(AtomSymbol::Element(Element::O)).build();
        assert!(!atom.aromatic());
        assert_eq!(atom.charge_value(), 0);
        assert_eq!(atom.hydrogen_count(), None);
    }
}
