//! Module for the structure of an atom as a node in a parsed molecular graph.

use smallvec::SmallVec;

use crate::atom::{Atom, bracketed::chirality::Chirality};

/// Coarse hybridization state derived by the enrichment pipeline from bond
/// orders and ring membership. Not parsed from the SMILES string.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Hybridization {
    /// Two sigma bonds, no more than one pi system (e.g. nitrile carbon).
    Sp,
    /// Three sigma bonds or participation in one pi system (alkenes,
    /// aromatic ring atoms, carbonyls).
    Sp2,
    /// Four single bonds, no pi system.
    #[default]
    Sp3,
}

/// An atom together with the mutable state produced by the enrichment
/// passes: perceived aromaticity, ring membership, implicit hydrogen count,
/// hybridization, and (for stereocenters found to have too few
/// distinguishable neighbors) a cleared chirality tag.
///
/// The underlying [`Atom`] is never mutated after parsing; `AtomNode` layers
/// derived, recomputable state on top of it instead of mutating it in
/// place.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomNode {
    /// Unique identifier for each node, dense and assigned in parse order.
    id: usize,
    /// The atom exactly as written.
    atom: Atom,
    /// Aromaticity as decided by the `AromaticityPerceiver`, which may
    /// differ from `atom.aromatic()` (Kekulization demotes a ring written
    /// aromatic that fails the Huckel test; a ring written with alternating
    /// bonds can be promoted).
    aromatic: bool,
    /// Ring ids (indices into the cached `RingInfo`) this atom participates
    /// in. Empty until ring perception has run.
    ring_ids: SmallVec<[usize; 2]>,
    /// Implicit hydrogen count computed by the `HydrogenAssigner`. Always
    /// `0` for bracket atoms, which take their explicit-H count literally.
    implicit_hydrogens: u8,
    /// Hybridization derived from bond orders and ring membership.
    hybridization: Hybridization,
    /// Set to `true` once the `StereoValidator` has determined that this
    /// atom's chirality tag is unobservable (fewer than three
    /// distinguishable neighbors) and must be dropped on emission.
    chirality_cleared: bool,
}

impl AtomNode {
    /// Creates a new node. Perceived state starts at the as-written
    /// defaults and is filled in by the enrichment passes.
    #[must_use]
    pub fn new(atom: Atom, id: usize) -> Self {
        let aromatic = atom.aromatic();
        Self {
            id,
            atom,
            aromatic,
            ring_ids: SmallVec::new(),
            implicit_hydrogens: 0,
            hybridization: Hybridization::default(),
            chirality_cleared: false,
        }
    }

    /// Returns the id.
    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Returns the [`Atom`] as written.
    #[must_use]
    pub fn atom(&self) -> &Atom {
        &self.atom
    }

    /// Returns the perceived aromaticity.
    #[must_use]
    pub fn aromatic(&self) -> bool {
        self.aromatic
    }

    /// Sets the perceived aromaticity. Used by the `AromaticityPerceiver`.
    pub fn set_aromatic(&mut self, aromatic: bool) {
        self.aromatic = aromatic;
    }

    /// Returns the ring ids this atom belongs to.
    #[must_use]
    pub fn ring_ids(&self) -> &[usize] {
        &self.ring_ids
    }

    /// Returns whether this atom belongs to any ring.
    #[must_use]
    pub fn in_ring(&self) -> bool {
        !self.ring_ids.is_empty()
    }

    /// Records ring membership. Used by the `RingAnalyzer`.
    pub fn set_ring_ids(&mut self, ring_ids: SmallVec<[usize; 2]>) {
        self.ring_ids = ring_ids;
    }

    /// Returns the implicit hydrogen count.
    #[must_use]
    pub fn implicit_hydrogens(&self) -> u8 {
        self.implicit_hydrogens
    }

    /// Sets the implicit hydrogen count. Used by the `HydrogenAssigner`.
    pub fn set_implicit_hydrogens(&mut self, count: u8) {
        self.implicit_hydrogens = count;
    }

    /// Returns the total hydrogen count: explicit (bracket atoms) plus
    /// implicit (unbracketed atoms; always `0` for bracket atoms).
    #[must_use]
    pub fn total_hydrogens(&self) -> u8 {
        self.atom.hydrogen_count().unwrap_or(0) + self.implicit_hydrogens
    }

    /// Returns the derived hybridization.
    #[must_use]
    pub fn hybridization(&self) -> Hybridization {
        self.hybridization
    }

    /// Sets the derived hybridization. Used by the `HydrogenAssigner`/`AromaticityPerceiver`.
    pub fn set_hybridization(&mut self, hybridization: Hybridization) {
        self.hybridization = hybridization;
    }

    /// Returns the chirality tag, or `None` if it was never written or has
    /// since been cleared by the `StereoValidator`.
    #[must_use]
    pub fn chirality(&self) -> Option<Chirality> {
        if self.chirality_cleared { None } else { self.atom.chirality() }
    }

    /// Clears the chirality tag. Used by the `StereoValidator` when an
    /// atom has fewer than three distinguishable neighbors.
    pub fn clear_chirality(&mut self) {
        self.chirality_cleared = true;
    }

    /// Returns whether the chirality tag was cleared by validation.
    #[must_use]
    pub fn chirality_cleared(&self) -> bool {
        self.chirality_cleared
    }
}

#[cfg(test)]
mod tests {
    use elements_rs::Element;

    use super::{AtomNode, Hybridization};
    use crate::atom::{Atom, atom_symbol::AtomSymbol, unbracketed::UnbracketedAtom};

    fn carbon_node() -> AtomNode {
        AtomNode::new(Atom::from(UnbracketedAtom::new(AtomSymbol::Element(Element::C), false)), 0)
    }

    #[test]
    fn new_node_starts_with_as_written_aromaticity_and_no_rings() {
        let node = carbon_node();
        assert!(!node.aromatic());
        assert!(!node.in_ring());
        assert_eq!(node.implicit_hydrogens(), 0);
        assert_eq!(node.hybridization(), Hybridization::Sp3);
    }

    #[test]
    fn enrichment_setters_update_state() {
        let mut node = carbon_node();
        node.set_aromatic(true);
        node.set_implicit_hydrogens(3);
        node.set_hybridization(Hybridization::Sp2);
        assert!(node.aromatic());
        assert_eq!(node.implicit_hydrogens(), 3);
        assert_eq!(node.total_hydrogens(), 3);
        assert_eq!(node.hybridization(), Hybridization::Sp2);
    }

    #[test]
    fn clearing_chirality_hides_it_without_touching_the_written_atom() {
        let mut node = carbon_node();
        node.clear_chirality();
        assert!(node.chirality_cleared());
        assert_eq!(node.chirality(), None);
    }
}
