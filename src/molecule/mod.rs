//! The enriched molecular graph: atoms, bonds, and the lazily-computed,
//! cached ring information built on top of them.
pub mod aromaticity;
pub mod hydrogens;
pub mod ring_analyzer;
pub mod ring_info;
pub mod stereo;

use std::cell::RefCell;

use molecular_formulas::MolecularFormula;
use smallvec::SmallVec;

use crate::{
    atom::{Atom, atom_node::AtomNode},
    bond::{Bond, bond_edge::BondEdge},
    molecule::ring_info::RingInfo,
};

/// Caps applied by the ring-dependent enrichment passes. Wraps the
/// `max_len` cap from the cycle enumerator (default `7`) so callers can
/// probe the performance cliff on large polycyclic inputs without touching
/// the algorithm itself.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RingLimits {
    /// Maximum simple-cycle length considered by `all_cycles`/aromaticity
    /// perception.
    max_cycle_len: u8,
}

impl RingLimits {
    /// Returns the cap.
    #[must_use]
    pub fn max_cycle_len(&self) -> u8 {
        self.max_cycle_len
    }
}

impl Default for RingLimits {
    fn default() -> Self {
        Self { max_cycle_len: 7 }
    }
}

/// A parsed molecular graph: one connected-or-not collection of atoms and
/// bonds corresponding to a single dot-separated SMILES component.
///
/// A `Molecule` exclusively owns its atoms and bonds; they have no
/// independent existence outside it. Atoms/bonds are appended by the
/// parser and never removed; the enrichment passes mutate per-atom/bond
/// state in place (see [`AtomNode`], [`BondEdge::set_bond`]) but never
/// change the graph's shape, so the `RingInfo` cache never needs
/// invalidating once computed.
#[derive(Debug)]
pub struct Molecule {
    atoms: Vec<AtomNode>,
    bonds: Vec<BondEdge>,
    /// For each atom id, the `(neighbor_id, bond_index)` pairs touching it.
    adjacency: Vec<SmallVec<[(usize, usize); 4]>>,
    ring_info: RefCell<Option<(u8, RingInfo)>>,
}

impl Molecule {
    /// Creates an empty molecule.
    #[must_use]
    pub fn new() -> Self {
        Self { atoms: Vec::new(), bonds: Vec::new(), adjacency: Vec::new(), ring_info: RefCell::new(None) }
    }

    /// Appends an atom, returning its dense id.
    pub fn push_atom(&mut self, atom: Atom) -> usize {
        let id = self.atoms.len();
        self.atoms.push(AtomNode::new(atom, id));
        self.adjacency.push(SmallVec::new());
        id
    }

    /// Appends a bond between two existing atom ids, returning its index.
    ///
    /// # Panics
    /// Panics if `a == b` (self-loops are never valid SMILES) or if either
    /// id is out of range; both are parser invariants, not user input
    /// errors.
    pub fn push_bond(&mut self, a: usize, b: usize, bond: Bond) -> usize {
        assert_ne!(a, b, "bond endpoints must be distinct atoms");
        let index = self.bonds.len();
        self.bonds.push(BondEdge::new(a, b, bond));
        self.adjacency[a].push((b, index));
        self.adjacency[b].push((a, index));
        index
    }

    /// Returns the atoms.
    #[must_use]
    pub fn atoms(&self) -> &[AtomNode] {
        &self.atoms
    }

    /// Returns the atoms, mutably, for use by the enrichment passes.
    pub fn atoms_mut(&mut self) -> &mut [AtomNode] {
        &mut self.atoms
    }

    /// Returns the bonds.
    #[must_use]
    pub fn bonds(&self) -> &[BondEdge] {
        &self.bonds
    }

    /// Returns the bonds, mutably, for use by the enrichment passes.
    pub fn bonds_mut(&mut self) -> &mut [BondEdge] {
        &mut self.bonds
    }

    /// Returns the atom with the given id.
    #[must_use]
    pub fn atom(&self, id: usize) -> &AtomNode {
        &self.atoms[id]
    }

    /// Returns the number of atoms.
    #[must_use]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Returns the number of bonds.
    #[must_use]
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// Returns the `(neighbor_id, bond_index)` pairs touching `atom_id`.
    #[must_use]
    pub fn neighbors(&self, atom_id: usize) -> &[(usize, usize)] {
        &self.adjacency[atom_id]
    }

    /// Returns the degree (bond count) of `atom_id`.
    #[must_use]
    pub fn degree(&self, atom_id: usize) -> usize {
        self.adjacency[atom_id].len()
    }

    /// Returns the bond index connecting `a` and `b`, if any.
    #[must_use]
    pub fn bond_between(&self, a: usize, b: usize) -> Option<usize> {
        self.adjacency[a].iter().find(|(neighbor, _)| *neighbor == b).map(|(_, idx)| *idx)
    }

    /// Returns the number of connected components (isolated atoms count as
    /// their own component).
    #[must_use]
    pub fn component_count(&self) -> usize {
        let n = self.atoms.len();
        if n == 0 {
            return 0;
        }
        let mut seen = vec![false; n];
        let mut components = 0;
        for start in 0..n {
            if seen[start] {
                continue;
            }
            components += 1;
            let mut stack = vec![start];
            seen[start] = true;
            while let Some(current) = stack.pop() {
                for &(neighbor, _) in self.neighbors(current) {
                    if !seen[neighbor] {
                        seen[neighbor] = true;
                        stack.push(neighbor);
                    }
                }
            }
        }
        components
    }

    /// Returns the cyclomatic number (`bonds - atoms + components`), the
    /// size the SSSR must have.
    #[must_use]
    pub fn cyclomatic_number(&self) -> usize {
        let components = self.component_count();
        (self.bond_count() + components).saturating_sub(self.atom_count())
    }

    /// Returns the cached [`RingInfo`], computing it with `limits` on first
    /// demand (or if previously cached with a different cap). Early-exits
    /// without running the cycle enumerator when the molecule has no ring
    /// at all (cyclomatic number zero).
    pub fn ring_info(&self, limits: RingLimits) -> std::cell::Ref<'_, RingInfo> {
        let needs_recompute = match &*self.ring_info.borrow() {
            Some((cached_cap, _)) => *cached_cap != limits.max_cycle_len(),
            None => true,
        };
        if needs_recompute {
            let info = if self.cyclomatic_number() == 0 {
                RingInfo::default()
            } else {
                ring_analyzer::analyze(self, limits.max_cycle_len())
            };
            *self.ring_info.borrow_mut() = Some((limits.max_cycle_len(), info));
        }
        std::cell::Ref::map(self.ring_info.borrow(), |cache| &cache.as_ref().unwrap().1)
    }

    /// Computes the Hill-notation molecular formula from the enriched atom
    /// list (element counts plus implicit/explicit hydrogens).
    #[must_use]
    pub fn formula(&self) -> String {
        let mut counts: hashbrown::HashMap<elements_rs::Element, u32> = hashbrown::HashMap::new();
        for node in &self.atoms {
            if let Some(element) = node.atom().element() {
                *counts.entry(element).or_insert(0) += 1;
            }
            let hydrogens = u32::from(node.total_hydrogens());
            if hydrogens > 0 {
                *counts.entry(elements_rs::Element::H).or_insert(0) += hydrogens;
            }
        }
        let formula: MolecularFormula = counts.into_iter().collect();
        formula.to_string()
    }
}

impl Default for Molecule {
    fn default() -> Self {
        Self::new()
    }
}
