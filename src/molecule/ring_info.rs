//! Ring data produced by the [`crate::molecule::ring_analyzer`].

use hashbrown::HashSet;

/// A single ring: an ordered cyclic sequence of atom ids as discovered by
/// the ring-closing traversal. `atoms[0]` and `atoms[len-1]` are bonded,
/// closing the cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ring {
    atoms: Vec<usize>,
}

impl Ring {
    /// Creates a ring from an ordered cyclic atom-id sequence.
    #[must_use]
    pub fn new(atoms: Vec<usize>) -> Self {
        Self { atoms }
    }

    /// Returns the atom ids in cyclic order.
    #[must_use]
    pub fn atoms(&self) -> &[usize] {
        &self.atoms
    }

    /// Returns the ring size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Returns whether the ring has no atoms (never constructed in
    /// practice, provided for clippy's `len_without_is_empty`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Returns whether `atom_id` is a member of this ring.
    #[must_use]
    pub fn contains(&self, atom_id: usize) -> bool {
        self.atoms.contains(&atom_id)
    }

    /// Returns the ring's bonds as adjacent atom-id pairs, including the
    /// closing pair `(last, first)`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.atoms.len()).map(move |i| (self.atoms[i], self.atoms[(i + 1) % self.atoms.len()]))
    }

    /// Returns the atom ids as a set, for membership/overlap tests.
    #[must_use]
    pub fn atom_set(&self) -> HashSet<usize> {
        self.atoms.iter().copied().collect()
    }
}

/// The topological relationship between two rings, per `classify`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RingRelation {
    /// No atoms in common.
    Isolated,
    /// Exactly one atom in common, no bonds in common.
    Spiro,
    /// At least one bond in common.
    Fused,
    /// Two or more atoms in common but no shared bond (e.g. norbornane's
    /// bridgehead carbons).
    Bridged,
}

/// Ring perception results for a [`crate::molecule::Molecule`], cached on
/// the molecule and computed lazily.
#[derive(Debug, Clone, Default)]
pub struct RingInfo {
    /// Smallest set of smallest rings; size equals the cyclomatic number.
    sssr: Vec<Ring>,
    /// Every simple cycle with length <= the cap used to compute this
    /// `RingInfo`.
    all_cycles: Vec<Ring>,
}

impl RingInfo {
    /// Builds a `RingInfo` from already-computed ring lists.
    #[must_use]
    pub fn new(sssr: Vec<Ring>, all_cycles: Vec<Ring>) -> Self {
        Self { sssr, all_cycles }
    }

    /// Returns the SSSR.
    #[must_use]
    pub fn sssr(&self) -> &[Ring] {
        &self.sssr
    }

    /// Returns every enumerated simple cycle (bounded by the configured cap).
    #[must_use]
    pub fn all_cycles(&self) -> &[Ring] {
        &self.all_cycles
    }

    /// Returns the set of all atom ids that belong to any SSSR ring.
    #[must_use]
    pub fn ring_atoms(&self) -> HashSet<usize> {
        self.sssr.iter().flat_map(|ring| ring.atoms().iter().copied()).collect()
    }

    /// Returns whether any ring was found.
    #[must_use]
    pub fn is_acyclic(&self) -> bool {
        self.sssr.is_empty()
    }

    /// Classifies the topological relationship between two rings.
    #[must_use]
    pub fn classify(ring_a: &Ring, ring_b: &Ring) -> RingRelation {
        let atoms_a = ring_a.atom_set();
        let atoms_b = ring_b.atom_set();
        let shared_atoms: HashSet<usize> = atoms_a.intersection(&atoms_b).copied().collect();

        if shared_atoms.is_empty() {
            return RingRelation::Isolated;
        }

        let edges_a: HashSet<(usize, usize)> = ring_a.edges().map(normalize_edge).collect();
        let shared_bonds = ring_b.edges().map(normalize_edge).filter(|e| edges_a.contains(e)).count();

        if shared_bonds > 0 {
            RingRelation::Fused
        } else if shared_atoms.len() == 1 {
            RingRelation::Spiro
        } else {
            RingRelation::Bridged
        }
    }
}

fn normalize_edge((a, b): (usize, usize)) -> (usize, usize) {
    if a < b { (a, b) } else { (b, a) }
}
