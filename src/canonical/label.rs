//! Iterative canonical-label refinement (a Morgan-style algorithm):
//! computes a dense equivalence-class id per atom such that two atoms
//! share a class only if every invariant considered, to a fixed point,
//! agrees between them.

use crate::molecule::{Molecule, RingLimits};

/// The per-atom invariant considered before any neighbor information is
/// folded in: (degree, element-identity proxy, aromatic, isotope, charge
/// magnitude, implicit H count), matching the tuple named in §4.7.
type InitialInvariant = (usize, u32, bool, u16, u8, u8);

fn initial_invariant(molecule: &Molecule, atom_id: usize) -> InitialInvariant {
    let node = molecule.atom(atom_id);
    let atom = node.atom();
    let element_proxy = atom.element().map_or(0, |e| e as u32 + 1);
    (
        molecule.degree(atom_id),
        element_proxy,
        node.aromatic(),
        atom.isotope_mass_number().unwrap_or(0),
        atom.charge_value().unsigned_abs(),
        node.total_hydrogens(),
    )
}

/// Assigns dense ranks `0..K` to `values` by sorted order, with equal
/// values receiving the same rank.
fn compress<T: Ord + Clone>(values: &[T]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].cmp(&values[b]));

    let mut classes = vec![0usize; values.len()];
    let mut current = 0;
    for window in order.windows(2) {
        let (prev, next) = (window[0], window[1]);
        if values[next] != values[prev] {
            current += 1;
        }
        classes[next] = current;
    }
    if let Some(&first) = order.first() {
        classes[first] = 0;
    }
    classes
}

fn distinct_count(classes: &[usize]) -> usize {
    classes.iter().copied().max().map_or(0, |m| m + 1)
}

/// Runs iterative invariant refinement to a fixed point (or an 8-round
/// cap, whichever comes first) and returns the resulting per-atom class
/// id. Atoms sharing a class id are symmetry-equivalent under every
/// invariant considered.
#[must_use]
pub fn refine(molecule: &Molecule) -> Vec<usize> {
    let n = molecule.atom_count();
    if n == 0 {
        return Vec::new();
    }

    let initial: Vec<InitialInvariant> = (0..n).map(|id| initial_invariant(molecule, id)).collect();
    let mut classes = compress(&initial);

    for _ in 0..n.max(8) {
        let signatures: Vec<(usize, Vec<(u8, usize)>)> = (0..n)
            .map(|atom_id| {
                let mut neighbor_sig: Vec<(u8, usize)> = molecule
                    .neighbors(atom_id)
                    .iter()
                    .map(|&(neighbor, edge)| (molecule.bonds()[edge].bond().doubled_order(), classes[neighbor]))
                    .collect();
                neighbor_sig.sort_unstable();
                (classes[atom_id], neighbor_sig)
            })
            .collect();

        let before = distinct_count(&classes);
        classes = compress(&signatures);
        if distinct_count(&classes) == before {
            break;
        }
    }
    classes
}

/// Picks the deterministic DFS root per §4.7: the atom minimizing
/// lexicographically `(rank, heteroatom?, terminal?, degree, |charge|, H
/// count, atom id)`.
///
/// # Panics
/// Panics if `molecule` has no atoms.
#[must_use]
pub fn choose_root(molecule: &Molecule, rank: &[usize]) -> usize {
    (0..molecule.atom_count())
        .min_by_key(|&id| {
            let node = molecule.atom(id);
            let atom = node.atom();
            let is_heteroatom = !matches!(atom.element(), Some(elements_rs::Element::C));
            let is_terminal = molecule.degree(id) == 1;
            (
                rank[id],
                u8::from(!is_heteroatom),
                u8::from(!is_terminal),
                molecule.degree(id),
                atom.charge_value().unsigned_abs(),
                node.total_hydrogens(),
                id,
            )
        })
        .expect("molecule has at least one atom")
}

/// Returns the ring limits used when canonical labeling needs ring
/// membership as part of an invariant (kept separate from `refine` so
/// callers that have already computed `RingInfo` don't pay for it twice).
#[must_use]
pub fn default_ring_limits() -> RingLimits {
    RingLimits::default()
}
