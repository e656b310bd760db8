//! Cycle enumeration and SSSR construction over a [`Molecule`].
//!
//! `all_cycles` is a capped DFS that deduplicates by sorted atom-id array
//! (never by string key, which would make dedup an allocation-heavy
//! string-comparison bottleneck on fused polycyclic inputs). `sssr` builds
//! a minimum cycle basis from per-vertex BFS shortest-path trees (Horton's
//! construction), selecting a linearly independent subset via Gaussian
//! elimination over GF(2) on edge-index bitsets.

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::molecule::{Molecule, RingLimits, ring_info::RingInfo};

/// Enumerates every simple cycle of length `3..=max_len` in `molecule`.
#[must_use]
pub fn all_cycles(molecule: &Molecule, max_len: u8) -> Vec<crate::molecule::ring_info::Ring> {
    let max_len = max_len as usize;
    let n = molecule.atom_count();
    let mut seen: HashSet<Vec<usize>> = HashSet::new();
    let mut cycles = Vec::new();

    for start in 0..n {
        let mut visited = vec![false; n];
        visited[start] = true;
        let mut path = vec![start];
        dfs_cycles(molecule, start, start, max_len, &mut visited, &mut path, &mut seen, &mut cycles);
    }
    cycles
}

#[allow(clippy::too_many_arguments)]
fn dfs_cycles(
    molecule: &Molecule,
    start: usize,
    current: usize,
    max_len: usize,
    visited: &mut [bool],
    path: &mut Vec<usize>,
    seen: &mut HashSet<Vec<usize>>,
    cycles: &mut Vec<crate::molecule::ring_info::Ring>,
) {
    if path.len() > max_len {
        return;
    }
    for &(neighbor, _edge) in molecule.neighbors(current) {
        if neighbor == start {
            if path.len() >= 3 && path[1] < path[path.len() - 1] {
                let mut key = path.clone();
                key.sort_unstable();
                if seen.insert(key) {
                    cycles.push(crate::molecule::ring_info::Ring::new(path.clone()));
                }
            }
            continue;
        }
        if !visited[neighbor] && neighbor > start && path.len() < max_len {
            visited[neighbor] = true;
            path.push(neighbor);
            dfs_cycles(molecule, start, neighbor, max_len, visited, path, seen, cycles);
            path.pop();
            visited[neighbor] = false;
        }
    }
}

/// Builds the ring-id sequence for the tree path from `root` to `target`
/// using `parent`, root first.
fn path_from_root(parent: &[Option<usize>], root: usize, target: usize) -> Vec<usize> {
    let mut rev = vec![target];
    let mut current = target;
    while current != root {
        let p = parent[current].expect("node reached by BFS has a parent unless it is the root");
        rev.push(p);
        current = p;
    }
    rev.reverse();
    rev
}

/// Generates Horton candidate cycles: for each root, a BFS tree plus every
/// non-tree edge whose two tree paths from the root meet only at the root.
fn horton_candidates(molecule: &Molecule, max_len: usize) -> Vec<crate::molecule::ring_info::Ring> {
    let n = molecule.atom_count();
    let mut candidates = Vec::new();

    for root in 0..n {
        let mut dist = vec![usize::MAX; n];
        let mut parent: Vec<Option<usize>> = vec![None; n];
        dist[root] = 0;
        let mut queue = std::collections::VecDeque::new();
        queue.push_back(root);
        while let Some(current) = queue.pop_front() {
            for &(neighbor, _edge) in molecule.neighbors(current) {
                if dist[neighbor] == usize::MAX {
                    dist[neighbor] = dist[current] + 1;
                    parent[neighbor] = Some(current);
                    queue.push_back(neighbor);
                }
            }
        }

        for bond_idx in 0..molecule.bond_count() {
            let (x, y) = molecule.bonds()[bond_idx].vertices();
            if dist[x] == usize::MAX || dist[y] == usize::MAX {
                continue;
            }
            if parent[x] == Some(y) || parent[y] == Some(x) {
                continue; // tree edge itself
            }
            let len = dist[x] + dist[y] + 1;
            if len < 3 || len > max_len {
                continue;
            }
            let path_x = path_from_root(&parent, root, x);
            let path_y = path_from_root(&parent, root, y);
            // Valid Horton candidate only if the two root-paths share no
            // vertex besides the root.
            let set_x: HashSet<usize> = path_x[1..].iter().copied().collect();
            if path_y[1..].iter().any(|v| set_x.contains(v)) {
                continue;
            }
            let mut atoms = path_x;
            atoms.extend(path_y.into_iter().skip(1).rev());
            candidates.push(crate::molecule::ring_info::Ring::new(atoms));
        }
    }
    candidates
}

fn edge_bitset(molecule: &Molecule, ring: &crate::molecule::ring_info::Ring) -> Option<Vec<bool>> {
    let mut bits = vec![false; molecule.bond_count()];
    for (a, b) in ring.edges() {
        let idx = molecule.bond_between(a, b)?;
        bits[idx] = true;
    }
    Some(bits)
}

fn xor_into(target: &mut [bool], other: &[bool]) {
    for (t, o) in target.iter_mut().zip(other) {
        *t ^= *o;
    }
}

/// Computes the SSSR via Horton's minimum-cycle-basis construction.
/// Candidate cycles are sorted by `(length, lexicographically-smallest
/// atom-id sequence)` and greedily accepted when linearly independent of
/// the rings already chosen (Gaussian elimination over GF(2) on
/// edge-index bitsets), stopping once `cyclomatic_number` rings are found.
#[must_use]
pub fn sssr(molecule: &Molecule, max_len: u8) -> Vec<crate::molecule::ring_info::Ring> {
    let target = molecule.cyclomatic_number();
    if target == 0 {
        return Vec::new();
    }

    // Horton's construction needs candidates up to twice the cap to cover
    // the larger rings a small max_len would otherwise hide from SSSR; SSSR
    // size is a structural invariant independent of the aromaticity cap.
    let search_cap = (max_len as usize).max(molecule.atom_count()).max(3);
    let mut candidates = horton_candidates(molecule, search_cap);
    candidates.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.atoms().cmp(b.atoms())));

    let mut basis: HashMap<usize, Vec<bool>> = HashMap::new();
    let mut chosen = Vec::new();
    let mut dedup: HashSet<Vec<usize>> = HashSet::new();

    for ring in candidates {
        if chosen.len() >= target {
            break;
        }
        let mut key = ring.atoms().to_vec();
        key.sort_unstable();
        if !dedup.insert(key) {
            continue;
        }
        let Some(bits) = edge_bitset(molecule, &ring) else { continue };
        if let Some(pivot) = reduce(bits, &basis) {
            let pivot_index = pivot.iter().position(|&b| b).expect("reduced vector is non-zero");
            basis.insert(pivot_index, pivot);
            chosen.push(ring);
        }
    }
    chosen
}

/// Reduces `candidate` against `basis` (keyed by pivot bit index); returns
/// `None` if the candidate is linearly dependent (reduces to zero), or the
/// reduced, independent vector otherwise.
fn reduce(mut candidate: Vec<bool>, basis: &HashMap<usize, Vec<bool>>) -> Option<Vec<bool>> {
    loop {
        let Some(pivot) = candidate.iter().position(|&b| b) else {
            return None;
        };
        match basis.get(&pivot) {
            Some(row) => xor_into(&mut candidate, row),
            None => return Some(candidate),
        }
    }
}

/// Runs the full ring analysis (`all_cycles` + `sssr`) for `molecule`
/// capped at `max_len`, used by [`Molecule::ring_info`].
#[must_use]
pub fn analyze(molecule: &Molecule, max_len: u8) -> RingInfo {
    let cycles = all_cycles(molecule, max_len);
    let sssr = sssr(molecule, max_len);
    RingInfo::new(sssr, cycles)
}

/// Records on every atom which SSSR rings (by index into
/// [`RingInfo::sssr`]) it belongs to. An acyclic molecule leaves every
/// atom's ring-id list empty, the default it already starts at.
pub fn mark_ring_membership(molecule: &mut Molecule, limits: RingLimits) {
    let mut ring_ids: Vec<SmallVec<[usize; 2]>> = vec![SmallVec::new(); molecule.atom_count()];
    {
        let info = molecule.ring_info(limits);
        for (ring_index, ring) in info.sssr().iter().enumerate() {
            for &atom_id in ring.atoms() {
                ring_ids[atom_id].push(ring_index);
            }
        }
    }
    for (atom_id, ids) in ring_ids.into_iter().enumerate() {
        molecule.atoms_mut()[atom_id].set_ring_ids(ids);
    }
}

#[cfg(test)]
mod tests {
    use elements_rs::Element;

    use super::{all_cycles, mark_ring_membership, sssr};
    use crate::{
        atom::{Atom, atom_symbol::AtomSymbol, unbracketed::UnbracketedAtom},
        bond::Bond,
        molecule::{Molecule, RingLimits},
    };

    fn carbon() -> Atom {
        Atom::from(UnbracketedAtom::new(AtomSymbol::Element(Element::C), false))
    }

    fn ring_molecule(size: usize) -> Molecule {
        let mut mol = Molecule::new();
        let ids: Vec<usize> = (0..size).map(|_| mol.push_atom(carbon())).collect();
        for i in 0..size {
            mol.push_bond(ids[i], ids[(i + 1) % size], Bond::Single);
        }
        mol
    }

    #[test]
    fn all_cycles_finds_single_hexagon() {
        let mol = ring_molecule(6);
        let cycles = all_cycles(&mol, 7);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), 6);
    }

    #[test]
    fn all_cycles_respects_length_cap() {
        let mol = ring_molecule(8);
        let cycles = all_cycles(&mol, 7);
        assert!(cycles.is_empty());
    }

    #[test]
    fn sssr_size_matches_cyclomatic_number_for_hexagon() {
        let mol = ring_molecule(6);
        assert_eq!(sssr(&mol, 7).len(), mol.cyclomatic_number());
        assert_eq!(mol.cyclomatic_number(), 1);
    }

    #[test]
    fn sssr_finds_two_rings_in_fused_bicyclic_system() {
        // Two fused hexagons sharing one bond (naphthalene skeleton, 10 atoms).
        let mut mol = Molecule::new();
        let ids: Vec<usize> = (0..10).map(|_| mol.push_atom(carbon())).collect();
        let ring_a = [0, 1, 2, 3, 4, 5];
        let ring_b = [4, 5, 6, 7, 8, 9];
        for window in ring_a.windows(2) {
            mol.push_bond(window[0], window[1], Bond::Single);
        }
        mol.push_bond(5, 0, Bond::Single);
        for window in ring_b.windows(2) {
            if window != [4, 5] {
                mol.push_bond(window[0], window[1], Bond::Single);
            }
        }
        mol.push_bond(9, 4, Bond::Single);

        assert_eq!(mol.cyclomatic_number(), 2);
        let rings = sssr(&mol, 7);
        assert_eq!(rings.len(), 2);
    }

    #[test]
    fn sssr_is_empty_for_acyclic_molecule() {
        let mut mol = Molecule::new();
        let a = mol.push_atom(carbon());
        let b = mol.push_atom(carbon());
        mol.push_bond(a, b, Bond::Single);
        assert!(sssr(&mol, 7).is_empty());
    }

    #[test]
    fn mark_ring_membership_records_the_sssr_index_on_each_ring_atom() {
        let mut mol = ring_molecule(6);
        mark_ring_membership(&mut mol, RingLimits::default());
        for id in 0..mol.atom_count() {
            assert_eq!(mol.atom(id).ring_ids(), &[0]);
            assert!(mol.atom(id).in_ring());
        }
    }

    #[test]
    fn mark_ring_membership_leaves_acyclic_atoms_untouched() {
        let mut mol = Molecule::new();
        let a = mol.push_atom(carbon());
        let b = mol.push_atom(carbon());
        mol.push_bond(a, b, Bond::Single);

        mark_ring_membership(&mut mol, RingLimits::default());

        assert!(!mol.atom(a).in_ring());
        assert!(!mol.atom(b).in_ring());
    }

    #[test]
    fn mark_ring_membership_records_both_ring_indices_for_a_fused_bridgehead() {
        let mut mol = Molecule::new();
        let ids: Vec<usize> = (0..10).map(|_| mol.push_atom(carbon())).collect();
        let ring_a = [0, 1, 2, 3, 4, 5];
        let ring_b = [4, 5, 6, 7, 8, 9];
        for window in ring_a.windows(2) {
            mol.push_bond(ids[window[0]], ids[window[1]], Bond::Single);
        }
        mol.push_bond(ids[5], ids[0], Bond::Single);
        for window in ring_b.windows(2) {
            if window != [4, 5] {
                mol.push_bond(ids[window[0]], ids[window[1]], Bond::Single);
            }
        }
        mol.push_bond(ids[9], ids[4], Bond::Single);

        mark_ring_membership(&mut mol, RingLimits::default());

        assert_eq!(mol.atom(ids[4]).ring_ids().len(), 2);
        assert_eq!(mol.atom(ids[5]).ring_ids().len(), 2);
        assert_eq!(mol.atom(ids[0]).ring_ids().len(), 1);
    }
}
