//! Hückel aromaticity perception with a Kekulization fallback for rings
//! written aromatic that do not satisfy Hückel's rule.

use crate::{
    bond::Bond,
    errors::Diagnostic,
    molecule::{Molecule, RingLimits, ring_info::Ring},
};

/// Runs aromaticity perception over every candidate ring (size 3-7) of
/// `molecule`, mutating atom/bond aromatic flags in place. `atom_offsets`
/// supplies the source byte offset of each atom id, used only to locate
/// emitted diagnostics; pass a zero-filled slice when offsets are not
/// available (e.g. a molecule built outside the parser). Returns the
/// warnings raised by failed Kekulization attempts.
///
/// Early exit: a molecule with no rings does no work at all (§4.4).
#[must_use]
pub fn perceive(molecule: &mut Molecule, limits: RingLimits, atom_offsets: &[usize]) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    if molecule.ring_info(limits).is_acyclic() {
        return diagnostics;
    }

    let rings: Vec<Ring> =
        molecule.ring_info(limits).all_cycles().iter().filter(|ring| (3..=7).contains(&ring.len())).cloned().collect();

    for ring in &rings {
        if huckel_sum(molecule, ring).is_some_and(is_huckel_count) {
            mark_aromatic(molecule, ring);
            continue;
        }

        if !ring_is_written_aromatic(molecule, ring) {
            continue;
        }

        match try_kekulize(molecule, ring) {
            Some(assignment) => apply_kekulization(molecule, ring, &assignment),
            None => {
                let offset = atom_offsets.get(ring.atoms()[0]).copied().unwrap_or(0);
                diagnostics.push(Diagnostic::warning(
                    format!("ring of size {} failed Huckel and has no valid Kekule structure; left non-aromatic", ring.len()),
                    offset,
                ));
                clear_ring(molecule, ring);
            }
        }
    }
    diagnostics
}

fn mark_aromatic(molecule: &mut Molecule, ring: &Ring) {
    for &atom_id in ring.atoms() {
        molecule.atoms_mut()[atom_id].set_aromatic(true);
    }
    for (a, b) in ring.edges() {
        if let Some(idx) = molecule.bond_between(a, b) {
            molecule.bonds_mut()[idx].set_bond(Bond::Aromatic);
        }
    }
}

fn clear_ring(molecule: &mut Molecule, ring: &Ring) {
    for &atom_id in ring.atoms() {
        molecule.atoms_mut()[atom_id].set_aromatic(false);
    }
    for (a, b) in ring.edges() {
        if let Some(idx) = molecule.bond_between(a, b)
            && *molecule.bonds()[idx].bond() == Bond::Aromatic
        {
            molecule.bonds_mut()[idx].set_bond(Bond::Single);
        }
    }
}

fn ring_is_written_aromatic(molecule: &Molecule, ring: &Ring) -> bool {
    ring.edges().all(|(a, b)| molecule.bond_between(a, b).is_some_and(|idx| *molecule.bonds()[idx].bond() == Bond::Aromatic))
}

/// Sums the per-atom pi-electron contribution for `ring`, or `None` if any
/// atom in the ring is ineligible (sp3 with no lone pair and no
/// double-bond participation, step 1 of §4.4).
fn huckel_sum(molecule: &Molecule, ring: &Ring) -> Option<u32> {
    ring.atoms().iter().map(|&id| pi_contribution(molecule, ring, id)).sum::<Option<u32>>()
}

fn is_huckel_count(sum: u32) -> bool {
    sum >= 2 && (sum - 2) % 4 == 0
}

fn has_exocyclic_double(molecule: &Molecule, ring: &Ring, atom_id: usize) -> bool {
    molecule
        .neighbors(atom_id)
        .iter()
        .any(|&(neighbor, edge)| !ring.contains(neighbor) && *molecule.bonds()[edge].bond() == Bond::Double)
}

fn has_in_ring_double(molecule: &Molecule, ring: &Ring, atom_id: usize) -> bool {
    molecule
        .neighbors(atom_id)
        .iter()
        .any(|&(neighbor, edge)| ring.contains(neighbor) && *molecule.bonds()[edge].bond() == Bond::Double)
}

/// Per-atom pi-electron count, following the rules enumerated in §4.4 step 2.
fn pi_contribution(molecule: &Molecule, ring: &Ring, atom_id: usize) -> Option<u32> {
    use elements_rs::Element;

    let node = molecule.atom(atom_id);
    let atom = node.atom();
    let element = atom.element()?;
    let charge = atom.charge_value();
    let explicit_h = atom.hydrogen_count().unwrap_or(0);

    if has_exocyclic_double(molecule, ring, atom_id) && element == Element::C {
        return Some(0);
    }
    if has_in_ring_double(molecule, ring, atom_id) {
        return Some(1);
    }

    match element {
        Element::C if charge > 0 => Some(0),
        Element::C if atom.aromatic() => Some(1),
        Element::O if charge < 0 => Some(2),
        Element::O | Element::S | Element::Se => Some(2),
        Element::N if explicit_h > 0 => Some(2),
        Element::N if atom.aromatic() => Some(1),
        Element::B => Some(0),
        _ => None,
    }
}

/// Finds a Kekule (alternating single/double) assignment for the edges of
/// a single ring cycle, honoring any exocyclic double bonds already fixed
/// on its atoms. A simple cycle has at most two alternating assignments;
/// this is a per-ring simplification and does not attempt a global
/// cross-ring matching for fused systems.
fn try_kekulize(molecule: &Molecule, ring: &Ring) -> Option<Vec<Bond>> {
    let edges: Vec<(usize, usize)> = ring.edges().collect();
    if edges.len() % 2 != 0 {
        return None;
    }
    let exocyclic_double: Vec<bool> = ring.atoms().iter().map(|&id| has_exocyclic_double(molecule, ring, id)).collect();

    for first_is_double in [true, false] {
        let assignment: Vec<Bond> =
            (0..edges.len()).map(|i| if (i % 2 == 0) == first_is_double { Bond::Double } else { Bond::Single }).collect();

        let valid = (0..ring.atoms().len()).all(|atom_idx| {
            let prev_edge = if atom_idx == 0 { edges.len() - 1 } else { atom_idx - 1 };
            let doubles_touching =
                usize::from(assignment[prev_edge] == Bond::Double) + usize::from(assignment[atom_idx] == Bond::Double);
            let expected = usize::from(!exocyclic_double[atom_idx]);
            doubles_touching == expected
        });

        if valid {
            return Some(assignment);
        }
    }
    None
}

fn apply_kekulization(molecule: &mut Molecule, ring: &Ring, assignment: &[Bond]) {
    for (i, (a, b)) in ring.edges().enumerate() {
        if let Some(idx) = molecule.bond_between(a, b) {
            molecule.bonds_mut()[idx].set_bond(assignment[i]);
        }
    }
    for &atom_id in ring.atoms() {
        molecule.atoms_mut()[atom_id].set_aromatic(false);
    }
}

#[cfg(test)]
mod tests {
    use elements_rs::Element;

    use super::perceive;
    use crate::{
        atom::{Atom, atom_symbol::AtomSymbol, unbracketed::UnbracketedAtom},
        bond::Bond,
        molecule::{Molecule, RingLimits},
    };

    fn atom(element: Element, aromatic: bool) -> Atom {
        Atom::from(UnbracketedAtom::new(AtomSymbol::Element(element), aromatic))
    }

    #[test]
    fn benzene_ring_is_marked_aromatic() {
        let mut mol = Molecule::new();
        let ids: Vec<usize> = (0..6).map(|_| mol.push_atom(atom(Element::C, true))).collect();
        for i in 0..6 {
            mol.push_bond(ids[i], ids[(i + 1) % 6], Bond::Aromatic);
        }

        let offsets = vec![0; mol.atom_count()];
        let diagnostics = perceive(&mut mol, RingLimits::default(), &offsets);

        assert!(diagnostics.is_empty());
        for &id in &ids {
            assert!(mol.atom(id).aromatic());
        }
    }

    #[test]
    fn kekulized_benzene_gets_promoted_to_aromatic() {
        let mut mol = Molecule::new();
        let ids: Vec<usize> = (0..6).map(|_| mol.push_atom(atom(Element::C, false))).collect();
        for i in 0..6 {
            let bond = if i % 2 == 0 { Bond::Double } else { Bond::Single };
            mol.push_bond(ids[i], ids[(i + 1) % 6], bond);
        }

        let offsets = vec![0; mol.atom_count()];
        perceive(&mut mol, RingLimits::default(), &offsets);

        for &id in &ids {
            assert!(mol.atom(id).aromatic());
        }
    }

    #[test]
    fn cyclohexane_is_not_aromatic() {
        let mut mol = Molecule::new();
        let ids: Vec<usize> = (0..6).map(|_| mol.push_atom(atom(Element::C, false))).collect();
        for i in 0..6 {
            mol.push_bond(ids[i], ids[(i + 1) % 6], Bond::Single);
        }

        let offsets = vec![0; mol.atom_count()];
        let diagnostics = perceive(&mut mol, RingLimits::default(), &offsets);

        assert!(diagnostics.is_empty());
        for &id in &ids {
            assert!(!mol.atom(id).aromatic());
        }
    }

    #[test]
    fn acyclic_molecule_does_no_work() {
        let mut mol = Molecule::new();
        let a = mol.push_atom(atom(Element::C, false));
        let b = mol.push_atom(atom(Element::C, false));
        mol.push_bond(a, b, Bond::Single);

        let offsets = vec![0; mol.atom_count()];
        assert!(perceive(&mut mol, RingLimits::default(), &offsets).is_empty());
    }

    #[test]
    fn cyclopentadienyl_written_aromatic_but_failing_huckel_is_kekulized_or_warned() {
        // Five-membered all-carbon ring written lowercase; odd length, cannot
        // Kekulize, so it must be cleared with a warning rather than panicking.
        let mut mol = Molecule::new();
        let ids: Vec<usize> = (0..5).map(|_| mol.push_atom(atom(Element::C, true))).collect();
        for i in 0..5 {
            mol.push_bond(ids[i], ids[(i + 1) % 5], Bond::Aromatic);
        }

        let offsets = vec![0; mol.atom_count()];
        let diagnostics = perceive(&mut mol, RingLimits::default(), &offsets);

        assert!(!diagnostics.is_empty());
        for &id in &ids {
            assert!(!mol.atom(id).aromatic());
        }
    }
}
