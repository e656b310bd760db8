//! Stereo descriptor validation: tetrahedral-chirality neighbor-count
//! checks and double-bond directional-marker consistency checks.

use hashbrown::HashSet;

use crate::{bond::Bond, errors::Diagnostic, molecule::{Molecule, RingLimits}};

/// Clears the chirality tag on any chiral atom that does not have at least
/// three neighbors distinguishable by canonical rank (a symmetric center
/// has no well-defined handedness). `rank` gives each atom id's current
/// canonical-label rank (ties mean "not distinguishable"); `atom_offsets`
/// supplies each atom's source byte offset for diagnostic placement.
pub fn validate_tetrahedral(molecule: &mut Molecule, rank: &[usize], atom_offsets: &[usize]) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for atom_id in 0..molecule.atom_count() {
        if molecule.atom(atom_id).chirality().is_none() {
            continue;
        }
        let neighbor_ranks: Vec<usize> = molecule.neighbors(atom_id).iter().map(|&(n, _)| rank[n]).collect();
        let mut distinct = neighbor_ranks.clone();
        distinct.sort_unstable();
        distinct.dedup();

        if neighbor_ranks.len() < 3 || distinct.len() < 3 {
            molecule.atoms_mut()[atom_id].clear_chirality();
            let offset = atom_offsets.get(atom_id).copied().unwrap_or(0);
            diagnostics.push(Diagnostic::warning(
                format!("cleared chirality on atom {atom_id}: fewer than three distinguishable neighbors"),
                offset,
            ));
        }
    }
    diagnostics
}

fn normalize_bond_key(a: usize, b: usize) -> (usize, usize) {
    if a < b { (a, b) } else { (b, a) }
}

/// Clears a `/`/`\` marker unless it is adjacent to exactly one double bond
/// that is not itself inside a ring smaller than 8 atoms, and normalizes
/// same-direction marker pairs flanking one double bond.
pub fn validate_directional_bonds(molecule: &mut Molecule, limits: RingLimits, atom_offsets: &[usize]) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let small_ring_bonds: HashSet<(usize, usize)> = molecule
        .ring_info(limits)
        .sssr()
        .iter()
        .filter(|ring| ring.len() < 8)
        .flat_map(|ring| ring.edges().map(|(a, b)| normalize_bond_key(a, b)))
        .collect();

    let directional: Vec<usize> = (0..molecule.bond_count()).filter(|&i| molecule.bonds()[i].bond().is_directional()).collect();

    for &edge_idx in &directional {
        let (a, b) = molecule.bonds()[edge_idx].vertices();
        let adjacent_doubles = |molecule: &Molecule, atom_id: usize| -> Vec<usize> {
            molecule
                .neighbors(atom_id)
                .iter()
                .filter(|&&(_, e)| e != edge_idx && *molecule.bonds()[e].bond() == Bond::Double)
                .map(|&(_, e)| e)
                .collect()
        };
        let mut doubles = adjacent_doubles(molecule, a);
        doubles.extend(adjacent_doubles(molecule, b));
        doubles.sort_unstable();
        doubles.dedup();

        let clear = match doubles.as_slice() {
            [double_idx] => {
                let (da, db) = molecule.bonds()[*double_idx].vertices();
                small_ring_bonds.contains(&normalize_bond_key(da, db))
            }
            _ => true,
        };

        if clear {
            molecule.bonds_mut()[edge_idx].set_bond(Bond::Single);
            let offset = atom_offsets.get(a).copied().unwrap_or(0);
            diagnostics.push(Diagnostic::warning(
                format!("cleared directional marker on bond {a}-{b}: not adjacent to exactly one eligible double bond"),
                offset,
            ));
        }
    }

    diagnostics.extend(normalize_same_direction_pairs(molecule, atom_offsets));
    diagnostics
}

/// Flips the second of any two directional bonds sharing a double-bond
/// endpoint when both use the same slash direction, a geometrically
/// inconsistent pair (§4.6). The first bond found (in bond-list order) is
/// kept as the canonical direction.
fn normalize_same_direction_pairs(molecule: &mut Molecule, atom_offsets: &[usize]) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for double_idx in 0..molecule.bond_count() {
        if *molecule.bonds()[double_idx].bond() != Bond::Double {
            continue;
        }
        let (x, y) = molecule.bonds()[double_idx].vertices();
        for endpoint in [x, y] {
            let directional: Vec<usize> = molecule
                .neighbors(endpoint)
                .iter()
                .filter(|&&(_, e)| e != double_idx && molecule.bonds()[e].bond().is_directional())
                .map(|&(_, e)| e)
                .collect();
            if directional.len() < 2 {
                continue;
            }
            let kept = *molecule.bonds()[directional[0]].bond();
            for &edge_idx in &directional[1..] {
                if *molecule.bonds()[edge_idx].bond() == kept {
                    let flipped = kept.flipped();
                    molecule.bonds_mut()[edge_idx].set_bond(flipped);
                    let (a, _) = molecule.bonds()[edge_idx].vertices();
                    let offset = atom_offsets.get(a).copied().unwrap_or(0);
                    diagnostics.push(Diagnostic::warning(
                        format!("normalized conflicting directional marker at atom {endpoint}"),
                        offset,
                    ));
                }
            }
        }
    }
    diagnostics
}

#[cfg(test)]
mod tests {
    use elements_rs::Element;

    use super::{validate_directional_bonds, validate_tetrahedral};
    use crate::{
        atom::{
            Atom, atom_symbol::AtomSymbol,
            bracketed::{BracketAtom, chirality::Chirality},
            unbracketed::UnbracketedAtom,
        },
        bond::Bond,
        molecule::{Molecule, RingLimits},
    };

    fn carbon() -> Atom {
        Atom::from(UnbracketedAtom::new(AtomSymbol::Element(Element::C), false))
    }

    #[test]
    fn chiral_atom_with_three_distinct_neighbors_keeps_its_tag() {
        let mut mol = Molecule::new();
        let center_atom = BracketAtom::builder().with_symbol(AtomSymbol::Element(Element::C)).with_chiral(Chirality::At).build();
        let center = mol.push_atom(Atom::from(center_atom));
        let n1 = mol.push_atom(carbon());
        let n2 = mol.push_atom(carbon());
        let n3 = mol.push_atom(carbon());
        mol.push_bond(center, n1, Bond::Single);
        mol.push_bond(center, n2, Bond::Single);
        mol.push_bond(center, n3, Bond::Single);

        let rank = vec![3, 0, 1, 2];
        let offsets = vec![0; mol.atom_count()];
        let diagnostics = validate_tetrahedral(&mut mol, &rank, &offsets);

        assert!(diagnostics.is_empty());
        assert!(mol.atom(center).chirality().is_some());
    }

    #[test]
    fn chiral_atom_with_two_neighbors_sharing_rank_loses_its_tag() {
        let mut mol = Molecule::new();
        let center_atom = BracketAtom::builder().with_symbol(AtomSymbol::Element(Element::C)).with_chiral(Chirality::At).build();
        let center = mol.push_atom(Atom::from(center_atom));
        let n1 = mol.push_atom(carbon());
        let n2 = mol.push_atom(carbon());
        let n3 = mol.push_atom(carbon());
        mol.push_bond(center, n1, Bond::Single);
        mol.push_bond(center, n2, Bond::Single);
        mol.push_bond(center, n3, Bond::Single);

        // n1 and n2 share a canonical rank: symmetric, not distinguishable.
        let rank = vec![3, 0, 0, 1];
        let offsets = vec![0; mol.atom_count()];
        let diagnostics = validate_tetrahedral(&mut mol, &rank, &offsets);

        assert_eq!(diagnostics.len(), 1);
        assert!(mol.atom(center).chirality().is_none());
    }

    #[test]
    fn directional_bond_adjacent_to_one_double_bond_survives() {
        let mut mol = Molecule::new();
        let f1 = mol.push_atom(Atom::from(UnbracketedAtom::new(AtomSymbol::Element(Element::F), false)));
        let c1 = mol.push_atom(carbon());
        let c2 = mol.push_atom(carbon());
        let f2 = mol.push_atom(Atom::from(UnbracketedAtom::new(AtomSymbol::Element(Element::F), false)));
        mol.push_bond(f1, c1, Bond::Up);
        mol.push_bond(c1, c2, Bond::Double);
        mol.push_bond(c2, f2, Bond::Up);

        let offsets = vec![0; mol.atom_count()];
        let diagnostics = validate_directional_bonds(&mut mol, RingLimits::default(), &offsets);

        assert!(diagnostics.is_empty());
        assert!(mol.bonds()[0].bond().is_directional());
        assert!(mol.bonds()[2].bond().is_directional());
    }

    #[test]
    fn directional_bond_with_no_adjacent_double_bond_is_cleared() {
        let mut mol = Molecule::new();
        let a = mol.push_atom(carbon());
        let b = mol.push_atom(carbon());
        mol.push_bond(a, b, Bond::Up);

        let offsets = vec![0; mol.atom_count()];
        let diagnostics = validate_directional_bonds(&mut mol, RingLimits::default(), &offsets);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(*mol.bonds()[0].bond(), Bond::Single);
    }
}
