//! Implicit hydrogen assignment for unbracketed atoms, following the
//! normal valence tables in [`crate::valence`], plus the coarse
//! hybridization derivation that rides along on the same per-atom bond-order
//! scan.
//!
//! All arithmetic is carried out in doubled bond-order units
//! ([`crate::bond::Bond::doubled_order`]) so the aromatic bond's 1.5 order
//! never needs a float.

use crate::{atom::atom_node::Hybridization, bond::Bond, molecule::Molecule, valence};

/// Computes and stores implicit hydrogen counts on every unbracketed atom
/// in `molecule`, and derives each atom's hybridization from its bond
/// orders and perceived aromaticity. Bracketed atoms still get a derived
/// hybridization but keep their hydrogen count untouched: it is whatever
/// was written, literally (§4.5). Run after aromaticity perception so the
/// final aromatic flag is what hybridization sees.
pub fn assign(molecule: &mut Molecule) {
    let doubled_sums: Vec<u32> = (0..molecule.atom_count())
        .map(|id| {
            molecule
                .neighbors(id)
                .iter()
                .map(|&(_, edge)| u32::from(molecule.bonds()[edge].bond().doubled_order()))
                .sum()
        })
        .collect();
    let highest_orders: Vec<u8> = (0..molecule.atom_count())
        .map(|id| {
            molecule
                .neighbors(id)
                .iter()
                .map(|&(_, edge)| molecule.bonds()[edge].bond().doubled_order())
                .max()
                .unwrap_or(0)
        })
        .collect();

    for id in 0..molecule.atom_count() {
        let hybridization = if highest_orders[id] >= Bond::Triple.doubled_order() {
            Hybridization::Sp
        } else if molecule.atom(id).aromatic() || highest_orders[id] >= Bond::Double.doubled_order() {
            Hybridization::Sp2
        } else {
            Hybridization::Sp3
        };
        molecule.atoms_mut()[id].set_hybridization(hybridization);

        if molecule.atom(id).atom().is_bracketed() {
            continue;
        }
        let Some(element) = molecule.atom(id).atom().element() else { continue };
        let doubled_sum = doubled_sums[id];
        let effective_ceil = u8::try_from((doubled_sum + 1) / 2).unwrap_or(u8::MAX);
        let Some(target) = valence::target_valence(element, effective_ceil) else { continue };

        let charge = molecule.atom(id).atom().charge_value();
        let charge_doubled = i32::from(valence::charge_adjustment(element, charge).abs()) * 2;
        let target_doubled = i32::from(target) * 2;
        let implicit_doubled = target_doubled - i32::from(doubled_sum) - charge_doubled;
        let implicit = if implicit_doubled > 0 { u8::try_from(implicit_doubled / 2).unwrap_or(0) } else { 0 };

        molecule.atoms_mut()[id].set_implicit_hydrogens(implicit);
    }
}
