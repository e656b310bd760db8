//! Normal valence tables used by the [`crate::molecule::hydrogens`] pass to
//! compute implicit hydrogen counts for unbracketed atoms.

use elements_rs::Element;

/// Returns the normal valence(s) for `element`, in ascending order, or an
/// empty slice for elements with no implicit-hydrogen model (everything
/// outside the organic/aromatic subset must be written in brackets and
/// never receives implicit hydrogens).
#[must_use]
pub fn normal_valences(element: Element) -> &'static [u8] {
    match element {
        Element::H => &[1],
        Element::B => &[3],
        Element::C => &[4],
        Element::N => &[3, 5],
        Element::O => &[2],
        Element::P => &[3, 5],
        Element::S => &[2, 4, 6],
        Element::F | Element::Cl | Element::Br | Element::I => &[1],
        _ => &[],
    }
}

/// Picks the smallest normal valence target that is at least
/// `effective_valence`, falling back to the largest table entry if even
/// that is exceeded (an over-valent atom as written; the caller clamps the
/// resulting implicit H to zero).
#[must_use]
pub fn target_valence(element: Element, effective_valence: u8) -> Option<u8> {
    let table = normal_valences(element);
    table.iter().copied().find(|&v| v >= effective_valence).or_else(|| table.last().copied())
}

/// Returns the magnitude of the valence adjustment a formal `charge`
/// contributes for `element`, per the standard SMILES charge/valence table
/// (e.g. `C` with a negative charge or `N`/`O` with a positive charge each
/// add one to the expected valence; the opposite sign subtracts one).
///
/// The returned value is added to `effective_valence` before hydrogens are
/// computed, so a positive result raises the bond count the atom must
/// still satisfy with implicit H and a negative result lowers it.
#[must_use]
pub fn charge_adjustment(element: Element, charge: i8) -> i8 {
    if charge == 0 {
        return 0;
    }
    match element {
        Element::C => -charge,
        Element::N | Element::O | Element::S | Element::P => charge,
        Element::B => -charge,
        _ => 0,
    }
}
