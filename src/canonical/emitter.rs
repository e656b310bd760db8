//! Walks the DFS tree built over a [`Molecule`] and writes SMILES text,
//! either canonically (using a precomputed rank to order neighbors and
//! pick the root) or as-is (DFS from atom `0` in parse order) per §4.8.

use crate::{
    atom::{atom_symbol::AtomSymbol, bracketed::chirality::Chirality},
    bond::Bond,
    canonical::label,
    molecule::Molecule,
};

struct BackEdge {
    opening_atom: usize,
    closing_atom: usize,
    bond_idx: usize,
}

struct Walk<'a> {
    molecule: &'a Molecule,
    order_key: Box<dyn Fn(usize) -> usize + 'a>,
    visited: Vec<bool>,
    consumed_edge: Vec<bool>,
    parent_edge: Vec<Option<usize>>,
    back_edges: Vec<BackEdge>,
    visit_order: Vec<usize>,
}

impl<'a> Walk<'a> {
    fn sorted_neighbors(&self, atom_id: usize) -> Vec<(usize, usize)> {
        let mut neighbors: Vec<(usize, usize)> = self.molecule.neighbors(atom_id).to_vec();
        neighbors.sort_by_key(|&(neighbor, edge)| {
            let rank = (self.order_key)(neighbor);
            (rank, self.molecule.bonds()[edge].bond().doubled_order(), neighbor)
        });
        neighbors
    }

    fn visit(&mut self, atom_id: usize) {
        self.visited[atom_id] = true;
        self.visit_order.push(atom_id);
        for (neighbor, edge) in self.sorted_neighbors(atom_id) {
            if self.consumed_edge[edge] {
                continue;
            }
            self.consumed_edge[edge] = true;
            if self.visited[neighbor] {
                self.back_edges.push(BackEdge { opening_atom: neighbor, closing_atom: atom_id, bond_idx: edge });
            } else {
                self.parent_edge[neighbor] = Some(edge);
                self.visit(neighbor);
            }
        }
    }
}

/// Whether a bond symbol must be written explicitly between two atoms
/// with the given aromaticity, or can be omitted (default single/
/// aromatic-in-context bonds per §6/§4.8).
fn bond_text(bond: Bond, a_aromatic: bool, b_aromatic: bool) -> &'static str {
    match bond {
        Bond::Single if a_aromatic && b_aromatic => "-",
        Bond::Single | Bond::Aromatic => "",
        Bond::Double => "=",
        Bond::Triple => "#",
        Bond::Quadruple => "$",
        Bond::Up => "/",
        Bond::Down => "\\",
    }
}

fn atom_requires_brackets(molecule: &Molecule, atom_id: usize) -> bool {
    let node = molecule.atom(atom_id);
    let atom = node.atom();
    if atom.isotope_mass_number().is_some() || atom.charge_value() != 0 || atom.class() > 0 || node.chirality().is_some()
    {
        return true;
    }
    match atom.symbol() {
        AtomSymbol::WildCard | AtomSymbol::Unspecified => false,
        AtomSymbol::Element(element) => {
            if node.aromatic() {
                !AtomSymbol::Element(element).is_aromatic_subset()
            } else {
                !AtomSymbol::Element(element).is_organic_subset()
            }
        }
    }
}

fn element_symbol(element: elements_rs::Element, aromatic: bool) -> String {
    let upper = element.to_string();
    if aromatic { upper.to_lowercase() } else { upper }
}

fn chirality_text(chirality: Chirality) -> String {
    match chirality {
        Chirality::At => "@".to_string(),
        Chirality::AtAt => "@@".to_string(),
        Chirality::TH(n) => format!("@TH{n}"),
        Chirality::AL(n) => format!("@AL{n}"),
        Chirality::SP(n) => format!("@SP{n}"),
        Chirality::TB(n) => format!("@TB{n}"),
        Chirality::OH(n) => format!("@OH{n}"),
    }
}

fn write_atom(out: &mut String, molecule: &Molecule, atom_id: usize) {
    let node = molecule.atom(atom_id);
    let atom = node.atom();

    if !atom_requires_brackets(molecule, atom_id) {
        match atom.symbol() {
            AtomSymbol::WildCard => out.push('*'),
            AtomSymbol::Element(element) => out.push_str(&element_symbol(element, node.aromatic())),
            AtomSymbol::Unspecified => {}
        }
        return;
    }

    out.push('[');
    if let Some(mass) = atom.isotope_mass_number() {
        out.push_str(&mass.to_string());
    }
    match atom.symbol() {
        AtomSymbol::WildCard => out.push('*'),
        AtomSymbol::Element(element) => out.push_str(&element_symbol(element, node.aromatic())),
        AtomSymbol::Unspecified => {}
    }
    if let Some(chirality) = node.chirality() {
        out.push_str(&chirality_text(chirality));
    }
    if let Some(h) = atom.hydrogen_count() {
        if h == 1 {
            out.push('H');
        } else if h > 1 {
            out.push('H');
            out.push_str(&h.to_string());
        }
    }
    let charge = atom.charge_value();
    if charge != 0 {
        out.push(if charge > 0 { '+' } else { '-' });
        let magnitude = charge.unsigned_abs();
        if magnitude > 1 {
            out.push_str(&magnitude.to_string());
        }
    }
    if atom.class() > 0 {
        out.push(':');
        out.push_str(&atom.class().to_string());
    }
    out.push(']');
}

fn ring_digit(number: usize) -> String {
    if number < 10 { number.to_string() } else { format!("%{number:02}") }
}

fn render(molecule: &Molecule, root: usize, order_key: Box<dyn Fn(usize) -> usize + '_>) -> String {
    let n = molecule.atom_count();
    if n == 0 {
        return String::new();
    }

    let mut walk = Walk {
        molecule,
        order_key,
        visited: vec![false; n],
        consumed_edge: vec![false; molecule.bond_count()],
        parent_edge: vec![None; n],
        back_edges: Vec::new(),
        visit_order: Vec::new(),
    };
    walk.visit(root);

    let visit_rank: Vec<usize> = {
        let mut r = vec![usize::MAX; n];
        for (order, &atom_id) in walk.visit_order.iter().enumerate() {
            r[atom_id] = order;
        }
        r
    };

    let mut sorted_back_edges: Vec<&BackEdge> = walk.back_edges.iter().collect();
    sorted_back_edges.sort_by_key(|e| visit_rank[e.opening_atom]);

    let mut digit_of_edge: hashbrown::HashMap<usize, usize> = hashbrown::HashMap::new();
    let mut opening_at: hashbrown::HashMap<usize, Vec<usize>> = hashbrown::HashMap::new();
    let mut closing_at: hashbrown::HashMap<usize, Vec<usize>> = hashbrown::HashMap::new();
    for (i, edge) in sorted_back_edges.iter().enumerate() {
        let digit = i + 1;
        digit_of_edge.insert(edge.bond_idx, digit);
        opening_at.entry(edge.opening_atom).or_default().push(edge.bond_idx);
        closing_at.entry(edge.closing_atom).or_default().push(edge.bond_idx);
    }

    let children = atom_children(molecule, &walk);
    let renderer = Renderer { molecule, children, digit_of_edge, opening_at, closing_at };
    let mut out = String::new();
    renderer.write_subtree(root, None, &mut out);
    out
}

fn atom_children(molecule: &Molecule, walk: &Walk<'_>) -> Vec<Vec<(usize, usize)>> {
    (0..molecule.atom_count())
        .map(|atom_id| {
            walk.sorted_neighbors(atom_id)
                .into_iter()
                .filter(|&(neighbor, edge)| walk.parent_edge[neighbor] == Some(edge) && parent_of(walk, neighbor) == Some(atom_id))
                .collect()
        })
        .collect()
}

fn parent_of(walk: &Walk<'_>, atom_id: usize) -> Option<usize> {
    walk.parent_edge[atom_id].map(|edge| {
        let (a, b) = walk.molecule.bonds()[edge].vertices();
        if a == atom_id { b } else { a }
    })
}

struct Renderer<'a> {
    molecule: &'a Molecule,
    children: Vec<Vec<(usize, usize)>>,
    digit_of_edge: hashbrown::HashMap<usize, usize>,
    opening_at: hashbrown::HashMap<usize, Vec<usize>>,
    closing_at: hashbrown::HashMap<usize, Vec<usize>>,
}

impl Renderer<'_> {
    fn write_subtree(&self, atom_id: usize, incoming: Option<(usize, Bond)>, out: &mut String) {
        if let Some((parent, bond)) = incoming {
            let parent_aromatic = self.molecule.atom(parent).aromatic();
            let atom_aromatic = self.molecule.atom(atom_id).aromatic();
            out.push_str(bond_text(bond, parent_aromatic, atom_aromatic));
        }
        write_atom(out, self.molecule, atom_id);
        self.write_ring_closures(atom_id, out);

        let own_children = &self.children[atom_id];
        for (i, &(child, edge)) in own_children.iter().enumerate() {
            let bond = *self.molecule.bonds()[edge].bond();
            let is_last = i + 1 == own_children.len();
            if is_last {
                self.write_subtree(child, Some((atom_id, bond)), out);
            } else {
                out.push('(');
                self.write_subtree(child, Some((atom_id, bond)), out);
                out.push(')');
            }
        }
    }

    fn write_ring_closures(&self, atom_id: usize, out: &mut String) {
        let mut ring_edges: Vec<usize> = Vec::new();
        ring_edges.extend(self.opening_at.get(&atom_id).into_iter().flatten().copied());
        ring_edges.extend(self.closing_at.get(&atom_id).into_iter().flatten().copied());
        ring_edges.sort_by_key(|e| self.digit_of_edge[e]);

        for edge in ring_edges {
            if self.opening_at.get(&atom_id).is_some_and(|v| v.contains(&edge)) {
                let (a, b) = self.molecule.bonds()[edge].vertices();
                let other = if a == atom_id { b } else { a };
                let bond = *self.molecule.bonds()[edge].bond();
                out.push_str(bond_text(bond, self.molecule.atom(atom_id).aromatic(), self.molecule.atom(other).aromatic()));
            }
            out.push_str(&ring_digit(self.digit_of_edge[&edge]));
        }
    }
}

/// Emits canonical SMILES for a single connected molecule, given its
/// `rank` from [`label::refine`].
#[must_use]
pub fn emit_canonical(molecule: &Molecule, rank: &[usize]) -> String {
    if molecule.atom_count() == 0 {
        return String::new();
    }
    let root = label::choose_root(molecule, rank);
    let rank = rank.to_vec();
    let candidate = render(molecule, root, Box::new(move |id| rank[id]));
    let flipped = flip_directional(&candidate);
    if flipped < candidate { flipped } else { candidate }
}

/// Emits SMILES for a single connected molecule as-is: DFS from atom
/// `0`, neighbors in parse order, no canonical relabeling.
#[must_use]
pub fn emit_as_is(molecule: &Molecule) -> String {
    if molecule.atom_count() == 0 {
        return String::new();
    }
    render(molecule, 0, Box::new(|id| id))
}

fn flip_directional(s: &str) -> String {
    s.chars().map(|c| match c {
        '/' => '\\',
        '\\' => '/',
        other => other,
    }).collect()
}

#[cfg(test)]
mod tests {
    use elements_rs::Element;

    use super::{emit_as_is, emit_canonical};
    use crate::{
        atom::{Atom, atom_symbol::AtomSymbol, unbracketed::UnbracketedAtom},
        bond::Bond,
        canonical::label,
        molecule::Molecule,
    };

    fn carbon() -> Atom {
        Atom::from(UnbracketedAtom::new(AtomSymbol::Element(Element::C), false))
    }

    fn oxygen() -> Atom {
        Atom::from(UnbracketedAtom::new(AtomSymbol::Element(Element::O), false))
    }

    #[test]
    fn ethanol_round_trips_through_canonical_emission() {
        let mut mol = Molecule::new();
        let c0 = mol.push_atom(carbon());
        let c1 = mol.push_atom(carbon());
        let o = mol.push_atom(oxygen());
        mol.push_bond(c0, c1, Bond::Single);
        mol.push_bond(c1, o, Bond::Single);

        let rank = label::refine(&mol);
        let output = emit_canonical(&mol, &rank);
        assert_eq!(output, "CCO");
    }

    #[test]
    fn benzene_emits_lowercase_ring() {
        let mut mol = Molecule::new();
        let ids: Vec<usize> = (0..6).map(|_| mol.push_atom(Atom::from(UnbracketedAtom::new(AtomSymbol::Element(Element::C), true)))).collect();
        for i in 0..6 {
            mol.push_bond(ids[i], ids[(i + 1) % 6], Bond::Aromatic);
        }
        let rank = label::refine(&mol);
        let output = emit_canonical(&mol, &rank);
        assert_eq!(output, "c1ccccc1");
    }

    #[test]
    fn as_is_emission_does_not_reorder_atoms() {
        let mut mol = Molecule::new();
        let c0 = mol.push_atom(carbon());
        let c1 = mol.push_atom(carbon());
        let o = mol.push_atom(oxygen());
        mol.push_bond(c0, c1, Bond::Single);
        mol.push_bond(c1, o, Bond::Single);

        assert_eq!(emit_as_is(&mol), "CCO");
    }

    #[test]
    fn single_atom_emits_bare_symbol() {
        let mut mol = Molecule::new();
        mol.push_atom(carbon());
        let rank = label::refine(&mol);
        assert_eq!(emit_canonical(&mol, &rank), "C");
    }
}
