//! Module for specifying the bond between two atoms in a `SMILES` string
pub mod bond_edge;
pub mod ring_num;


use core::fmt;

#[derive(Copy, Debug, Default, PartialEq, Clone, Eq, Hash)]
/// Enum used to specify the Bond type, based on SMILES specification
pub enum Bond {
    #[default]
    /// Implicit single bond or explicit with `-`
    Single,
    /// Defined with `=`
    Double,
    /// Defined with `#`
    Triple,
    /// Defined with `$`
    Quadruple,
    /// Aromatic bonds defined with `:`
    Aromatic,
    /// Represents a stereochemical single bond `/` (up)
    Up,
    /// Represents a stereochemical single bond `\` (down)
    Down,
}

impl fmt::Display for Bond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Bond::Single => "-",
            Bond::Double => "=",
            Bond::Triple => "#",
            Bond::Quadruple => "$",
            Bond::Aromatic => ":",
            Bond::Up => "/",
            Bond::Down => "\\",
        };
        f.write_str(s)
    }
}

impl Bond {
    /// Returns the bond order doubled, so that the aromatic bond order
    /// (`3` = one and a half bonds) can be represented without floats.
    /// `Up`/`Down` are directional single bonds and share `Single`'s order.
    #[must_use]
    pub fn doubled_order(&self) -> u8 {
        match self {
            Bond::Single | Bond::Up | Bond::Down => 2,
            Bond::Double => 4,
            Bond::Triple => 6,
            Bond::Quadruple => 8,
            Bond::Aromatic => 3,
        }
    }

    /// Returns whether this bond is one of the directional stereo markers
    /// `/` or `\`.
    #[must_use]
    pub fn is_directional(&self) -> bool {
        matches!(self, Bond::Up | Bond::Down)
    }

    /// Returns the opposite directional marker (`/` <-> `\`), or `self` if
    /// this bond is not directional.
    #[must_use]
    pub fn flipped(&self) -> Bond {
        match self {
            Bond::Up => Bond::Down,
            Bond::Down => Bond::Up,
            other => *other,
        }
    }
}
