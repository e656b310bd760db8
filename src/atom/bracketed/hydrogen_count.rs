//! Module for specifying the total number of hydrogens a `SMILES` string
//! specifies
#[derive(Copy, Default, Debug, PartialEq, Clone, Eq, Hash)]
/// Designates the hydrogen count (explicit only). Currently Hydrogen count has
/// no upper bound, and may go to [`u8::MAX`]
pub enum HydrogenCount {
    /// Defaults to unspecified
    #[default]
    Unspecified,
    /// The explicit number of hydrogens
    Explicit(u8),
}

impl HydrogenCount {
    /// Returns the hydrogen count based on `Option` input of `u8`
    #[must_use]
    pub fn new(hydrogens: Option<u8>) -> Self {
        match hydrogens {
            Some(h) => Self::Explicit(h),
            None => Self::Unspecified,
        }
    }
    /// Retrieves the hydrogen count if explicit
    #[must_use]
    pub fn get_count(&self) -> Option<u8> {
        match self {
            Self::Unspecified => None,
            Self::Explicit(n) => Some(*n),
        }
    }
}
