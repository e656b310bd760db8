//! Module for parsing, validating, and specifying the chirality of an atom.
use crate::errors::SmilesError;

#[derive(Copy, Debug, PartialEq, Clone, Eq, Hash)]
/// The chirality tag written inside a bracket atom, stored verbatim.
///
/// Extended forms (`@TB`, `@OH`) are parsed and preserved but are not
/// semantically validated beyond the bound checks in the `try_*`
/// constructors; only the simple tetrahedral forms (`At`/`AtAt`/`TH1`/`TH2`)
/// participate in the neighbor-count invalidation rule in
/// [`crate::molecule::stereo`].
pub enum Chirality {
    /// `@`
    At,
    /// `@@`
    AtAt,
    /// `@TH1`/`@TH2`
    TH(u8),
    /// `@AL1`/`@AL2`
    AL(u8),
    /// `@SP1`-`@SP3`
    SP(u8),
    /// `@TB1`-`@TB20`
    TB(u8),
    /// `@OH1`-`@OH30`
    OH(u8),
}

impl Chirality {
    /// Returns true for the tetrahedral forms that participate in
    /// neighbor-distinguishability validation (`@`, `@@`, `@TH1`, `@TH2`).
    #[must_use]
    pub fn is_tetrahedral(&self) -> bool {
        matches!(self, Chirality::At | Chirality::AtAt | Chirality::TH(_))
    }

    /// Converts `u8` to `TH`+`u8`.
    ///
    /// # Errors
    /// Returns [`SmilesError::InvalidChirality`] if `num` is not `1..=2`.
    pub fn try_th(num: u8) -> Result<Self, SmilesError> {
        (1..=2).contains(&num).then_some(Self::TH(num)).ok_or(SmilesError::InvalidChirality)
    }

    /// Converts `u8` to `AL`+`u8`.
    ///
    /// # Errors
    /// Returns [`SmilesError::InvalidChirality`] if `num` is not `1..=2`.
    pub fn try_al(num: u8) -> Result<Self, SmilesError> {
        (1..=2).contains(&num).then_some(Self::AL(num)).ok_or(SmilesError::InvalidChirality)
    }

    /// Converts `u8` to `SP`+`u8`.
    ///
    /// # Errors
    /// Returns [`SmilesError::InvalidChirality`] if `num` is not `1..=3`.
    pub fn try_sp(num: u8) -> Result<Self, SmilesError> {
        (1..=3).contains(&num).then_some(Self::SP(num)).ok_or(SmilesError::InvalidChirality)
    }

    /// Converts `u8` to `TB`+`u8`.
    ///
    /// # Errors
    /// Returns [`SmilesError::InvalidChirality`] if `num` is not `1..=20`.
    pub fn try_tb(num: u8) -> Result<Self, SmilesError> {
        (1..=20).contains(&num).then_some(Self::TB(num)).ok_or(SmilesError::InvalidChirality)
    }

    /// Converts `u8` to `OH`+`u8`.
    ///
    /// # Errors
    /// Returns [`SmilesError::InvalidChirality`] if `num` is not `1..=30`.
    pub fn try_oh(num: u8) -> Result<Self, SmilesError> {
        (1..=30).contains(&num).then_some(Self::OH(num)).ok_or(SmilesError::InvalidChirality)
    }
}

impl std::fmt::Display for Chirality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Chirality::At => write!(f, "@"),
            Chirality::AtAt => write!(f, "@@"),
            Chirality::TH(n) => write!(f, "@TH{n}"),
            Chirality::AL(n) => write!(f, "@AL{n}"),
            Chirality::SP(n) => write!(f, "@SP{n}"),
            Chirality::TB(n) => write!(f, "@TB{n}"),
            Chirality::OH(n) => write!(f, "@OH{n}"),
        }
    }
}
