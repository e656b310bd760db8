//! Module for validating a charge on an atom
use crate::errors::SmilesError;

#[derive(Copy, Default, Debug, PartialEq, Clone, Eq, Hash)]
/// Wrapper struct for possible charge to limit upper and lower bounds
pub struct Charge(i8);

impl Charge {
    /// Attempts to set the `Charge`, if outside of bounds returns
    /// [`SmilesError::ChargeUnderflow`] or [`SmilesError::ChargeOverflow`]
    ///
    /// # Errors
    /// - Returns [`SmilesError::ChargeUnderflow`] if `i8` is less than `-15`
    /// - Returns [`SmilesError::ChargeOverflow`] if `i8` is greater than `15`
    pub fn try_new(num: i8) -> Result<Self, SmilesError> {
        (-15..=15).contains(&num).then_some(Self(num)).ok_or(if num.is_negative() {
            SmilesError::ChargeUnderflow(num)
        } else {
            SmilesError::ChargeOverflow(num)
        })
    }

    /// Returns the `Charge` value as `i8`
    #[must_use]
    pub fn get(&self) -> i8 {
        self.0
    }
}
