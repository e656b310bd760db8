//! Module for validating a ring-closure digit/marker.

use crate::errors::SmilesError;

/// A ring-closure marker: `1`-`9` written bare, or `%nn` for `10`-`99`.
/// Bounded to `0..=99` by construction.
#[derive(Copy, Debug, PartialEq, Clone, Eq, Hash, PartialOrd, Ord)]
pub struct RingNum(u8);

impl RingNum {
    /// Attempts to build a [`RingNum`] from a `u8`.
    ///
    /// # Errors
    /// Returns [`SmilesError::RingNumberOverflow`] if `num` is above `99`.
    pub fn try_new(num: u8) -> Result<Self, SmilesError> {
        (0..=99).contains(&num).then_some(Self(num)).ok_or(SmilesError::RingNumberOverflow(num))
    }

    /// Returns the numeric value.
    #[must_use]
    pub fn get(&self) -> u8 {
        self.0
    }

    /// Returns whether this marker requires the `%nn` two-digit form
    /// (values `10` and above).
    #[must_use]
    pub fn requires_percent(&self) -> bool {
        self.0 >= 10
    }
}
