//! Checked arithmetic helpers.

use crate::{Error, Result};

/// Extension trait for computing the sum of a slice of `usize` with overflow
/// checking.
pub trait CheckedSum {
    /// Compute the checked sum, returning [`Error::Overflow`] if the sum
    /// overflows `usize`.
    fn checked_sum(&self) -> Result<usize>;
}

impl CheckedSum for [usize] {
    fn checked_sum(&self) -> Result<usize> {
        self.iter()
            .try_fold(0usize, |acc, &len| acc.checked_add(len))
            .ok_or(Error::Overflow)
    }
}

impl<const N: usize> CheckedSum for [usize; N] {
    fn checked_sum(&self) -> Result<usize> {
        self.as_slice().checked_sum()
    }
}
