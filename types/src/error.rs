//! Errors shared across crates.

use thiserror::Error;

/// Checked unsigned arithmetic went out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("arithmetic overflow")]
pub struct ArithmeticError;

/// `a + b`, or [`ArithmeticError`] on overflow.
pub fn add_u64(a: u64, b: u64) -> Result<u64, ArithmeticError> {
    a.checked_add(b).ok_or(ArithmeticError)
}
