//! Digital-root checksum for pool bases
//!
//! The check digit is the digital root of the base's digit sum: repeatedly
//! summing digits until a single digit 1..=9 remains, computed here in the
//! closed form `1 + ((s - 1) mod 9)`. Plain `s mod 9` is not acceptable: it
//! maps multiples of 9 to 0 instead of 9. The same function runs at seed
//! time and at bind time, so a stored check digit always re-verifies.

use super::{Base, CheckDigit};

/// Computes the check digit for a base.
///
/// Deterministic and pure: the same base always produces the same digit.
/// For every valid base the digit sum is non-zero, so the result is 1..=9;
/// the degenerate zero-sum case maps to 0 but is unreachable because "000"
/// is not a valid base.
pub fn compute_checksum(base: &Base) -> CheckDigit {
    let sum: u8 = base.digits().iter().sum();
    let digit = if sum == 0 { 0 } else { 1 + ((sum - 1) % 9) };
    CheckDigit::from_valid(digit)
}

/// Verifies that a check digit matches its base.
pub fn verify_checksum(base: &Base, checksum: CheckDigit) -> bool {
    compute_checksum(base) == checksum
}
