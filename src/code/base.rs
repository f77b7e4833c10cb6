//! Base and CheckDigit value types
//!
//! A `Base` identifies one pool slot. It is stored as its numeric value and
//! rendered zero-padded, so ordering is numeric and formatting is uniform.
//! Construction is the only validation point: wrong length, non-digit
//! characters, and the all-zero base are rejected here and nowhere else.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejection reasons for malformed code text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Input length does not match the expected digit count.
    #[error("expected {expected} digits, found {found} characters")]
    WrongLength { expected: usize, found: usize },

    /// A character outside '0'..='9' appeared where a digit was required.
    #[error("non-digit character {found:?} in code")]
    NonDigit { found: char },

    /// The base "000" is outside the pool range.
    #[error("base 000 is not a valid pool base")]
    ZeroBase,

    /// A numeric value does not fit in 3 digits.
    #[error("value {0} does not fit in a 3-digit base")]
    OutOfRange(u16),

    /// A check digit outside 0..=9.
    #[error("check digit must be a single decimal digit")]
    BadCheckDigit,
}

/// The 3-digit numeric identifier of one pool slot.
///
/// Immutable once constructed. No `Default` implementation exists so a base
/// can only enter the system through validation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Base(u16);

impl Base {
    /// Parse a base from its exact textual form: 3 ASCII digits, not "000".
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        if text.chars().count() != 3 {
            return Err(FormatError::WrongLength {
                expected: 3,
                found: text.chars().count(),
            });
        }
        let mut value: u16 = 0;
        for c in text.chars() {
            let digit = c
                .to_digit(10)
                .ok_or(FormatError::NonDigit { found: c })?;
            value = value * 10 + digit as u16;
        }
        Self::from_number(value)
    }

    /// Construct a base from its numeric value (1..=999).
    pub fn from_number(value: u16) -> Result<Self, FormatError> {
        if value == 0 {
            return Err(FormatError::ZeroBase);
        }
        if value > 999 {
            return Err(FormatError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u16 {
        self.0
    }

    /// Returns the three decimal digits, most significant first.
    pub fn digits(&self) -> [u8; 3] {
        [
            (self.0 / 100) as u8,
            (self.0 / 10 % 10) as u8,
            (self.0 % 10) as u8,
        ]
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

impl TryFrom<String> for Base {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Base> for String {
    fn from(base: Base) -> Self {
        base.to_string()
    }
}

/// A single verification digit.
///
/// Seeded check digits are always 1..=9 (the digital root of a non-zero
/// digit sum); 0 is representable only for the degenerate zero sum, which no
/// valid base produces.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct CheckDigit(u8);

impl CheckDigit {
    /// Construct from a digit value 0..=9.
    pub fn new(digit: u8) -> Result<Self, FormatError> {
        if digit > 9 {
            return Err(FormatError::BadCheckDigit);
        }
        Ok(Self(digit))
    }

    /// Parse from a single ASCII digit character.
    pub fn from_char(c: char) -> Result<Self, FormatError> {
        let digit = c.to_digit(10).ok_or(FormatError::NonDigit { found: c })?;
        Ok(Self(digit as u8))
    }

    /// Construct from a digit already known to be in range.
    ///
    /// Only the checksum computation uses this; its closed form cannot
    /// produce a value above 9.
    pub(crate) fn from_valid(digit: u8) -> Self {
        debug_assert!(digit <= 9);
        Self(digit)
    }

    /// Returns the digit value.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for CheckDigit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for CheckDigit {
    type Error = FormatError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CheckDigit> for u8 {
    fn from(digit: CheckDigit) -> Self {
        digit.0
    }
}
