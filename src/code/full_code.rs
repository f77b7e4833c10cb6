//! Full-code text format
//!
//! The complete user-facing dial string is `"<prefix><base:3><check:1>#"`.
//! This format appears on printed materials and SMS, so it is part of the
//! system's durable contract and must not change without a migration.

use std::fmt;

use super::{Base, CheckDigit, FormatError};

/// Default dial prefix prepended to every rendered code.
pub const DEFAULT_PREFIX: &str = "*001*";

/// Terminator character closing a rendered code.
pub const TERMINATOR: char = '#';

/// A complete dial code: prefix, base, and check digit.
///
/// Parsing and rendering are the only places the textual format is known;
/// everything else works with the typed parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullCode {
    prefix: String,
    base: Base,
    check: CheckDigit,
}

impl FullCode {
    /// Assemble a full code from typed parts.
    pub fn new(prefix: &str, base: Base, check: CheckDigit) -> Self {
        Self {
            prefix: prefix.to_string(),
            base,
            check,
        }
    }

    /// Parse caller-supplied code text.
    ///
    /// Accepts the bare `<base:3><check:1>` body, optionally preceded by the
    /// given prefix and optionally followed by the terminator. The check
    /// digit is parsed, not verified; verification against the base is the
    /// caller's next step.
    pub fn parse(input: &str, prefix: &str) -> Result<Self, FormatError> {
        let body = input.strip_prefix(prefix).unwrap_or(input);
        let body = body.strip_suffix(TERMINATOR).unwrap_or(body);

        let count = body.chars().count();
        if count != 4 {
            return Err(FormatError::WrongLength {
                expected: 4,
                found: count,
            });
        }
        let split = body
            .char_indices()
            .nth(3)
            .map(|(i, _)| i)
            .unwrap_or(body.len());
        let base = Base::parse(&body[..split])?;
        let check_char = body[split..]
            .chars()
            .next()
            .ok_or(FormatError::BadCheckDigit)?;
        let check = CheckDigit::from_char(check_char)?;

        Ok(Self::new(prefix, base, check))
    }

    /// The parsed or assigned base.
    pub fn base(&self) -> Base {
        self.base
    }

    /// The parsed or computed check digit.
    pub fn check(&self) -> CheckDigit {
        self.check
    }
}

impl fmt::Display for FullCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}{}", self.prefix, self.base, self.check, TERMINATOR)
    }
}
