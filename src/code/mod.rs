//! Value layer for dial codes
//!
//! Everything user-visible about a code is derived from two validated value
//! types: the 3-digit [`Base`] and its single [`CheckDigit`]. Malformed text
//! is rejected at construction, so the pool and allocator never see a raw,
//! unchecked string.
//!
//! # Invariants enforced
//!
//! - A `Base` is exactly 3 decimal digits and never "000"
//! - A `CheckDigit` is a single decimal digit
//! - A seeded check digit equals the digital root of the base's digit sum
//! - The full-code text format is `"<prefix><base:3><check:1>#"`

mod base;
mod checksum;
mod full_code;

pub use base::{Base, CheckDigit, FormatError};
pub use checksum::{compute_checksum, verify_checksum};
pub use full_code::{FullCode, DEFAULT_PREFIX, TERMINATOR};
