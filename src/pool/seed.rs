//! Bulk pool seeding
//!
//! Slots are created once, in bulk, over a known numeric range. Each slot's
//! check digit is computed here and never recomputed for storage; later
//! verification must always agree with it.

use thiserror::Error;

use crate::code::{Base, FormatError};

use super::slot::CodeSlot;

/// Seeding failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SeedError {
    /// The range is inverted.
    #[error("seed range start {start} exceeds end {end}")]
    InvertedRange { start: u16, end: u16 },

    /// A bound falls outside the valid base range 1..=999.
    #[error("seed bound {0}: {1}")]
    InvalidBound(u16, FormatError),

    /// Two slots share a base.
    #[error("duplicate base {0} in pool")]
    DuplicateBase(Base),
}

/// Enumerate the inclusive range into unallocated slots, ascending.
pub fn seed_slots(start: u16, end: u16) -> Result<Vec<CodeSlot>, SeedError> {
    if start > end {
        return Err(SeedError::InvertedRange { start, end });
    }
    // Bounds are rejected before any arithmetic on them; `end - start + 1`
    // in u16 would overflow for the full 0..=u16::MAX span.
    Base::from_number(start).map_err(|e| SeedError::InvalidBound(start, e))?;
    Base::from_number(end).map_err(|e| SeedError::InvalidBound(end, e))?;

    let mut slots = Vec::with_capacity(end as usize - start as usize + 1);
    for value in start..=end {
        let base = Base::from_number(value).map_err(|e| SeedError::InvalidBound(value, e))?;
        slots.push(CodeSlot::unallocated(base));
    }
    Ok(slots)
}
