//! Allocator error taxonomy
//!
//! Every failure is structured and distinguishable. Validation errors are
//! caller mistakes and are never retried; contention on assign-next is
//! absorbed by the allocator's bounded retry before `PoolExhausted`
//! surfaces; on bind-specific, contention surfaces directly.

use thiserror::Error;

use crate::code::{Base, CheckDigit, FormatError};
use crate::pool::TargetKind;

/// Result type for allocator operations.
pub type AllocResult<T> = Result<T, AllocError>;

/// Allocation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocError {
    // ==================
    // Validation (caller mistakes)
    // ==================
    /// The level is not one of the live organizational levels.
    #[error("unsupported level {0:?}; expected SACCO or MATATU")]
    UnsupportedLevel(String),

    /// The target id is blank.
    #[error("missing target id for level {0}")]
    MissingTarget(TargetKind),

    /// Malformed code text.
    #[error(transparent)]
    Format(#[from] FormatError),

    // ==================
    // Integrity (code does not belong to or match the pool)
    // ==================
    /// The supplied check digit does not match the base.
    #[error("check digit {found} does not match base {base} (expected {expected})")]
    ChecksumMismatch {
        base: Base,
        expected: CheckDigit,
        found: CheckDigit,
    },

    /// The base was never part of the pool.
    #[error("base {0} is not part of the pool")]
    NotFound(Base),

    // ==================
    // Contention / capacity
    // ==================
    /// The slot already belongs to another target.
    #[error("base {0} is already allocated")]
    AlreadyAllocated(Base),

    /// No unallocated codes remain. Terminal until an operator replenishes
    /// the pool.
    #[error("no unallocated codes remain in the pool")]
    PoolExhausted,
}
