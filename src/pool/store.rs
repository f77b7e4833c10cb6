//! Pool store contract
//!
//! The store is the single shared mutable resource of the subsystem. All
//! reads are snapshots that may be stale by the time a claim runs; the claim
//! itself is a compare-and-set that re-checks allocation state atomically.
//! Callers never commit an allocation as a separate read-then-write.

use std::sync::Arc;

use crate::code::{Base, CheckDigit};

use super::slot::{AllocationTarget, CodeSlot};

/// Definitive result of a claim attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// This caller won the slot.
    Claimed,
    /// The slot was already allocated (possibly by a concurrent caller that
    /// committed first).
    AlreadyAllocated,
    /// The base was never part of the pool.
    NotFound,
}

/// Durable per-base state plus the one atomic mutation.
///
/// Implementations guarantee: if two callers claim the same base
/// concurrently, exactly one observes [`ClaimOutcome::Claimed`] and the slot
/// afterwards carries that caller's target. No interleaving can leave a slot
/// allocated with a mismatched target or let both callers win.
pub trait PoolStore: Send + Sync {
    /// Fresh snapshot of every unallocated slot, ascending by base.
    fn list_unallocated(&self) -> Vec<(Base, CheckDigit)>;

    /// Fresh snapshot of every allocated slot, most recently allocated
    /// first.
    fn list_allocated(&self) -> Vec<CodeSlot>;

    /// Look up one slot by base.
    fn get_by_base(&self, base: Base) -> Option<CodeSlot>;

    /// Claim the slot for the target, only if it is currently unallocated.
    ///
    /// This is the sole mutating operation on the pool. It either completes
    /// or reports a definitive outcome; it never blocks indefinitely.
    fn claim(&self, base: Base, target: &AllocationTarget) -> ClaimOutcome;
}

impl<S: PoolStore + ?Sized> PoolStore for Arc<S> {
    fn list_unallocated(&self) -> Vec<(Base, CheckDigit)> {
        (**self).list_unallocated()
    }

    fn list_allocated(&self) -> Vec<CodeSlot> {
        (**self).list_allocated()
    }

    fn get_by_base(&self, base: Base) -> Option<CodeSlot> {
        (**self).get_by_base(base)
    }

    fn claim(&self, base: Base, target: &AllocationTarget) -> ClaimOutcome {
        (**self).claim(base, target)
    }
}
