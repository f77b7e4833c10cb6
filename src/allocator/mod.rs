//! Allocator - administrative intent over the pool
//!
//! Translates operator requests into pool operations and owns the
//! user-facing code format. Candidate selection reads a snapshot that may be
//! stale; the commit is always the store's atomic claim, never a
//! read-then-write performed here.
//!
//! # Operations
//!
//! - list available codes, ascending by base
//! - list allocated codes, most recent first
//! - assign the lowest unallocated base to a target
//! - bind a specific caller-chosen code after re-validating its checksum

mod errors;

pub use errors::{AllocError, AllocResult};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::code::{compute_checksum, Base, CheckDigit, FullCode, DEFAULT_PREFIX};
use crate::observability::Logger;
use crate::pool::{AllocationTarget, ClaimOutcome, PoolStore, TargetKind};

/// Remaining-capacity watermark at or below which a successful assignment
/// also logs a POOL_LOW warning, giving operators notice to replenish
/// before `PoolExhausted` starts surfacing.
const LOW_POOL_WATERMARK: usize = 10;

fn pool_running_low(remaining: usize) -> bool {
    remaining <= LOW_POOL_WATERMARK
}

/// One allocated code as reported to listing consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocatedCode {
    pub code: String,
    pub level: TargetKind,
    pub target_id: String,
    pub allocated_at: DateTime<Utc>,
}

/// Business logic layer over a [`PoolStore`].
#[derive(Debug)]
pub struct Allocator<S: PoolStore> {
    store: S,
}

impl<S: PoolStore> Allocator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every unallocated code formatted with the prefix, ascending by base.
    /// An empty pool yields an empty vector.
    pub fn list_available(&self, prefix: Option<&str>) -> Vec<String> {
        let prefix = prefix.unwrap_or(DEFAULT_PREFIX);
        self.store
            .list_unallocated()
            .into_iter()
            .map(|(base, check)| render(prefix, base, check))
            .collect()
    }

    /// Every allocated code with its target, most recently allocated first.
    pub fn list_allocated(&self, prefix: Option<&str>) -> Vec<AllocatedCode> {
        let prefix = prefix.unwrap_or(DEFAULT_PREFIX);
        self.store
            .list_allocated()
            .into_iter()
            .filter_map(|slot| {
                let assignment = slot.assignment()?.clone();
                Some(AllocatedCode {
                    code: render(prefix, slot.base(), slot.checksum()),
                    level: assignment.target.kind,
                    target_id: assignment.target.id,
                    allocated_at: assignment.allocated_at,
                })
            })
            .collect()
    }

    /// Claim the lowest-numbered unallocated base for the target.
    ///
    /// Lowest-base-first keeps the assignment order deterministic and
    /// auditable. A lost race against a concurrent caller is retried with
    /// the next candidate from a re-fetched listing, bounded by the size of
    /// the first listing pass; exhausting either the pool or the retry
    /// budget fails with `PoolExhausted`.
    pub fn assign_next(
        &self,
        level: &str,
        target_id: &str,
        prefix: Option<&str>,
    ) -> AllocResult<String> {
        let prefix = prefix.unwrap_or(DEFAULT_PREFIX);
        let target = validate_target(level, target_id)?;

        let mut candidates = self.store.list_unallocated();
        if candidates.is_empty() {
            return Err(AllocError::PoolExhausted);
        }
        let budget = candidates.len();

        for _ in 0..budget {
            let Some(&(base, check)) = candidates.first() else {
                break;
            };
            match self.store.claim(base, &target) {
                ClaimOutcome::Claimed => {
                    let code = render(prefix, base, check);
                    log_claim("CODE_ASSIGNED", base, &target);
                    let remaining = self.store.list_unallocated().len();
                    if pool_running_low(remaining) {
                        let remaining = remaining.to_string();
                        Logger::warn("POOL_LOW", &[("remaining", remaining.as_str())]);
                    }
                    return Ok(code);
                }
                // Lost the race (or the snapshot was stale); take a fresh
                // listing and try the new lowest candidate.
                ClaimOutcome::AlreadyAllocated | ClaimOutcome::NotFound => {
                    candidates = self.store.list_unallocated();
                }
            }
        }
        Err(AllocError::PoolExhausted)
    }

    /// Bind one specific caller-chosen code to the target.
    ///
    /// The check digit is recomputed and compared even though seeding
    /// already enforced it: the caller may supply an arbitrary or stale
    /// string. An already-allocated slot is never overwritten, and a
    /// last-instant lost race surfaces `AlreadyAllocated` directly.
    pub fn bind_specific(
        &self,
        level: &str,
        target_id: &str,
        full_code: &str,
        prefix: Option<&str>,
    ) -> AllocResult<String> {
        let prefix = prefix.unwrap_or(DEFAULT_PREFIX);
        let parsed = FullCode::parse(full_code, prefix)?;

        let base = parsed.base();
        let expected = compute_checksum(&base);
        if expected != parsed.check() {
            return Err(AllocError::ChecksumMismatch {
                base,
                expected,
                found: parsed.check(),
            });
        }

        let target = validate_target(level, target_id)?;

        match self.store.get_by_base(base) {
            None => return Err(AllocError::NotFound(base)),
            Some(slot) if slot.is_allocated() => return Err(AllocError::AlreadyAllocated(base)),
            Some(_) => {}
        }

        match self.store.claim(base, &target) {
            ClaimOutcome::Claimed => {
                let code = render(prefix, base, expected);
                log_claim("CODE_BOUND", base, &target);
                Ok(code)
            }
            ClaimOutcome::AlreadyAllocated => Err(AllocError::AlreadyAllocated(base)),
            ClaimOutcome::NotFound => Err(AllocError::NotFound(base)),
        }
    }
}

fn render(prefix: &str, base: Base, check: CheckDigit) -> String {
    FullCode::new(prefix, base, check).to_string()
}

fn validate_target(level: &str, target_id: &str) -> AllocResult<AllocationTarget> {
    let kind =
        TargetKind::parse(level).ok_or_else(|| AllocError::UnsupportedLevel(level.to_string()))?;
    if target_id.trim().is_empty() {
        return Err(AllocError::MissingTarget(kind));
    }
    Ok(AllocationTarget::new(kind, target_id))
}

fn log_claim(event: &str, base: Base, target: &AllocationTarget) {
    let base = base.to_string();
    Logger::info(
        event,
        &[
            ("base", base.as_str()),
            ("level", target.kind.as_str()),
            ("target_id", target.id.as_str()),
        ],
    );
}
