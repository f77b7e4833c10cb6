//! In-memory pool store
//!
//! A `Mutex<BTreeMap>` keyed by base. The map order gives the ascending
//! unallocated listing for free; the mutex makes the claim's check-and-flip
//! a single atomic step. Listing operations copy a snapshot out under the
//! lock and never hold it across caller code.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use chrono::Utc;

use crate::code::{Base, CheckDigit};

use super::seed::{seed_slots, SeedError};
use super::slot::{AllocationTarget, CodeSlot};
use super::store::{ClaimOutcome, PoolStore};

/// Process-local implementation of [`PoolStore`].
#[derive(Debug)]
pub struct MemoryPool {
    slots: Mutex<BTreeMap<Base, CodeSlot>>,
}

impl MemoryPool {
    /// Build a pool from existing slots, rejecting duplicate bases.
    pub fn from_slots(slots: impl IntoIterator<Item = CodeSlot>) -> Result<Self, SeedError> {
        let mut map = BTreeMap::new();
        for slot in slots {
            let base = slot.base();
            if map.insert(base, slot).is_some() {
                return Err(SeedError::DuplicateBase(base));
            }
        }
        Ok(Self {
            slots: Mutex::new(map),
        })
    }

    /// Seed a fresh pool covering the inclusive numeric range.
    pub fn seeded(start: u16, end: u16) -> Result<Self, SeedError> {
        Self::from_slots(seed_slots(start, end)?)
    }

    /// Snapshot of every slot, ascending by base. Used for persistence of
    /// the pool file; not part of the store contract.
    pub fn snapshot(&self) -> Vec<CodeSlot> {
        self.lock().values().cloned().collect()
    }

    /// Total number of slots, allocated or not.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Critical sections are short and mutate at most one slot, so a
    // poisoned lock cannot hold a half-applied claim; recover the guard.
    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<Base, CodeSlot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PoolStore for MemoryPool {
    fn list_unallocated(&self) -> Vec<(Base, CheckDigit)> {
        self.lock()
            .values()
            .filter(|slot| !slot.is_allocated())
            .map(|slot| (slot.base(), slot.checksum()))
            .collect()
    }

    fn list_allocated(&self) -> Vec<CodeSlot> {
        let mut allocated: Vec<CodeSlot> = self
            .lock()
            .values()
            .filter(|slot| slot.is_allocated())
            .cloned()
            .collect();
        // Most recent first; base descending breaks timestamp ties so the
        // order is total.
        allocated.sort_by(|a, b| {
            let at_a = a.assignment().map(|x| x.allocated_at);
            let at_b = b.assignment().map(|x| x.allocated_at);
            at_b.cmp(&at_a).then(b.base().cmp(&a.base()))
        });
        allocated
    }

    fn get_by_base(&self, base: Base) -> Option<CodeSlot> {
        self.lock().get(&base).cloned()
    }

    fn claim(&self, base: Base, target: &AllocationTarget) -> ClaimOutcome {
        let mut slots = self.lock();
        match slots.get_mut(&base) {
            None => ClaimOutcome::NotFound,
            Some(slot) if slot.is_allocated() => ClaimOutcome::AlreadyAllocated,
            Some(slot) => {
                slot.assign(target.clone(), Utc::now());
                ClaimOutcome::Claimed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::slot::TargetKind;

    fn base(text: &str) -> Base {
        Base::parse(text).unwrap()
    }

    fn pool_of(bases: &[&str]) -> MemoryPool {
        MemoryPool::from_slots(
            bases
                .iter()
                .map(|b| CodeSlot::unallocated(Base::parse(b).unwrap())),
        )
        .unwrap()
    }

    fn target(id: &str) -> AllocationTarget {
        AllocationTarget::new(TargetKind::Sacco, id)
    }

    #[test]
    fn test_from_slots_rejects_duplicate_base() {
        let result = MemoryPool::from_slots(vec![
            CodeSlot::unallocated(base("110")),
            CodeSlot::unallocated(base("110")),
        ]);
        assert!(matches!(result, Err(SeedError::DuplicateBase(b)) if b == base("110")));
    }

    #[test]
    fn test_list_unallocated_ascending() {
        let pool = pool_of(&["120", "110", "115"]);
        let bases: Vec<String> = pool
            .list_unallocated()
            .iter()
            .map(|(b, _)| b.to_string())
            .collect();
        assert_eq!(bases, vec!["110", "115", "120"]);
    }

    #[test]
    fn test_claim_flips_exactly_once() {
        let pool = pool_of(&["110"]);
        assert_eq!(pool.claim(base("110"), &target("A1")), ClaimOutcome::Claimed);
        assert_eq!(
            pool.claim(base("110"), &target("A2")),
            ClaimOutcome::AlreadyAllocated
        );

        let slot = pool.get_by_base(base("110")).unwrap();
        assert_eq!(slot.assignment().unwrap().target.id, "A1");
    }

    #[test]
    fn test_claim_unknown_base_is_not_found() {
        let pool = pool_of(&["110"]);
        assert_eq!(
            pool.claim(base("999"), &target("A1")),
            ClaimOutcome::NotFound
        );
    }

    #[test]
    fn test_claimed_slot_leaves_unallocated_listing() {
        let pool = pool_of(&["110", "115"]);
        pool.claim(base("110"), &target("A1"));

        let unallocated = pool.list_unallocated();
        assert_eq!(unallocated.len(), 1);
        assert_eq!(unallocated[0].0, base("115"));
    }

    #[test]
    fn test_list_allocated_most_recent_first() {
        let pool = pool_of(&["110", "115", "120"]);
        pool.claim(base("115"), &target("FIRST"));
        std::thread::sleep(std::time::Duration::from_millis(5));
        pool.claim(base("110"), &target("SECOND"));

        let allocated = pool.list_allocated();
        assert_eq!(allocated.len(), 2);
        assert_eq!(allocated[0].assignment().unwrap().target.id, "SECOND");
        assert_eq!(allocated[1].assignment().unwrap().target.id, "FIRST");
    }

    #[test]
    fn test_snapshot_preserves_assignments() {
        let pool = pool_of(&["110", "115"]);
        pool.claim(base("110"), &target("A1"));

        let snapshot = pool.snapshot();
        let restored = MemoryPool::from_slots(snapshot).unwrap();
        assert!(restored.get_by_base(base("110")).unwrap().is_allocated());
        assert!(!restored.get_by_base(base("115")).unwrap().is_allocated());
    }
}
