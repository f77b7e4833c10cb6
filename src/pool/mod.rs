//! Code Pool Store
//!
//! The pool holds one slot per possible base, created in bulk at seeding
//! time and mutated through exactly one operation: the atomic claim. There
//! is no release path; once a slot is allocated it stays allocated for the
//! lifetime of the pool.
//!
//! # Invariants enforced
//!
//! - One slot per base, unique
//! - A slot's check digit equals `compute_checksum(base)` from creation on
//! - An unallocated slot carries no assignment fields at all
//! - `allocated_at` is set exactly once, by the claim that wins the slot
//! - Two concurrent claims of one base produce exactly one winner

mod memory;
mod seed;
mod slot;
mod store;

pub use memory::MemoryPool;
pub use seed::{seed_slots, SeedError};
pub use slot::{AllocationTarget, Assignment, CodeSlot, TargetKind};
pub use store::{ClaimOutcome, PoolStore};
