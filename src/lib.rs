//! dialpool - USSD short-code allocation for SACCO transport payments
//!
//! A finite, pre-enumerated pool of 3-digit dial codes. Each code carries a
//! digital-root check digit and is claimed at most once for a SACCO or
//! MATATU entity. Once claimed, a code is never released.

pub mod allocator;
pub mod cli;
pub mod code;
pub mod observability;
pub mod pool;
