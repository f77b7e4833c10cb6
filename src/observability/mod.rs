//! Observability for dialpool
//!
//! Structured JSON logging only. Logging is read-only with respect to the
//! pool: no log statement may influence allocation outcomes.
//!
//! # Principles
//!
//! 1. One log line = one event
//! 2. Synchronous, no buffering
//! 3. Deterministic key ordering

mod logger;

pub use logger::{Logger, Severity};
