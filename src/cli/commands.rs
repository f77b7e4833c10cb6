//! CLI command implementations
//!
//! Each command loads the pool snapshot, runs one allocator operation, and
//! saves the snapshot back if anything was claimed. Responses are single
//! JSON objects on stdout.

use std::path::Path;

use serde_json::json;

use crate::allocator::Allocator;
use crate::code::{compute_checksum, FullCode, DEFAULT_PREFIX};
use crate::observability::Logger;
use crate::pool::{seed_slots, MemoryPool};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{load_pool, save_pool, write_response};

/// Dispatch a parsed command.
pub fn run_command(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Init { pool, start, end } => init(&pool, start, end),
        Command::Available { pool, prefix } => available(&pool, prefix.as_deref()),
        Command::Allocated { pool, prefix } => allocated(&pool, prefix.as_deref()),
        Command::Assign {
            pool,
            level,
            target_id,
            prefix,
        } => assign(&pool, &level, &target_id, prefix.as_deref()),
        Command::Bind {
            pool,
            level,
            target_id,
            code,
            prefix,
        } => bind(&pool, &level, &target_id, &code, prefix.as_deref()),
        Command::Verify { code, prefix } => verify(&code, prefix.as_deref()),
    }
}

/// Seed a new pool file. Refuses to clobber an existing one.
pub fn init(path: &Path, start: u16, end: u16) -> CliResult<()> {
    if path.exists() {
        return Err(CliError::already_initialized(format!(
            "pool file {} already exists",
            path.display()
        )));
    }
    let slots = seed_slots(start, end)?;
    let count = slots.len();
    let pool = MemoryPool::from_slots(slots)
        .map_err(|e| CliError::pool_corrupted(e.to_string()))?;
    save_pool(path, &pool)?;

    let count_str = count.to_string();
    Logger::info("POOL_SEEDED", &[("slots", count_str.as_str())]);
    write_response(json!({
        "pool": path.display().to_string(),
        "slots": count,
    }))
}

/// List unallocated codes.
pub fn available(path: &Path, prefix: Option<&str>) -> CliResult<()> {
    let allocator = Allocator::new(load_pool(path)?);
    let codes = allocator.list_available(prefix);
    write_response(json!({ "available": codes }))
}

/// List allocated codes, most recent first.
pub fn allocated(path: &Path, prefix: Option<&str>) -> CliResult<()> {
    let allocator = Allocator::new(load_pool(path)?);
    let codes = allocator.list_allocated(prefix);
    write_response(json!({ "allocated": codes }))
}

/// Assign the lowest available code and persist the claim.
pub fn assign(path: &Path, level: &str, target_id: &str, prefix: Option<&str>) -> CliResult<()> {
    let allocator = Allocator::new(load_pool(path)?);
    let code = allocator.assign_next(level, target_id, prefix)?;
    save_pool(path, allocator.store())?;
    write_response(json!({ "code": code }))
}

/// Bind one specific code and persist the claim.
pub fn bind(
    path: &Path,
    level: &str,
    target_id: &str,
    code: &str,
    prefix: Option<&str>,
) -> CliResult<()> {
    let allocator = Allocator::new(load_pool(path)?);
    let code = allocator.bind_specific(level, target_id, code, prefix)?;
    save_pool(path, allocator.store())?;
    write_response(json!({ "code": code }))
}

/// Verify a code's check digit without touching any pool.
pub fn verify(code: &str, prefix: Option<&str>) -> CliResult<()> {
    let prefix = prefix.unwrap_or(DEFAULT_PREFIX);
    let parsed = FullCode::parse(code, prefix)?;
    let expected = compute_checksum(&parsed.base());
    write_response(json!({
        "base": parsed.base().to_string(),
        "check": parsed.check().value(),
        "expected": expected.value(),
        "valid": parsed.check() == expected,
    }))
}
