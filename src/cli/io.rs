//! Pool-file I/O and JSON output for the CLI
//!
//! The pool file is a JSON snapshot of every slot. It is operator tooling
//! for one process at a time: claims are atomic within the process that
//! loaded the file, and concurrent CLI invocations against one file are
//! unsupported. Every load re-verifies each slot's check digit; a snapshot
//! that fails verification is rejected rather than repaired.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::pool::{CodeSlot, MemoryPool};

use super::errors::{CliError, CliResult};

/// Current pool-file format version.
pub const POOL_FILE_VERSION: u32 = 1;

/// On-disk shape of the pool snapshot.
#[derive(Debug, Serialize, Deserialize)]
pub struct PoolFile {
    pub version: u32,
    pub slots: Vec<CodeSlot>,
}

/// Load and validate a pool snapshot.
pub fn load_pool(path: &Path) -> CliResult<MemoryPool> {
    let content = fs::read_to_string(path).map_err(|e| {
        CliError::pool_file_error(format!("failed to read {}: {}", path.display(), e))
    })?;
    let file: PoolFile = serde_json::from_str(&content)?;

    if file.version != POOL_FILE_VERSION {
        return Err(CliError::pool_file_error(format!(
            "unsupported pool file version {} (expected {})",
            file.version, POOL_FILE_VERSION
        )));
    }
    for slot in &file.slots {
        if !slot.checksum_is_consistent() {
            return Err(CliError::pool_corrupted(format!(
                "check digit {} does not match base {}",
                slot.checksum(),
                slot.base()
            )));
        }
    }

    MemoryPool::from_slots(file.slots)
        .map_err(|e| CliError::pool_corrupted(e.to_string()))
}

/// Save a pool snapshot, replacing the file atomically.
pub fn save_pool(path: &Path, pool: &MemoryPool) -> CliResult<()> {
    let file = PoolFile {
        version: POOL_FILE_VERSION,
        slots: pool.snapshot(),
    };
    let content = serde_json::to_string_pretty(&file)?;

    // Write to a sibling temp file and rename so a crash mid-write cannot
    // truncate the snapshot.
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, content).map_err(|e| {
        CliError::pool_file_error(format!("failed to write {}: {}", tmp.display(), e))
    })?;
    fs::rename(&tmp, path).map_err(|e| {
        CliError::pool_file_error(format!("failed to replace {}: {}", path.display(), e))
    })?;
    Ok(())
}

/// Write a success response to stdout.
pub fn write_response(data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::errors::CliErrorCode;
    use crate::code::Base;
    use crate::pool::PoolStore;
    use crate::pool::{AllocationTarget, TargetKind};

    #[test]
    fn test_pool_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pool.json");

        let pool = MemoryPool::seeded(100, 105).unwrap();
        pool.claim(
            Base::parse("100").unwrap(),
            &AllocationTarget::new(TargetKind::Sacco, "A1"),
        );
        save_pool(&path, &pool).unwrap();

        let loaded = load_pool(&path).unwrap();
        assert_eq!(loaded.len(), 6);
        let slot = loaded.get_by_base(Base::parse("100").unwrap()).unwrap();
        assert_eq!(slot.assignment().unwrap().target.id, "A1");
    }

    #[test]
    fn test_load_rejects_tampered_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pool.json");
        fs::write(
            &path,
            r#"{"version":1,"slots":[{"base":"110","checksum":9}]}"#,
        )
        .unwrap();

        let err = load_pool(&path).unwrap_err();
        assert_eq!(err.code(), CliErrorCode::PoolCorrupted);
    }

    #[test]
    fn test_load_rejects_unknown_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pool.json");
        fs::write(&path, r#"{"version":2,"slots":[]}"#).unwrap();
        assert!(load_pool(&path).is_err());
    }

    #[test]
    fn test_load_missing_file_is_pool_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_pool(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.code(), CliErrorCode::PoolFileError);
    }
}
