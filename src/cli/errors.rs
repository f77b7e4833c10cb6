//! CLI-specific error types
//!
//! CLI errors terminate the invocation with a non-zero exit code; the
//! message printed to stderr carries a stable code string for scripting.

use std::fmt;
use std::io;

use crate::allocator::AllocError;
use crate::code::FormatError;
use crate::pool::SeedError;

/// CLI error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Pool file missing or unreadable
    PoolFileError,
    /// Pool file contents fail validation
    PoolCorrupted,
    /// Pool file already exists at init time
    AlreadyInitialized,
    /// stdin/stdout failure
    IoError,
    /// Invalid seed range
    SeedError,
    /// Malformed code text supplied to a read-only check
    InvalidCode,
    /// The allocation request was rejected
    AllocationRejected,
}

impl CliErrorCode {
    /// Stable code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::PoolFileError => "DIAL_CLI_POOL_FILE_ERROR",
            Self::PoolCorrupted => "DIAL_CLI_POOL_CORRUPTED",
            Self::AlreadyInitialized => "DIAL_CLI_ALREADY_INITIALIZED",
            Self::IoError => "DIAL_CLI_IO_ERROR",
            Self::SeedError => "DIAL_CLI_SEED_ERROR",
            Self::InvalidCode => "DIAL_CLI_INVALID_CODE",
            Self::AllocationRejected => "DIAL_CLI_ALLOCATION_REJECTED",
        }
    }
}

/// CLI error.
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn pool_file_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::PoolFileError, msg)
    }

    pub fn pool_corrupted(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::PoolCorrupted, msg)
    }

    pub fn already_initialized(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::AlreadyInitialized, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Returns the error code.
    pub fn code(&self) -> CliErrorCode {
        self.code
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::pool_file_error(format!("invalid pool file JSON: {}", e))
    }
}

impl From<SeedError> for CliError {
    fn from(e: SeedError) -> Self {
        Self::new(CliErrorCode::SeedError, e.to_string())
    }
}

impl From<AllocError> for CliError {
    fn from(e: AllocError) -> Self {
        Self::new(CliErrorCode::AllocationRejected, e.to_string())
    }
}

// Only read-only checks (`verify`) convert a bare FormatError; malformed
// codes inside an allocation request arrive wrapped in AllocError instead.
impl From<FormatError> for CliError {
    fn from(e: FormatError) -> Self {
        Self::new(CliErrorCode::InvalidCode, e.to_string())
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_stable_code() {
        let err = CliError::pool_corrupted("checksum mismatch on base 110");
        let text = format!("{}", err);
        assert!(text.contains("DIAL_CLI_POOL_CORRUPTED"));
        assert!(text.contains("base 110"));
    }

    #[test]
    fn test_alloc_error_maps_to_rejection() {
        let err: CliError = AllocError::PoolExhausted.into();
        assert_eq!(err.code(), CliErrorCode::AllocationRejected);
    }

    #[test]
    fn test_bare_format_error_maps_to_invalid_code() {
        let err: CliError = FormatError::ZeroBase.into();
        assert_eq!(err.code(), CliErrorCode::InvalidCode);
    }

    #[test]
    fn test_format_error_inside_allocation_stays_rejection() {
        let err: CliError = AllocError::Format(FormatError::ZeroBase).into();
        assert_eq!(err.code(), CliErrorCode::AllocationRejected);
    }
}
