//! CLI module for dialpool
//!
//! Provides the administrative command-line interface:
//! - init: seed a new pool file
//! - available / allocated: listing
//! - assign / bind: claim codes
//! - verify: check a code's check digit

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{allocated, assign, available, bind, init, run_command, verify};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{load_pool, save_pool, PoolFile, POOL_FILE_VERSION};

/// Parse arguments and run the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli)
}
