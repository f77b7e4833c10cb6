//! CLI argument definitions using clap
//!
//! Commands:
//! - dialpool init --pool <path> --start <n> --end <n>
//! - dialpool available --pool <path> [--prefix <p>]
//! - dialpool allocated --pool <path> [--prefix <p>]
//! - dialpool assign --pool <path> <LEVEL> <TARGET_ID> [--prefix <p>]
//! - dialpool bind --pool <path> <LEVEL> <TARGET_ID> <CODE> [--prefix <p>]
//! - dialpool verify <CODE> [--prefix <p>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// dialpool - USSD short-code pool administration
#[derive(Parser, Debug)]
#[command(name = "dialpool")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Seed a new pool file over a numeric base range
    Init {
        /// Path to the pool file
        #[arg(long, default_value = "./pool.json")]
        pool: PathBuf,

        /// First base of the range (inclusive)
        #[arg(long, default_value_t = 100)]
        start: u16,

        /// Last base of the range (inclusive)
        #[arg(long, default_value_t = 999)]
        end: u16,
    },

    /// List every unallocated code, ascending by base
    Available {
        /// Path to the pool file
        #[arg(long, default_value = "./pool.json")]
        pool: PathBuf,

        /// Dial prefix to render codes with
        #[arg(long)]
        prefix: Option<String>,
    },

    /// List every allocated code, most recent first
    Allocated {
        /// Path to the pool file
        #[arg(long, default_value = "./pool.json")]
        pool: PathBuf,

        /// Dial prefix to render codes with
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Assign the lowest available code to a target
    Assign {
        /// Path to the pool file
        #[arg(long, default_value = "./pool.json")]
        pool: PathBuf,

        /// Organizational level: SACCO or MATATU
        level: String,

        /// Identifier of the owning entity
        target_id: String,

        /// Dial prefix to render the code with
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Bind one specific code to a target
    Bind {
        /// Path to the pool file
        #[arg(long, default_value = "./pool.json")]
        pool: PathBuf,

        /// Organizational level: SACCO or MATATU
        level: String,

        /// Identifier of the owning entity
        target_id: String,

        /// The full code to bind, e.g. *001*1102#
        code: String,

        /// Dial prefix the code is expected to carry
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Check a code's digits against its check digit
    Verify {
        /// The full code to verify
        code: String,

        /// Dial prefix the code is expected to carry
        #[arg(long)]
        prefix: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
