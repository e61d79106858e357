//! CLI argument parsing module for modup

use clap::Parser;
use std::time::Duration;

/// Interactive Go module upgrader with changelog lookup
#[derive(Parser, Debug, Clone)]
#[command(
    name = "modup",
    version,
    about = "Interactively upgrade outdated Go modules"
)]
pub struct CliArgs {
    /// Dry run mode - show the upgrade commands without running them
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Upgrade all modules without prompting
    #[arg(short = 'a', long)]
    pub all: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output, no progress display
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Timeout in seconds for changelog search requests
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Path to the go binary
    #[arg(long, default_value = "go")]
    pub go_bin: String,

    /// Override the listing line pattern (must define three capture groups)
    #[arg(long)]
    pub module_pattern: Option<String>,
}

impl CliArgs {
    /// Search request timeout as a Duration
    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}
