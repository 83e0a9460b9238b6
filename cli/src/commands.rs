pub mod info;
pub mod probe;
pub mod sweep;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use labwire_common::config::{
    Config, DEFAULT_CONCURRENCY, DEFAULT_RETRY_INTERVAL_MS, DEFAULT_TIMEOUT_MS, ProbeConfig,
    RetryPolicy,
};

#[derive(Parser)]
#[command(name = "labwire")]
#[command(version, about = "Reachability checks for laboratory instruments.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Deadline of a single connection attempt, in milliseconds
    #[arg(
        long,
        global = true,
        env = "LABWIRE_TIMEOUT_MS",
        default_value_t = DEFAULT_TIMEOUT_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_ms: u64,

    /// Attempts per instrument, including the first
    #[arg(long, global = true, default_value_t = 1)]
    pub attempts: u32,

    /// Pause between attempts, in milliseconds
    #[arg(long, global = true, default_value_t = DEFAULT_RETRY_INTERVAL_MS)]
    pub retry_interval_ms: u64,

    /// Maximum number of instruments probed at once
    #[arg(long, global = true, env = "LABWIRE_CONCURRENCY", default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Print results as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Reduce output (-q drops decorations, -qq prints outcomes only)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Do not print the start-up banner
    #[arg(long, global = true)]
    pub no_banner: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show version and effective probe settings
    #[command(alias = "i")]
    Info,
    /// Check whether an instrument accepts TCP connections
    #[command(alias = "p")]
    Probe { ip: String, port: String },
    /// Probe every instrument listed in an inventory file
    #[command(alias = "s")]
    Sweep { inventory: PathBuf },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        Config {
            no_banner: self.no_banner || self.json,
            quiet: self.quiet,
            json: self.json,
            probe: ProbeConfig {
                timeout: Duration::from_millis(self.timeout_ms),
                concurrency: self.concurrency.max(1),
                retry: RetryPolicy {
                    attempts: self.attempts.max(1),
                    interval: Duration::from_millis(self.retry_interval_ms),
                },
            },
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
