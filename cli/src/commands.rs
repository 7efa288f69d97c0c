pub mod discover;

use std::time::Duration;

use clap::{ArgAction, Parser};
use netsweep_common::config::{self, Config};

#[derive(Parser)]
#[command(name = "netsweep")]
#[command(version, about = "A lightweight LAN sweeper: finds every live host on your /24.")]
pub struct CommandLine {
    /// Sweep the /24 around this address instead of the local one
    #[arg(short, long, value_name = "IPV4")]
    pub base: Option<String>,

    /// Probe timeout per host, in milliseconds
    #[arg(
        short,
        long,
        value_name = "MS",
        default_value_t = config::DEFAULT_PROBE_TIMEOUT.as_millis() as u64,
        value_parser = clap::value_parser!(u64).range(1..=60_000)
    )]
    pub timeout: u64,

    /// Maximum number of hosts probed at the same time
    #[arg(
        short = 'k',
        long,
        value_name = "K",
        default_value_t = config::DEFAULT_CONCURRENCY as u16,
        value_parser = clap::value_parser!(u16).range(1..=1024)
    )]
    pub concurrency: u16,

    /// Deadline for each hostname or MAC lookup, in milliseconds
    #[arg(
        long,
        value_name = "MS",
        default_value_t = config::DEFAULT_LOOKUP_TIMEOUT.as_millis() as u64,
        value_parser = clap::value_parser!(u64).range(1..=10_000)
    )]
    pub lookup_timeout: u64,

    /// Skip reverse DNS lookups
    #[arg(short, long)]
    pub no_dns: bool,

    /// Less output; repeat to print only the summary
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,

    /// Log every probe and lookup
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        Config {
            probe_timeout: Duration::from_millis(self.timeout),
            lookup_timeout: Duration::from_millis(self.lookup_timeout),
            concurrency: self.concurrency as usize,
            no_dns: self.no_dns,
            quiet: self.quiet.min(2),
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
