use std::time::Duration;

use crate::error::SweepError;

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(750);
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_millis(500);
pub const DEFAULT_CONCURRENCY: usize = 256;

pub const MAX_PROBE_TIMEOUT: Duration = Duration::from_secs(60);
pub const MAX_CONCURRENCY: usize = 1024;

#[derive(Debug, Clone)]
pub struct Config {
    /// Upper bound for the single echo sent to each host.
    pub probe_timeout: Duration,

    /// Upper bound for each enrichment lookup (hostname and MAC separately).
    pub lookup_timeout: Duration,

    /// Maximum number of probe+enrich tasks in flight at once.
    pub concurrency: usize,

    /// Skips reverse DNS entirely; hostnames are reported as unavailable.
    pub no_dns: bool,

    /// 0 prints everything, 1 hides decoration, 2 prints only the summary.
    pub quiet: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
            no_dns: false,
            quiet: 0,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), SweepError> {
        if self.probe_timeout.is_zero() || self.probe_timeout > MAX_PROBE_TIMEOUT {
            return Err(SweepError::InvalidConfig(format!(
                "probe timeout must be between 1ms and {}s",
                MAX_PROBE_TIMEOUT.as_secs()
            )));
        }
        if self.lookup_timeout.is_zero() {
            return Err(SweepError::InvalidConfig(
                "lookup timeout must be at least 1ms".to_string(),
            ));
        }
        if self.concurrency == 0 || self.concurrency > MAX_CONCURRENCY {
            return Err(SweepError::InvalidConfig(format!(
                "concurrency must be between 1 and {MAX_CONCURRENCY}"
            )));
        }
        Ok(())
    }

    /// Worst case wall time of a sweep over `targets` addresses.
    pub fn worst_case_duration(&self, targets: usize) -> Duration {
        let waves: u32 = targets.div_ceil(self.concurrency.max(1)) as u32;
        (self.probe_timeout + self.lookup_timeout) * waves
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
