//! The sweep coordinator.
//!
//! One task per target address, at most `concurrency` of them alive at any
//! time. The dispatch loop takes a semaphore permit *before* spawning, so it
//! parks itself once the cap is reached and resumes as tasks finish. Each task
//! hands its result back through the [`JoinSet`]; the coordinator is the only
//! owner of the result list, so there is nothing for tasks to race on.
//!
//! The count of live hosts is the length of that list, read after every task
//! has been joined.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use netsweep_common::config::Config;
use netsweep_common::error::SweepError;
use netsweep_common::network::host::{HostRecord, ProbeResult, ScanReport};
use netsweep_common::network::range::AddressSpace;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error};

pub mod prober;
pub mod resolver;

use prober::Prober;
use resolver::Enricher;

/// Called with `(completed, total)` each time a task is joined.
pub type ProgressCallback = Box<dyn Fn(usize, usize) + Send + Sync>;

pub struct ScanCoordinator {
    prober: Prober,
    enricher: Enricher,
    probe_timeout: Duration,
    concurrency: usize,
    on_progress: Option<ProgressCallback>,
}

impl ScanCoordinator {
    /// Fails with `InvalidConfig` unless `cfg` passes [`Config::validate`].
    pub fn new(prober: Prober, enricher: Enricher, cfg: &Config) -> Result<Self, SweepError> {
        cfg.validate()?;
        Ok(Self {
            prober,
            enricher,
            probe_timeout: cfg.probe_timeout,
            concurrency: cfg.concurrency,
            on_progress: None,
        })
    }

    pub fn with_progress(mut self, on_progress: ProgressCallback) -> Self {
        self.on_progress = Some(on_progress);
        self
    }

    /// Sweeps `space` and returns once every probe is done.
    pub async fn run(&self, space: AddressSpace) -> Result<ScanReport, SweepError> {
        let start_time: Instant = Instant::now();

        let targets: Vec<Ipv4Addr> = space.enumerate();
        let total: usize = targets.len();
        debug!(subnet = %space, total, concurrency = self.concurrency, "dispatching sweep");

        let semaphore: Arc<Semaphore> = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks: JoinSet<Option<HostRecord>> = JoinSet::new();
        let mut collector = Collector::new(total, self.on_progress.as_ref());

        for address in targets {
            let permit: OwnedSemaphorePermit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    tasks.abort_all();
                    return Err(SweepError::Interrupted(e.to_string()));
                }
            };

            let prober: Prober = self.prober.clone();
            let enricher: Enricher = self.enricher.clone();
            let probe_timeout: Duration = self.probe_timeout;

            tasks.spawn(async move {
                let _permit: OwnedSemaphorePermit = permit;
                sweep_host(&prober, &enricher, address, probe_timeout).await
            });

            while let Some(joined) = tasks.try_join_next() {
                collector.collect(joined);
            }
        }

        while let Some(joined) = tasks.join_next().await {
            collector.collect(joined);
        }

        let elapsed: Duration = start_time.elapsed();
        Ok(ScanReport::new(space, total, collector.into_hosts(), elapsed))
    }
}

/// Probe, and enrich only what answered.
async fn sweep_host(
    prober: &Prober,
    enricher: &Enricher,
    address: Ipv4Addr,
    probe_timeout: Duration,
) -> Option<HostRecord> {
    let probe: ProbeResult = prober.probe(address, probe_timeout).await;
    if !probe.reachable {
        return None;
    }

    let (hostname, mac_address) = enricher.enrich(address).await;
    debug!(%address, rtt = ?probe.round_trip_time, %hostname, %mac_address, "host is up");

    Some(HostRecord::new(
        address,
        Some(hostname),
        Some(mac_address),
        probe.round_trip_time,
    ))
}

struct Collector<'a> {
    hosts: Vec<HostRecord>,
    completed: usize,
    total: usize,
    on_progress: Option<&'a ProgressCallback>,
}

impl<'a> Collector<'a> {
    fn new(total: usize, on_progress: Option<&'a ProgressCallback>) -> Self {
        Self {
            hosts: Vec::new(),
            completed: 0,
            total,
            on_progress,
        }
    }

    fn collect(&mut self, joined: Result<Option<HostRecord>, JoinError>) {
        match joined {
            Ok(Some(host)) => self.hosts.push(host),
            Ok(None) => {}
            Err(e) => error!("sweep task did not complete: {e}"),
        }

        self.completed += 1;
        if let Some(on_progress) = self.on_progress {
            on_progress(self.completed, self.total);
        }
    }

    fn into_hosts(self) -> Vec<HostRecord> {
        self.hosts
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
