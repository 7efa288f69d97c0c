//! # Network Discovery Service
//!
//! Implements the "sweep my subnet" use case end to end.
//!
//! [`resolve_space`] decides *where* to sweep (an explicit base address or the
//! local interface's IPv4). The service wires the concrete network adapters
//! into a [`ScanCoordinator`], which decides *how*.

use std::net::Ipv4Addr;
use std::sync::Arc;

use netsweep_common::config::Config;
use netsweep_common::error::SweepError;
use netsweep_common::network::host::ScanReport;
use netsweep_common::network::interface;
use netsweep_common::network::range::AddressSpace;

use crate::network::arp::{ArpCache, MacLookup};
use crate::network::dns::{HostnameLookup, SystemDns};
use crate::network::transport::{EchoTransport, IcmpTransport};
use crate::scanner::prober::Prober;
use crate::scanner::resolver::Enricher;
use crate::scanner::{ProgressCallback, ScanCoordinator};

/// Application Service for Network Discovery.
///
/// Validates the configuration once, applies `no_dns`, and hands each sweep to
/// the [`ScanCoordinator`].
pub struct DiscoveryService {
    coordinator: ScanCoordinator,
}

impl DiscoveryService {
    pub fn new(
        transport: Arc<dyn EchoTransport>,
        hostnames: Arc<dyn HostnameLookup>,
        macs: Arc<dyn MacLookup>,
        cfg: &Config,
    ) -> Result<Self, SweepError> {
        let hostnames: Option<Arc<dyn HostnameLookup>> = (!cfg.no_dns).then_some(hostnames);
        let enricher: Enricher = Enricher::new(hostnames, macs, cfg.lookup_timeout);
        let coordinator: ScanCoordinator = ScanCoordinator::new(Prober::new(transport), enricher, cfg)?;

        Ok(Self { coordinator })
    }

    /// ICMP echo, system resolver and the OS neighbour cache.
    pub fn system(cfg: &Config) -> Result<Self, SweepError> {
        Self::new(
            Arc::new(IcmpTransport::new()),
            Arc::new(SystemDns),
            Arc::new(ArpCache),
            cfg,
        )
    }

    pub fn with_progress(mut self, on_progress: ProgressCallback) -> Self {
        self.coordinator = self.coordinator.with_progress(on_progress);
        self
    }

    /// Executes one sweep of `space`.
    pub async fn perform_discovery(&self, space: AddressSpace) -> Result<ScanReport, SweepError> {
        self.coordinator.run(space).await
    }
}

/// Picks the /24 to sweep: the one around `base`, or around the local
/// address when no base is given.
///
/// The discovered local address goes through the same strict check as a
/// user-supplied one.
pub fn resolve_space(base: Option<&str>) -> Result<AddressSpace, SweepError> {
    match base {
        Some(raw) => raw.trim().parse(),
        None => {
            let local: Ipv4Addr = interface::discover_local_ipv4()?;
            local.to_string().parse().map_err(|_| SweepError::NoUsableAddress)
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
