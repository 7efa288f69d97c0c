//! # Host Data Model
//!
//! The values produced by a sweep:
//! * [`ProbeResult`]: the outcome of one liveness probe, reachable or not.
//! * [`HostRecord`]: an enriched, reachable host.
//! * [`ScanReport`]: the finished sweep, hosts ordered by last octet.
//!
//! Records and reports expose getters only; once built they do not change.

use std::net::Ipv4Addr;
use std::time::Duration;

use crate::network::address;
use crate::network::range::AddressSpace;

/// Placeholder for a lookup that failed or came back empty.
pub const NOT_AVAILABLE: &str = "N/A";

/// A single echo is either answered or lost, so anything short of total loss
/// counts as a live host.
pub const REACHABLE_LOSS_THRESHOLD: f64 = 0.99;

#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    pub address: Ipv4Addr,
    pub reachable: bool,
    pub round_trip_time: Duration,
    pub packet_loss: f64,
}

impl ProbeResult {
    pub fn from_loss(address: Ipv4Addr, packet_loss: f64, round_trip_time: Duration) -> Self {
        let packet_loss: f64 = packet_loss.clamp(0.0, 1.0);
        let reachable: bool = packet_loss <= REACHABLE_LOSS_THRESHOLD;
        Self {
            address,
            reachable,
            round_trip_time: if reachable { round_trip_time } else { Duration::ZERO },
            packet_loss,
        }
    }

    pub fn unreachable(address: Ipv4Addr) -> Self {
        Self {
            address,
            reachable: false,
            round_trip_time: Duration::ZERO,
            packet_loss: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRecord {
    address: Ipv4Addr,
    hostname: String,
    mac_address: String,
    round_trip_time: Duration,
    last_octet: u8,
}

impl HostRecord {
    /// Empty or missing lookups collapse to [`NOT_AVAILABLE`].
    pub fn new(
        address: Ipv4Addr,
        hostname: Option<String>,
        mac_address: Option<String>,
        round_trip_time: Duration,
    ) -> Self {
        Self {
            address,
            hostname: or_not_available(hostname),
            mac_address: or_not_available(mac_address),
            round_trip_time,
            last_octet: address::last_octet(&address),
        }
    }

    pub fn address(&self) -> Ipv4Addr {
        self.address
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn mac_address(&self) -> &str {
        &self.mac_address
    }

    pub fn round_trip_time(&self) -> Duration {
        self.round_trip_time
    }

    pub fn last_octet(&self) -> u8 {
        self.last_octet
    }
}

fn or_not_available(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Orders hosts by the last octet of their address.
pub fn sort_hosts(hosts: &mut [HostRecord]) {
    hosts.sort_by_key(|host| host.last_octet);
}

#[derive(Debug, Clone)]
pub struct ScanReport {
    space: AddressSpace,
    targets_scanned: usize,
    hosts_up: usize,
    elapsed: Duration,
    hosts: Vec<HostRecord>,
}

impl ScanReport {
    pub fn new(
        space: AddressSpace,
        targets_scanned: usize,
        mut hosts: Vec<HostRecord>,
        elapsed: Duration,
    ) -> Self {
        sort_hosts(&mut hosts);
        Self {
            space,
            targets_scanned,
            hosts_up: hosts.len(),
            elapsed,
            hosts,
        }
    }

    pub fn space(&self) -> &AddressSpace {
        &self.space
    }

    pub fn targets_scanned(&self) -> usize {
        self.targets_scanned
    }

    pub fn hosts_up(&self) -> usize {
        self.hosts_up
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn hosts(&self) -> &[HostRecord] {
        &self.hosts
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
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
