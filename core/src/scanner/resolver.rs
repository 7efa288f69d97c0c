//! Best-effort enrichment of a live host.
//!
//! Hostname and MAC are looked up side by side, each under its own deadline.
//! Whatever goes wrong with one of them only costs that field: it is reported
//! as [`NOT_AVAILABLE`] and the other lookup carries on untouched.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use netsweep_common::network::host::NOT_AVAILABLE;
use pnet::util::MacAddr;
use tokio::time::timeout;
use tracing::trace;

use crate::network::arp::MacLookup;
use crate::network::dns::HostnameLookup;

#[derive(Clone)]
pub struct Enricher {
    hostnames: Option<Arc<dyn HostnameLookup>>,
    macs: Arc<dyn MacLookup>,
    lookup_timeout: Duration,
}

impl Enricher {
    /// Passing `None` for `hostnames` disables reverse DNS.
    pub fn new(
        hostnames: Option<Arc<dyn HostnameLookup>>,
        macs: Arc<dyn MacLookup>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            hostnames,
            macs,
            lookup_timeout,
        }
    }

    /// Returns `(hostname, mac_address)` as display strings.
    pub async fn enrich(&self, address: Ipv4Addr) -> (String, String) {
        let (hostname, mac) = tokio::join!(self.resolve_hostname(address), self.resolve_mac(address));
        (
            hostname.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            mac.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        )
    }

    async fn resolve_hostname(&self, address: Ipv4Addr) -> Option<String> {
        let lookup = self.hostnames.as_ref()?;

        match timeout(self.lookup_timeout, lookup.lookup_hostname(address)).await {
            Ok(Ok(names)) => names.into_iter().find_map(|name| normalize(address, &name)),
            Ok(Err(e)) => {
                trace!(%address, error = %e, "hostname lookup failed");
                None
            }
            Err(_elapsed) => {
                trace!(%address, "hostname lookup timed out");
                None
            }
        }
    }

    async fn resolve_mac(&self, address: Ipv4Addr) -> Option<String> {
        match timeout(self.lookup_timeout, self.macs.lookup_mac(address)).await {
            Ok(Ok(mac)) => mac
                .filter(|mac| *mac != MacAddr::zero())
                .map(|mac| mac.to_string()),
            Ok(Err(e)) => {
                trace!(%address, error = %e, "MAC lookup failed");
                None
            }
            Err(_elapsed) => {
                trace!(%address, "MAC lookup timed out");
                None
            }
        }
    }
}

/// Drops the root label's trailing dot. Empty names and the numeric address
/// echoed back by `getnameinfo` when no PTR record exists are not names.
fn normalize(address: Ipv4Addr, name: &str) -> Option<String> {
    let name: &str = name.trim().trim_end_matches('.');
    if name.is_empty() || name == address.to_string() {
        return None;
    }
    Some(name.to_string())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
