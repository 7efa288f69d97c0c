//! Scriptable stand-ins for the network adapters.

use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use netsweep_common::config::Config;
use netsweep_core::discovery::DiscoveryService;
use netsweep_core::error::{LookupError, TransportError};
use netsweep_core::network::arp::MacLookup;
use netsweep_core::network::dns::HostnameLookup;
use netsweep_core::network::transport::{EchoReply, EchoTransport};
use pnet::util::MacAddr;

/// A /24 whose behaviour is decided per last octet.
#[derive(Default)]
pub struct MockNetwork {
    reachable: HashSet<u8>,
    failing: HashSet<u8>,
    hanging: HashSet<u8>,
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    started: AtomicUsize,
    finished: AtomicUsize,
}

impl MockNetwork {
    pub fn new(reachable: impl IntoIterator<Item = u8>) -> Self {
        Self {
            reachable: reachable.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn failing(mut self, octets: impl IntoIterator<Item = u8>) -> Self {
        self.failing = octets.into_iter().collect();
        self
    }

    pub fn hanging(mut self, octets: impl IntoIterator<Item = u8>) -> Self {
        self.hanging = octets.into_iter().collect();
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn finished(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

/// Counts an echo as finished when dropped, including when it is cancelled.
struct InFlight<'a>(&'a MockNetwork);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.0.finished.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl EchoTransport for MockNetwork {
    async fn echo(&self, addr: Ipv4Addr, _timeout: Duration) -> Result<EchoReply, TransportError> {
        let octet: u8 = addr.octets()[3];

        self.started.fetch_add(1, Ordering::SeqCst);
        let now: usize = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlight(self);

        if self.hanging.contains(&octet) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        } else if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.failing.contains(&octet) {
            return Err(TransportError::Echo {
                addr,
                reason: "socket closed".to_string(),
            });
        }

        match self.reachable.contains(&octet) {
            true => Ok(EchoReply::answered(rtt_for(octet))),
            false => Ok(EchoReply::lost()),
        }
    }
}

pub fn rtt_for(octet: u8) -> Duration {
    Duration::from_micros(100 * octet as u64)
}

/// `host-N.lan` for every address, except the ones told to fail.
#[derive(Default)]
pub struct MockDns {
    failing: HashSet<u8>,
    calls: AtomicUsize,
}

impl MockDns {
    pub fn failing(octets: impl IntoIterator<Item = u8>) -> Self {
        Self {
            failing: octets.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HostnameLookup for MockDns {
    async fn lookup_hostname(&self, addr: Ipv4Addr) -> Result<Vec<String>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let octet: u8 = addr.octets()[3];
        if self.failing.contains(&octet) {
            return Err(LookupError::Io(std::io::Error::other("NXDOMAIN")));
        }
        Ok(vec![format!("host-{octet}.lan.")])
    }
}

/// `02:00:00:00:00:NN` for every address.
#[derive(Default)]
pub struct MockArp {
    calls: AtomicUsize,
}

impl MockArp {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MacLookup for MockArp {
    async fn lookup_mac(&self, addr: Ipv4Addr) -> Result<Option<MacAddr>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(MacAddr::new(0x02, 0, 0, 0, 0, addr.octets()[3])))
    }
}

/// Counts whole sweep tasks: up from echo start until the host is done.
#[derive(Default)]
pub struct Gauge {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl Gauge {
    fn enter(&self) {
        let now: usize = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn current(&self) -> usize {
        self.current.load(Ordering::SeqCst)
    }
}

/// Enters the gauge on every echo. Hosts that do not answer leave right
/// away; live ones leave from [`SlowArp`] once their MAC lookup is done.
pub struct GaugedNetwork {
    gauge: Arc<Gauge>,
    reachable: HashSet<u8>,
}

impl GaugedNetwork {
    pub fn new(gauge: Arc<Gauge>, reachable: impl IntoIterator<Item = u8>) -> Self {
        Self {
            gauge,
            reachable: reachable.into_iter().collect(),
        }
    }
}

#[async_trait]
impl EchoTransport for GaugedNetwork {
    async fn echo(&self, addr: Ipv4Addr, _timeout: Duration) -> Result<EchoReply, TransportError> {
        self.gauge.enter();
        if self.reachable.contains(&addr.octets()[3]) {
            Ok(EchoReply::answered(rtt_for(addr.octets()[3])))
        } else {
            self.gauge.leave();
            Ok(EchoReply::lost())
        }
    }
}

pub struct SlowArp {
    gauge: Arc<Gauge>,
    delay: Duration,
}

impl SlowArp {
    pub fn new(gauge: Arc<Gauge>, delay: Duration) -> Self {
        Self { gauge, delay }
    }
}

#[async_trait]
impl MacLookup for SlowArp {
    async fn lookup_mac(&self, _addr: Ipv4Addr) -> Result<Option<MacAddr>, LookupError> {
        tokio::time::sleep(self.delay).await;
        self.gauge.leave();
        Ok(None)
    }
}

pub fn test_config(concurrency: usize) -> Config {
    Config {
        concurrency,
        probe_timeout: Duration::from_millis(50),
        lookup_timeout: Duration::from_millis(50),
        ..Config::default()
    }
}

pub fn service(network: &Arc<MockNetwork>, dns: &Arc<MockDns>, arp: &Arc<MockArp>, cfg: &Config) -> DiscoveryService {
    DiscoveryService::new(network.clone(), dns.clone(), arp.clone(), cfg)
        .expect("test config is valid")
}
