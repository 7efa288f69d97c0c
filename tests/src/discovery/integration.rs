#![cfg(test)]
use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use netsweep_common::config::Config;
use netsweep_common::network::host::{HostRecord, ScanReport};
use netsweep_common::network::range::{AddressSpace, HOSTS_PER_SUBNET};
use netsweep_core::discovery::{self, DiscoveryService};

use crate::utils::{Gauge, GaugedNetwork, MockArp, MockDns, MockNetwork, SlowArp, rtt_for, service, test_config};

fn base() -> AddressSpace {
    "192.168.7.42".parse().unwrap()
}

fn reachable_set() -> Vec<u8> {
    vec![1, 2, 3, 50, 51, 99, 128, 200, 253, 254]
}

async fn sweep(network: MockNetwork, cfg: &Config) -> (ScanReport, Arc<MockNetwork>) {
    let network: Arc<MockNetwork> = Arc::new(network);
    let dns: Arc<MockDns> = Arc::new(MockDns::default());
    let arp: Arc<MockArp> = Arc::new(MockArp::default());

    let report: ScanReport = service(&network, &dns, &arp, cfg)
        .perform_discovery(base())
        .await
        .expect("sweep succeeds");
    (report, network)
}

/// Every reachable host shows up exactly once, whatever the cap.
#[tokio::test]
async fn sweep_reports_exactly_the_reachable_hosts() {
    for concurrency in [1, 64, 256] {
        let (report, network) = sweep(MockNetwork::new(reachable_set()), &test_config(concurrency)).await;

        let octets: Vec<u8> = report.hosts().iter().map(HostRecord::last_octet).collect();
        assert_eq!(octets, reachable_set(), "K = {concurrency}");
        assert_eq!(report.hosts_up(), reachable_set().len());
        assert_eq!(report.targets_scanned(), HOSTS_PER_SUBNET);
        assert_eq!(network.started(), HOSTS_PER_SUBNET);
    }
}

#[tokio::test]
async fn records_carry_enrichment_and_rounded_rtt() {
    let (report, _network) = sweep(MockNetwork::new([17]), &test_config(8)).await;

    let host: &HostRecord = &report.hosts()[0];
    assert_eq!(host.address(), Ipv4Addr::new(192, 168, 7, 17));
    assert_eq!(host.hostname(), "host-17.lan");
    assert_eq!(host.mac_address(), "02:00:00:00:00:11");
    assert_eq!(host.round_trip_time(), rtt_for(17));
}

#[tokio::test]
async fn concurrency_never_exceeds_the_cap() {
    for concurrency in [1, 16] {
        let network = MockNetwork::new(reachable_set()).delay(Duration::from_millis(5));
        let (_report, network) = sweep(network, &test_config(concurrency)).await;

        assert!(network.max_in_flight() <= concurrency);
        assert_eq!(network.max_in_flight(), concurrency);
    }
}

#[tokio::test]
async fn every_probe_has_finished_when_the_sweep_returns() {
    let network = MockNetwork::new(reachable_set()).delay(Duration::from_millis(2));
    let (report, network) = sweep(network, &test_config(32)).await;

    assert_eq!(network.started(), HOSTS_PER_SUBNET);
    assert_eq!(network.finished(), HOSTS_PER_SUBNET);
    assert_eq!(network.in_flight(), 0);
    assert_eq!(report.hosts_up(), report.hosts().len());
}

#[tokio::test]
async fn empty_subnet_gives_an_empty_report() {
    let (report, _network) = sweep(MockNetwork::new(Vec::<u8>::new()), &test_config(256)).await;

    assert!(report.is_empty());
    assert_eq!(report.hosts_up(), 0);
    assert_eq!(report.targets_scanned(), HOSTS_PER_SUBNET);
}

#[tokio::test]
async fn every_result_lies_inside_the_subnet() {
    let (report, _network) = sweep(MockNetwork::new(1..=254), &test_config(256)).await;

    assert_eq!(report.hosts_up(), HOSTS_PER_SUBNET);
    let unique: HashSet<Ipv4Addr> = report.hosts().iter().map(HostRecord::address).collect();
    assert_eq!(unique.len(), HOSTS_PER_SUBNET);
    assert!(report.hosts().iter().all(|h| report.space().contains(h.address())));
    assert!(report.hosts().windows(2).all(|w| w[0].last_octet() < w[1].last_octet()));
}

#[tokio::test]
async fn progress_counts_every_target() {
    let network: Arc<MockNetwork> = Arc::new(MockNetwork::new(reachable_set()));
    let dns: Arc<MockDns> = Arc::new(MockDns::default());
    let arp: Arc<MockArp> = Arc::new(MockArp::default());

    let seen: Arc<Mutex<Vec<(usize, usize)>>> = Arc::new(Mutex::new(Vec::new()));
    let seen_ref = Arc::clone(&seen);
    let service: DiscoveryService = service(&network, &dns, &arp, &test_config(64))
        .with_progress(Box::new(move |done, total| seen_ref.lock().unwrap().push((done, total))));

    service.perform_discovery(base()).await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), HOSTS_PER_SUBNET);
    assert_eq!(seen.last(), Some(&(HOSTS_PER_SUBNET, HOSTS_PER_SUBNET)));
}

#[test]
fn malformed_base_is_refused_before_any_sweep() {
    for raw in ["192.168.7", "192.168.7.256", "192.168.07.1", "a.b.c.d", ""] {
        assert!(discovery::resolve_space(Some(raw)).is_err(), "{raw:?} should be rejected");
    }
}

/// The cap covers the whole task: a slot is only free again once the
/// lookups of a live host are done, not when its echo returns.
#[tokio::test]
async fn cap_covers_probe_and_enrichment() {
    for concurrency in [1, 16] {
        let gauge: Arc<Gauge> = Arc::new(Gauge::default());
        let network: Arc<GaugedNetwork> = Arc::new(GaugedNetwork::new(Arc::clone(&gauge), 1..=254));
        let arp: Arc<SlowArp> = Arc::new(SlowArp::new(Arc::clone(&gauge), Duration::from_millis(5)));
        let cfg: Config = Config {
            no_dns: true,
            ..test_config(concurrency)
        };

        let report: ScanReport = DiscoveryService::new(network, Arc::new(MockDns::default()), arp, &cfg)
            .unwrap()
            .perform_discovery(base())
            .await
            .unwrap();

        assert_eq!(report.hosts_up(), HOSTS_PER_SUBNET);
        assert!(gauge.peak() <= concurrency, "K = {concurrency}, peak = {}", gauge.peak());
        assert_eq!(gauge.peak(), concurrency);
        assert_eq!(gauge.current(), 0);
    }
}

/// Needs ICMP permission (root or `net.ipv4.ping_group_range`).
#[tokio::test]
#[ignore]
async fn system_sweep_of_loopback() {
    let cfg: Config = Config {
        no_dns: true,
        ..Config::default()
    };

    let report: ScanReport = DiscoveryService::system(&cfg)
        .unwrap()
        .perform_discovery("127.0.0.1".parse().unwrap())
        .await
        .unwrap();

    assert!(
        report.hosts().iter().any(|h| h.address() == Ipv4Addr::LOCALHOST),
        "127.0.0.1 did not answer"
    );
}
