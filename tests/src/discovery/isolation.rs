#![cfg(test)]
use std::sync::Arc;

use netsweep_common::config::Config;
use netsweep_common::network::host::{HostRecord, NOT_AVAILABLE, ScanReport};
use netsweep_common::network::range::AddressSpace;

use crate::utils::{MockArp, MockDns, MockNetwork, service, test_config};

fn base() -> AddressSpace {
    "10.20.30.1".parse().unwrap()
}

fn octets(report: &ScanReport) -> Vec<u8> {
    report.hosts().iter().map(HostRecord::last_octet).collect()
}

#[tokio::test]
async fn transport_errors_stay_on_their_host() {
    let network: Arc<MockNetwork> = Arc::new(MockNetwork::new([10, 11, 12, 13]).failing([11, 40]));
    let dns: Arc<MockDns> = Arc::new(MockDns::default());
    let arp: Arc<MockArp> = Arc::new(MockArp::default());

    let report: ScanReport = service(&network, &dns, &arp, &test_config(64))
        .perform_discovery(base())
        .await
        .unwrap();

    assert_eq!(octets(&report), vec![10, 12, 13]);
    assert_eq!(network.finished(), 254);
}

#[tokio::test]
async fn hanging_probe_is_cut_off() {
    let network: Arc<MockNetwork> = Arc::new(MockNetwork::new([1, 2, 3]).hanging([2, 100]));
    let dns: Arc<MockDns> = Arc::new(MockDns::default());
    let arp: Arc<MockArp> = Arc::new(MockArp::default());

    let report: ScanReport = service(&network, &dns, &arp, &test_config(256))
        .perform_discovery(base())
        .await
        .unwrap();

    assert_eq!(octets(&report), vec![1, 3]);
    assert_eq!(network.in_flight(), 0);
}

#[tokio::test]
async fn failed_hostname_lookup_only_blanks_that_field() {
    let network: Arc<MockNetwork> = Arc::new(MockNetwork::new([5, 6]));
    let dns: Arc<MockDns> = Arc::new(MockDns::failing([5]));
    let arp: Arc<MockArp> = Arc::new(MockArp::default());

    let report: ScanReport = service(&network, &dns, &arp, &test_config(16))
        .perform_discovery(base())
        .await
        .unwrap();

    let hosts: &[HostRecord] = report.hosts();
    assert_eq!(hosts[0].hostname(), NOT_AVAILABLE);
    assert_eq!(hosts[0].mac_address(), "02:00:00:00:00:05");
    assert_eq!(hosts[1].hostname(), "host-6.lan");
}

#[tokio::test]
async fn only_live_hosts_are_enriched() {
    let network: Arc<MockNetwork> = Arc::new(MockNetwork::new([7, 8, 9]));
    let dns: Arc<MockDns> = Arc::new(MockDns::default());
    let arp: Arc<MockArp> = Arc::new(MockArp::default());

    service(&network, &dns, &arp, &test_config(32))
        .perform_discovery(base())
        .await
        .unwrap();

    assert_eq!(dns.calls(), 3);
    assert_eq!(arp.calls(), 3);
}

#[tokio::test]
async fn disabled_dns_is_never_queried() {
    let network: Arc<MockNetwork> = Arc::new(MockNetwork::new([7, 8]));
    let dns: Arc<MockDns> = Arc::new(MockDns::default());
    let arp: Arc<MockArp> = Arc::new(MockArp::default());
    let cfg: Config = Config {
        no_dns: true,
        ..test_config(32)
    };

    let report: ScanReport = service(&network, &dns, &arp, &cfg)
        .perform_discovery(base())
        .await
        .unwrap();

    assert_eq!(dns.calls(), 0);
    assert!(report.hosts().iter().all(|h| h.hostname() == NOT_AVAILABLE));
    assert!(report.hosts().iter().all(|h| h.mac_address() != NOT_AVAILABLE));
}
