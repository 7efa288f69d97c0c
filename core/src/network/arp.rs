//! Link-layer address lookup from the operating system's neighbour cache.
//!
//! The cache is only populated for hosts on the directly attached subnet, and
//! usually only after something (our echo, for instance) talked to them.
//! Linux exposes it as `/proc/net/arp`; other systems go through `arp`.

use std::net::Ipv4Addr;

use async_trait::async_trait;
use pnet::util::MacAddr;

use crate::error::LookupError;

#[cfg(target_os = "linux")]
const PROC_NET_ARP: &str = "/proc/net/arp";

/// Flags value the kernel uses for an entry still waiting on a reply.
const ATF_INCOMPLETE: &str = "0x0";

#[async_trait]
pub trait MacLookup: Send + Sync {
    async fn lookup_mac(&self, addr: Ipv4Addr) -> Result<Option<MacAddr>, LookupError>;
}

pub struct ArpCache;

#[async_trait]
impl MacLookup for ArpCache {
    #[cfg(target_os = "linux")]
    async fn lookup_mac(&self, addr: Ipv4Addr) -> Result<Option<MacAddr>, LookupError> {
        let table: String = tokio::fs::read_to_string(PROC_NET_ARP).await?;
        Ok(parse_proc_net_arp(&table, addr))
    }

    #[cfg(not(target_os = "linux"))]
    async fn lookup_mac(&self, addr: Ipv4Addr) -> Result<Option<MacAddr>, LookupError> {
        #[cfg(target_os = "windows")]
        const ARP_ARGS: &[&str] = &["-a"];
        #[cfg(not(target_os = "windows"))]
        const ARP_ARGS: &[&str] = &["-n"];

        let output = tokio::process::Command::new("arp")
            .args(ARP_ARGS)
            .arg(addr.to_string())
            .output()
            .await?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_arp_output(&stdout, addr))
    }
}

/// Parses the kernel table:
///
/// ```text
/// IP address       HW type     Flags       HW address            Mask     Device
/// 192.168.1.1      0x1         0x2         aa:bb:cc:dd:ee:ff     *        eth0
/// ```
pub fn parse_proc_net_arp(table: &str, addr: Ipv4Addr) -> Option<MacAddr> {
    table.lines().skip(1).find_map(|line| {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [ip, _hw_type, flags, mac, ..] = fields.as_slice() else {
            return None;
        };
        if ip.parse::<Ipv4Addr>().ok()? != addr || *flags == ATF_INCOMPLETE {
            return None;
        }
        parse_mac(mac)
    })
}

/// Parses the output of the `arp` utility on BSD/macOS
/// (`? (10.0.0.1) at 0:1e:c2:aa:bb:cc on en0`) and Windows
/// (`10.0.0.1   00-1e-c2-aa-bb-cc   dynamic`).
pub fn parse_arp_output(output: &str, addr: Ipv4Addr) -> Option<MacAddr> {
    output.lines().find_map(|line| {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let mentions_addr: bool = tokens.iter().any(|token| {
            token
                .trim_matches(|c| c == '(' || c == ')')
                .parse::<Ipv4Addr>()
                .is_ok_and(|ip| ip == addr)
        });
        if !mentions_addr {
            return None;
        }
        tokens.iter().find_map(|token| parse_mac(token))
    })
}

fn parse_mac(token: &str) -> Option<MacAddr> {
    if !token.contains(':') && !token.contains('-') {
        return None;
    }
    let mac: MacAddr = token.replace('-', ":").parse().ok()?;
    (mac != MacAddr::zero()).then_some(mac)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
