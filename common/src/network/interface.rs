//! Local address discovery.
//!
//! Picks the IPv4 address whose /24 will be swept: the first address on an
//! interface that is up, not a loopback and carries a non-loopback IPv4.
//! Physical interfaces win over virtual ones (bridges, tunnels, containers).

use std::net::Ipv4Addr;

use pnet::datalink::{self, NetworkInterface};

#[cfg(target_os = "linux")]
use linux_impl::is_physical;
#[cfg(not(target_os = "linux"))]
use fallback_impl::is_physical;

use crate::error::SweepError;
use crate::utils::interface::NetworkInterfaceExtension;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ViabilityError {
    /// The interface is operationally down.
    IsDown,
    /// Loopback interfaces never reach the LAN.
    IsLoopback,
    /// The interface has no IPv4 address other than loopback/unspecified.
    NoUsableIpv4,
}

pub fn discover_local_ipv4() -> Result<Ipv4Addr, SweepError> {
    let interfaces: Vec<NetworkInterface> = datalink::interfaces();
    select_local_ipv4(&interfaces, is_physical).ok_or(SweepError::NoUsableAddress)
}

pub fn select_local_ipv4(
    interfaces: &[NetworkInterface],
    is_physical: impl Fn(&NetworkInterface) -> bool,
) -> Option<Ipv4Addr> {
    let viable: Vec<&NetworkInterface> = interfaces
        .iter()
        .filter(|intf| is_viable_interface(intf).is_ok())
        .collect();

    viable
        .iter()
        .copied()
        .find(|intf| is_physical(*intf))
        .or_else(|| viable.first().copied())
        .and_then(|intf| intf.get_usable_ipv4())
}

pub fn is_viable_interface(interface: &NetworkInterface) -> Result<(), ViabilityError> {
    if !interface.is_up() {
        return Err(ViabilityError::IsDown);
    }
    if interface.is_loopback() {
        return Err(ViabilityError::IsLoopback);
    }
    if interface.get_usable_ipv4().is_none() {
        return Err(ViabilityError::NoUsableIpv4);
    }
    Ok(())
}

#[cfg(target_os = "linux")]
mod linux_impl {
    use super::*;
    use std::path::Path;

    pub fn is_physical(interface: &NetworkInterface) -> bool {
        Path::new(&format!("/sys/class/net/{}/device", interface.name)).exists()
    }
}

#[cfg(not(target_os = "linux"))]
mod fallback_impl {
    use super::*;

    pub fn is_physical(interface: &NetworkInterface) -> bool {
        interface.mac.is_some() && !interface.is_point_to_point()
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
