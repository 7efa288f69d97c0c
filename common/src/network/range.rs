//! The /24 address space swept by a scan.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::error::SweepError;
use crate::network::address;

pub const SUBNET_PREFIX: u8 = 24;
pub const FIRST_HOST_OCTET: u8 = 1;
pub const LAST_HOST_OCTET: u8 = 254;
pub const HOSTS_PER_SUBNET: usize = (LAST_HOST_OCTET - FIRST_HOST_OCTET + 1) as usize;

/// The usable hosts of the /24 that contains `base`.
///
/// Network (`.0`) and broadcast (`.255`) addresses are never part of it.
/// Parsing from a string applies the strict dotted-quad rules of
/// [`address::parse_ipv4`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressSpace {
    base: Ipv4Addr,
}

impl AddressSpace {
    pub fn new(base: Ipv4Addr) -> Self {
        Self { base }
    }

    /// The address the space was derived from, host part included.
    pub fn base(&self) -> Ipv4Addr {
        self.base
    }

    fn prefix(&self) -> [u8; 3] {
        let [a, b, c, _] = self.base.octets();
        [a, b, c]
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        let [a, b, c, d] = addr.octets();
        [a, b, c] == self.prefix() && (FIRST_HOST_OCTET..=LAST_HOST_OCTET).contains(&d)
    }

    /// The 254 host addresses sharing the first three octets of the base,
    /// ascending.
    pub fn enumerate(&self) -> Vec<Ipv4Addr> {
        let [a, b, c] = self.prefix();
        (FIRST_HOST_OCTET..=LAST_HOST_OCTET)
            .map(|d| Ipv4Addr::new(a, b, c, d))
            .collect()
    }
}

impl FromStr for AddressSpace {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        address::parse_ipv4(s).map(Self::new)
    }
}

impl fmt::Display for AddressSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.prefix();
        write!(f, "{a}.{b}.{c}.0/{SUBNET_PREFIX}")
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
