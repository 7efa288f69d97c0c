use std::net::{IpAddr, Ipv4Addr};

use async_trait::async_trait;

use crate::error::LookupError;

/// Reverse name resolution. An empty list means no name is known.
///
/// Names are returned as the resolver gave them; the enricher cleans them up.
#[async_trait]
pub trait HostnameLookup: Send + Sync {
    async fn lookup_hostname(&self, addr: Ipv4Addr) -> Result<Vec<String>, LookupError>;
}

/// Resolver backed by the system's `getnameinfo`.
pub struct SystemDns;

#[async_trait]
impl HostnameLookup for SystemDns {
    async fn lookup_hostname(&self, addr: Ipv4Addr) -> Result<Vec<String>, LookupError> {
        let ip: IpAddr = IpAddr::V4(addr);
        let name: String = tokio::task::spawn_blocking(move || dns_lookup::lookup_addr(&ip)).await??;
        Ok(vec![name])
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
