use std::net::Ipv4Addr;

use thiserror::Error;

/// Failure of the echo transport for a single host.
///
/// These never leave the prober; they are turned into an unreachable
/// [`ProbeResult`](netsweep_common::network::host::ProbeResult).
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("failed to open ICMP socket: {0}")]
    Socket(#[source] std::io::Error),

    #[error("echo to {addr} failed: {reason}")]
    Echo { addr: Ipv4Addr, reason: String },
}

/// Failure of a hostname or MAC lookup. Reported as "N/A" by the enricher.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("lookup task did not complete: {0}")]
    Join(#[from] tokio::task::JoinError),
}
