//! ICMP echo transport.
//!
//! A single `surge-ping` client is shared by every probe of a sweep. It is
//! opened on first use, so a missing privilege shows up as a per-host
//! transport error instead of aborting the sweep.

use std::net::{IpAddr, Ipv4Addr};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use surge_ping::{Client, Config as PingConfig, ICMP, PingIdentifier, PingSequence, SurgeError};
use tokio::sync::OnceCell;

use crate::error::TransportError;

const PAYLOAD: [u8; 56] = [0; 56];

/// Loss and latency of one echo attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EchoReply {
    pub packet_loss: f64,
    pub round_trip_time: Duration,
}

impl EchoReply {
    pub fn answered(round_trip_time: Duration) -> Self {
        Self { packet_loss: 0.0, round_trip_time }
    }

    pub fn lost() -> Self {
        Self { packet_loss: 1.0, round_trip_time: Duration::ZERO }
    }
}

/// Sends a single liveness probe. A timeout is a lost echo, not an error.
#[async_trait]
pub trait EchoTransport: Send + Sync {
    async fn echo(&self, addr: Ipv4Addr, timeout: Duration) -> Result<EchoReply, TransportError>;
}

pub struct IcmpTransport {
    client: OnceCell<Client>,
    warned: AtomicBool,
}

impl IcmpTransport {
    pub fn new() -> Self {
        Self {
            client: OnceCell::new(),
            warned: AtomicBool::new(false),
        }
    }

    async fn client(&self) -> Result<&Client, TransportError> {
        self.client
            .get_or_try_init(|| async {
                let cfg: PingConfig = PingConfig::builder().kind(ICMP::V4).build();
                Client::new(&cfg)
            })
            .await
            .inspect_err(|e| {
                if !self.warned.swap(true, Ordering::Relaxed) {
                    tracing::warn!("ICMP socket unavailable ({e}), hosts will be reported down");
                }
            })
            .map_err(TransportError::Socket)
    }
}

impl Default for IcmpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EchoTransport for IcmpTransport {
    async fn echo(&self, addr: Ipv4Addr, timeout: Duration) -> Result<EchoReply, TransportError> {
        let client: &Client = self.client().await?;
        let mut pinger = client
            .pinger(IpAddr::V4(addr), PingIdentifier(rand::random::<u16>()))
            .await;
        pinger.timeout(timeout);

        match pinger.ping(PingSequence(0), &PAYLOAD).await {
            Ok((_packet, rtt)) => Ok(EchoReply::answered(rtt)),
            Err(SurgeError::Timeout { .. }) => Ok(EchoReply::lost()),
            Err(e) => Err(TransportError::Echo {
                addr,
                reason: e.to_string(),
            }),
        }
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
