use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use netsweep_common::network::host::ProbeResult;
use tokio::time::timeout;
use tracing::{debug, trace};

use crate::network::transport::EchoTransport;

/// Slack on top of the probe timeout before a transport that ignores its own
/// deadline is cut off.
const PROBE_GRACE: Duration = Duration::from_millis(250);

const RTT_RESOLUTION_MICROS: u128 = 10;

/// Turns one echo into a [`ProbeResult`]. Never fails: every transport error
/// is local to the host it happened on and reads as "unreachable".
#[derive(Clone)]
pub struct Prober {
    transport: Arc<dyn EchoTransport>,
}

impl Prober {
    pub fn new(transport: Arc<dyn EchoTransport>) -> Self {
        Self { transport }
    }

    pub async fn probe(&self, address: Ipv4Addr, probe_timeout: Duration) -> ProbeResult {
        let echo = self.transport.echo(address, probe_timeout);

        match timeout(probe_timeout + PROBE_GRACE, echo).await {
            Ok(Ok(reply)) => {
                trace!(%address, loss = reply.packet_loss, "echo finished");
                ProbeResult::from_loss(address, reply.packet_loss, round_rtt(reply.round_trip_time))
            }
            Ok(Err(e)) => {
                debug!(%address, error = %e, "probe failed");
                ProbeResult::unreachable(address)
            }
            Err(_elapsed) => {
                debug!(%address, "transport overran the probe timeout");
                ProbeResult::unreachable(address)
            }
        }
    }
}

/// Rounds to the nearest 10µs.
fn round_rtt(rtt: Duration) -> Duration {
    let micros: u128 = rtt.as_micros();
    let rounded: u128 = (micros + RTT_RESOLUTION_MICROS / 2) / RTT_RESOLUTION_MICROS * RTT_RESOLUTION_MICROS;
    Duration::from_micros(rounded as u64)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
