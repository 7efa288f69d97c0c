//! Strict dotted-quad parsing.
//!
//! Accepts exactly four decimal octets in `0..=255`. An octet may not carry a
//! leading zero unless it is `0` itself, so `"10.0.0.1"` is fine while
//! `"10.00.0.1"` and `"192.168.1.01"` are rejected.

use std::net::Ipv4Addr;

use crate::error::SweepError;

const OCTET_COUNT: usize = 4;
const MAX_OCTET_DIGITS: usize = 3;

pub fn parse_ipv4(s: &str) -> Result<Ipv4Addr, SweepError> {
    let invalid = || SweepError::InvalidBaseAddress(s.to_string());

    let parts: Vec<&str> = s.split('.').collect();
    if parts.len() != OCTET_COUNT {
        return Err(invalid());
    }

    let mut octets: [u8; OCTET_COUNT] = [0; OCTET_COUNT];
    for (slot, part) in octets.iter_mut().zip(parts) {
        *slot = parse_octet(part).ok_or_else(invalid)?;
    }

    Ok(Ipv4Addr::from(octets))
}

pub fn last_octet(addr: &Ipv4Addr) -> u8 {
    addr.octets()[3]
}

fn parse_octet(s: &str) -> Option<u8> {
    if s.is_empty() || s.len() > MAX_OCTET_DIGITS {
        return None;
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if s.len() > 1 && s.starts_with('0') {
        return None;
    }
    s.parse::<u8>().ok()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
