pub mod arp;
pub mod dns;
pub mod transport;
