//! Sweep engine for netsweep.
//!
//! [`scanner::ScanCoordinator`] fans one probe+enrich task out per address of
//! a /24 under a fixed concurrency cap. The network primitives it relies on
//! sit behind the traits in [`network`], so the engine itself never touches
//! a socket directly.

pub mod discovery;
pub mod error;
pub mod network;
pub mod scanner;
