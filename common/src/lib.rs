//! Shared models and helpers for the netsweep workspace.
//!
//! Everything in here is free of scanning logic: the host data model, the
//! /24 address space, local interface discovery, configuration and the
//! output macros used by the other crates.

pub mod config;
pub mod error;
pub mod macros;
pub mod network;
pub mod utils;

#[doc(hidden)]
pub use tracing as __tracing;
