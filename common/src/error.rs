use thiserror::Error;

/// Conditions that abort a sweep. All but `Interrupted` are raised before
/// the first probe is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SweepError {
    #[error("invalid base address: '{0}'")]
    InvalidBaseAddress(String),

    #[error("no usable IPv4 address found on any interface")]
    NoUsableAddress,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("sweep interrupted: {0}")]
    Interrupted(String),
}
