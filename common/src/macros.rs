//! Output macros.
//!
//! Thin wrappers over `tracing` so library crates can report progress without
//! caring how the binary renders it. The CLI formatter recognises the
//! `netsweep::success` target and styles it separately.

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: "netsweep::success", $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::__tracing::warn!(target: "netsweep::warn", $($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::__tracing::error!(target: "netsweep::error", $($arg)*)
    };
}
