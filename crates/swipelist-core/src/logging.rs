#![forbid(unsafe_code)]

//! Logging shim.
//!
//! With the `tracing` feature enabled this module re-exports the `tracing`
//! macros. Without it, same-named no-op macros are exported at the crate root
//! so call sites can always write `use swipelist_core::{debug, trace};`
//! without `cfg` guards.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, error, info, info_span, trace, warn};

#[cfg(not(feature = "tracing"))]
mod noop {
    /// No-op stand-in for `tracing::trace!`.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// No-op stand-in for `tracing::debug!`.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op stand-in for `tracing::info!`.
    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {};
    }

    /// No-op stand-in for `tracing::warn!`.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    /// No-op stand-in for `tracing::error!`.
    #[macro_export]
    macro_rules! error {
        ($($arg:tt)*) => {};
    }

    /// No-op stand-in for `tracing::debug_span!`; evaluates to `()`.
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            ()
        };
    }

    /// No-op stand-in for `tracing::info_span!`; evaluates to `()`.
    #[macro_export]
    macro_rules! info_span {
        ($($arg:tt)*) => {
            ()
        };
    }
}
