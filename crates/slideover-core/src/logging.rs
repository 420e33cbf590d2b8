#![forbid(unsafe_code)]

//! Logging shim.
//!
//! With the `tracing` feature the usual `tracing` macros are re-exported here.
//! Without it, the same names resolve to macros that expand to nothing, so call
//! sites import from `crate::logging` and never carry `cfg` attributes.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
pub use crate::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
mod noop {
    #[doc(hidden)]
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    #[doc(hidden)]
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    #[doc(hidden)]
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }
}

/// Install a JSON `tracing` subscriber filtered by `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .is_ok()
}
