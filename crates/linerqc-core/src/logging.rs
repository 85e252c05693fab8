#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature the standard `tracing` macros are re-exported
//! at the crate root. Without it, same-named no-op macros are exported
//! instead, so call sites never need their own `cfg` gates.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

#[cfg(not(feature = "tracing"))]
mod noop {
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {{}};
    }

    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {{}};
    }

    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {{}};
    }

    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {{}};
    }

    #[macro_export]
    macro_rules! error {
        ($($arg:tt)*) => {{}};
    }
}

/// Failure to install the global JSON subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingInitError {
    message: String,
}

impl std::fmt::Display for LoggingInitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to install log subscriber: {}", self.message)
    }
}

impl std::error::Error for LoggingInitError {}

/// Install a JSON `tracing` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Fails if another global subscriber is already set.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> Result<(), LoggingInitError> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| LoggingInitError {
            message: err.to_string(),
        })
}
