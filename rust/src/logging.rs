//! Logging macros with verbosity level control.
//!
//! Events go through `tracing`, so the host decides where they end up. The
//! verbosity check runs first, which keeps a silent run free of formatting
//! work. Levels:
//! - 0: SILENT (warnings only)
//! - 1: CHANGES (stage results: project duration, critical path)
//! - 2: CHECKS (per-task timings and flags)
//! - 3: DEBUG (topological order, per-kind peak usage)

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at CHANGES level (verbosity >= 1) as `tracing::info!`.
#[macro_export]
macro_rules! log_changes {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHANGES {
            $crate::__tracing::info!($($arg)*);
        }
    };
}

/// Log at CHECKS level (verbosity >= 2) as `tracing::debug!`.
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHECKS {
            $crate::__tracing::debug!($($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 3) as `tracing::trace!`.
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            $crate::__tracing::trace!($($arg)*);
        }
    };
}
