//! Thin logging facade over the `log` crate.
//!
//! Mirrors the console logger described by the external-interfaces section:
//! callers gate a message behind the `dmr`, `debug`, or `repeaters` category
//! flags in [`LogFlags`] instead of a single severity. Under the hood every
//! emitted line still goes through `log::debug!`/`log::info!`/`log::warn!`,
//! so any embedder-installed `log` subscriber (env_logger, tracing-log, ...)
//! sees it without the core knowing about it.
//!
//! When the `logging` feature is disabled the macros below expand to
//! nothing, so instrumented call sites carry zero runtime cost in a build
//! that doesn't want them.

mod output;

pub use output::LogFlags;

/// Log a DMR-category message at info level if `flags.dmr` is set.
#[macro_export]
#[cfg(feature = "logging")]
macro_rules! dmr_log {
    ($flags:expr, $($arg:tt)*) => {
        if $flags.dmr {
            log::info!($($arg)*);
        }
    };
}

/// Log a repeaters-category message at info level if `flags.repeaters` is set.
#[macro_export]
#[cfg(feature = "logging")]
macro_rules! repeaters_log {
    ($flags:expr, $($arg:tt)*) => {
        if $flags.repeaters {
            log::info!($($arg)*);
        }
    };
}

/// Log a debug-category message at debug level if `flags.debug` is set
/// alongside the category that gated the call site.
#[macro_export]
#[cfg(feature = "logging")]
macro_rules! cat_debug_log {
    ($flags:expr, $($arg:tt)*) => {
        if $flags.debug {
            log::debug!($($arg)*);
        }
    };
}

#[macro_export]
#[cfg(not(feature = "logging"))]
macro_rules! dmr_log {
    ($flags:expr, $($arg:tt)*) => {
        let _ = &$flags;
    };
}

#[macro_export]
#[cfg(not(feature = "logging"))]
macro_rules! repeaters_log {
    ($flags:expr, $($arg:tt)*) => {
        let _ = &$flags;
    };
}

#[macro_export]
#[cfg(not(feature = "logging"))]
macro_rules! cat_debug_log {
    ($flags:expr, $($arg:tt)*) => {
        let _ = &$flags;
    };
}
