//! Console log-level flags.
//!
//! The original monitor gates verbose output behind three independent
//! flags rather than a single severity level: `dmr` (protocol-level
//! traffic), `debug` (extra detail on top of an enabled category), and
//! `repeaters` (registry lifecycle). A call site ORs the flags it needs
//! (e.g. `repeaters && debug`) before deciding whether to log at all.

/// Which categories of log output are currently enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogFlags {
    /// DMR protocol traffic (SMS sends, voice call lifecycle).
    pub dmr: bool,
    /// Extra detail, meaningful only alongside another flag.
    pub debug: bool,
    /// Repeater registry lifecycle (add/remove/state change).
    pub repeaters: bool,
}

impl LogFlags {
    /// All categories enabled.
    pub const fn all() -> Self {
        Self {
            dmr: true,
            debug: true,
            repeaters: true,
        }
    }

    /// All categories disabled.
    pub const fn none() -> Self {
        Self {
            dmr: false,
            debug: false,
            repeaters: false,
        }
    }
}
