//! Protocol-handling core for a DMR IPSC network monitor/relay.
//!
//! This crate owns the wire format (`protocol`), the repeater registry
//! and its per-slot call/data state (`registry`), voice call relay
//! (`voice`), the global SMS TX FIFO (`sms_tx`), and a single
//! [`tick::TickDriver`] that ties the latter two together on every poll
//! iteration. Everything here is single-threaded and cooperative: no
//! module spawns a thread or blocks, and every operation that depends on
//! wall-clock time takes `now_ms` explicitly rather than reading the
//! clock itself, so the whole core can be driven deterministically from
//! tests or from a real `epoll`/`select` loop alike.
//!
//! Sockets, DNS, and the DMR-layer SMS encoder/decoder the embedder
//! already has are modeled as the collaborator traits in [`external`];
//! this crate constructs and parses datagrams but never opens a socket
//! itself.

pub mod config;
pub mod external;
pub mod logging;
pub mod protocol;
pub mod registry;
pub mod sms_tx;
pub mod tick;
pub mod voice;

pub use config::RuntimeConfig;
pub use tick::TickDriver;
