//! Collaborator traits the embedder implements: everything this crate
//! needs from the outside world (sockets, DNS, a poll-loop timeout hint)
//! but does not own itself.

use std::net::Ipv4Addr;

use crate::protocol::constants::{CallType, Timeslot};

/// Sends a raw, already-constructed IPSC datagram to a repeater. Returns
/// whether the send succeeded; a `false` return leaves the datagram at
/// the front of its slot's TX buffer to retry on the next tick.
pub trait RawUdpSender {
    fn send(&mut self, repeater_addr: Ipv4Addr, bytes: &[u8]) -> bool;
}

/// Resolves a hostname (or dotted-quad string) to an IPv4 address, used
/// both for repeater lookups by host and for matching configured
/// SNMP-ignored hosts.
pub trait HostnameResolver {
    fn hostname_to_ip(&self, host: &str) -> Option<Ipv4Addr>;
}

/// Lets the registry hint the embedder's poll loop to wake up sooner
/// (e.g. because a slot's TX buffer still has datagrams pending).
pub trait Scheduler {
    fn set_max_timeout_ms(&mut self, timeout_ms: u64);
}

/// A no-op scheduler for tests and embedders that poll on a fixed tick.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullScheduler;

impl Scheduler for NullScheduler {
    fn set_max_timeout_ms(&mut self, _timeout_ms: u64) {}
}

/// Dispatches a DMR-layer SMS send (CSBK preamble + data header + data
/// blocks, or the Motorola TMS variant) against a repeater, or broadcasts
/// to every tracked repeater when `broadcast` is set.
pub trait DmrDataSender {
    fn send_sms(&mut self, broadcast: bool, repeater: Option<Ipv4Addr>, ts: Timeslot, call_type: CallType, dst_id: u32, src_id: u32, msg: &str);
    fn send_motorola_tms_sms(&mut self, broadcast: bool, repeater: Option<Ipv4Addr>, ts: Timeslot, call_type: CallType, dst_id: u32, src_id: u32, msg: &str);
}

/// Triggers the embedder's SNMP client to (re-)read a repeater's static
/// info or its live status (RSSI), fired from the registry's per-tick
/// sweep rather than performed by this crate.
pub trait SnmpClient {
    fn start_read_repeaterinfo(&mut self, ip: Ipv4Addr);
    fn start_read_repeaterstatus(&mut self, ip: Ipv4Addr);
}

/// An SNMP client that triggers nothing, for embedders that don't poll
/// repeater info/status or for tests that don't care.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSnmpClient;

impl SnmpClient for NullSnmpClient {
    fn start_read_repeaterinfo(&mut self, _ip: Ipv4Addr) {}
    fn start_read_repeaterstatus(&mut self, _ip: Ipv4Addr) {}
}

/// DMR high-level handlers notified when a slot's call or data transfer
/// goes stale, so the embedder can force-end it and update its own state.
pub trait TimeoutHandler {
    fn handle_voicecall_timeout(&mut self, ip: Ipv4Addr, ts: Timeslot);
    fn handle_data_timeout(&mut self, ip: Ipv4Addr, ts: Timeslot);
}

/// A timeout handler that does nothing, for embedders that don't need
/// call/data-timeout notifications or for tests that don't care.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTimeoutHandler;

impl TimeoutHandler for NullTimeoutHandler {
    fn handle_voicecall_timeout(&mut self, _ip: Ipv4Addr, _ts: Timeslot) {}
    fn handle_data_timeout(&mut self, _ip: Ipv4Addr, _ts: Timeslot) {}
}

/// Resolves the named voice-stream sink (if any) configured for a
/// repeater's timeslot, consulted once when the repeater is first added.
pub trait VoiceStreamRegistry {
    fn get_stream_for_repeater(&self, ip: Ipv4Addr, ts: Timeslot) -> Option<String>;
}

/// A voice-stream registry with no configured streams.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullVoiceStreamRegistry;

impl VoiceStreamRegistry for NullVoiceStreamRegistry {
    fn get_stream_for_repeater(&self, _ip: Ipv4Addr, _ts: Timeslot) -> Option<String> {
        None
    }
}

/// Tracks in-flight SMS sends awaiting a selective-ack reply, keyed by
/// `(dst_id, msg)` as in the upstream retransmit buffer.
pub trait RetryTracker {
    fn entry_sent_successfully(&mut self, dst_id: u32, msg: &str);
    fn entry_send_unsuccessful(&mut self, dst_id: u32, msg: &str);
}

/// A retry tracker that observes nothing, for embedders that don't need
/// selective-ack bookkeeping.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRetryTracker;

impl RetryTracker for NullRetryTracker {
    fn entry_sent_successfully(&mut self, _dst_id: u32, _msg: &str) {}
    fn entry_send_unsuccessful(&mut self, _dst_id: u32, _msg: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingSender {
        sent: Vec<(Ipv4Addr, Vec<u8>)>,
    }

    impl RawUdpSender for RecordingSender {
        fn send(&mut self, repeater_addr: Ipv4Addr, bytes: &[u8]) -> bool {
            self.sent.push((repeater_addr, bytes.to_vec()));
            true
        }
    }

    #[test]
    fn recording_sender_captures_sends() {
        let mut sender = RecordingSender { sent: Vec::new() };
        let addr = Ipv4Addr::new(10, 0, 0, 1);
        assert!(sender.send(addr, &[1, 2, 3]));
        assert_eq!(sender.sent, vec![(addr, vec![1, 2, 3])]);
    }

    #[test]
    fn null_scheduler_ignores_timeout() {
        let mut s = NullScheduler;
        s.set_max_timeout_ms(0);
    }

    #[test]
    fn null_retry_tracker_ignores_outcomes() {
        let mut t = NullRetryTracker;
        t.entry_sent_successfully(1, "hi");
        t.entry_send_unsuccessful(1, "hi");
    }

    #[test]
    fn null_snmp_client_triggers_nothing() {
        let mut s = NullSnmpClient;
        s.start_read_repeaterinfo(Ipv4Addr::new(10, 0, 0, 1));
        s.start_read_repeaterstatus(Ipv4Addr::new(10, 0, 0, 1));
    }

    #[test]
    fn null_timeout_handler_ignores_timeouts() {
        let mut h = NullTimeoutHandler;
        h.handle_voicecall_timeout(Ipv4Addr::new(10, 0, 0, 1), Timeslot::Ts1);
        h.handle_data_timeout(Ipv4Addr::new(10, 0, 0, 1), Timeslot::Ts2);
    }

    #[test]
    fn null_voice_stream_registry_has_no_streams() {
        let reg = NullVoiceStreamRegistry;
        assert_eq!(reg.get_stream_for_repeater(Ipv4Addr::new(10, 0, 0, 1), Timeslot::Ts1), None);
    }
}
