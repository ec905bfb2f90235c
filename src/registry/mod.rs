//! The repeater registry: lookup, lifecycle, and the per-tick sweep over
//! every tracked repeater's state.

pub mod repeater;
pub mod slot;

use std::collections::HashMap;
use std::net::Ipv4Addr;

use crate::config::RuntimeConfig;
use crate::external::{HostnameResolver, RawUdpSender, SnmpClient, TimeoutHandler, VoiceStreamRegistry};
use crate::protocol::constants::{CallType, Timeslot, TX_PACING_MS};

pub use repeater::Repeater;
pub use slot::{Slot, SlotState};

/// Tracks every repeater currently known, in most-recently-added-first
/// order (mirroring the upstream linked list's prepend-on-add).
#[derive(Debug, Default)]
pub struct Registry {
    by_ip: HashMap<Ipv4Addr, Repeater>,
    order: Vec<Ipv4Addr>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            by_ip: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn find_by_ip(&self, ip: Ipv4Addr) -> Option<&Repeater> {
        self.by_ip.get(&ip)
    }

    pub fn find_by_ip_mut(&mut self, ip: Ipv4Addr) -> Option<&mut Repeater> {
        self.by_ip.get_mut(&ip)
    }

    pub fn find_by_host(&self, resolver: &impl HostnameResolver, host: &str) -> Option<&Repeater> {
        let ip = resolver.hostname_to_ip(host)?;
        self.find_by_ip(ip)
    }

    pub fn find_by_callsign(&self, callsign: &str) -> Option<&Repeater> {
        let needle = callsign.to_lowercase();
        self.order
            .iter()
            .filter_map(|ip| self.by_ip.get(ip))
            .find(|r| r.callsign_lowercase == needle)
    }

    /// A repeater with an active (non-idle) slot matching the given call
    /// identity, if any.
    pub fn find_active(&self, src_id: u32, dst_id: u32, call_type: CallType) -> Option<&Repeater> {
        self.order.iter().filter_map(|ip| self.by_ip.get(ip)).find(|r| {
            r.slots.iter().any(|slot| {
                slot.state != SlotState::Idle
                    && slot.src_id == src_id
                    && slot.dst_id == dst_id
                    && slot.call_type == Some(call_type)
            })
        })
    }

    /// Repeaters in registry order (most recently added first), for
    /// listing/display.
    pub fn list(&self) -> Vec<&Repeater> {
        self.order.iter().filter_map(|ip| self.by_ip.get(ip)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.by_ip.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_ip.len()
    }

    /// Add a repeater if not already known (refreshing `last_active_at_ms`
    /// either way), returning the tracked entry.
    pub fn add(
        &mut self,
        ip: Ipv4Addr,
        now_ms: u64,
        ignored_hosts: &str,
        resolver: &impl HostnameResolver,
        voice_streams: &impl VoiceStreamRegistry,
    ) -> &mut Repeater {
        if !self.by_ip.contains_key(&ip) {
            let snmpignored = is_snmp_ignored(ip, ignored_hosts, resolver);
            let mut repeater = Repeater::new(ip, snmpignored, now_ms);
            for ts in [Timeslot::Ts1, Timeslot::Ts2] {
                repeater.slots[ts.index()].voicestream = voice_streams.get_stream_for_repeater(ip, ts);
            }
            self.by_ip.insert(ip, repeater);
            self.order.insert(0, ip);
        }
        let repeater = self.by_ip.get_mut(&ip).expect("just inserted or present");
        repeater.last_active_at_ms = now_ms;
        repeater
    }

    pub fn remove(&mut self, ip: Ipv4Addr) {
        self.by_ip.remove(&ip);
        self.order.retain(|entry| *entry != ip);
    }

    /// Change a slot's state, clearing the repeater's auto-RSSI-update
    /// flag once neither slot is in a call anymore.
    pub fn state_change(&mut self, ip: Ipv4Addr, ts: Timeslot, new_state: SlotState, log_flags: crate::logging::LogFlags) {
        if let Some(repeater) = self.by_ip.get_mut(&ip) {
            crate::repeaters_log!(
                log_flags,
                "repeaters [{}]: slot {} state change from {} to {}",
                repeater.display_string(),
                ts.index() + 1,
                repeater.slots[ts.index()].state.as_str(),
                new_state.as_str()
            );
            repeater.slots[ts.index()].state = new_state;
            if repeater.auto_rssi_update_enabled_at_ms.is_some()
                && repeater.slots[0].state != SlotState::CallRunning
                && repeater.slots[1].state != SlotState::CallRunning
            {
                repeater.auto_rssi_update_enabled_at_ms = None;
            }
        }
    }

    /// Per-tick sweep: drain paced TX buffers, time out inactive
    /// repeaters, fire SNMP info/status triggers, and notify the embedder
    /// of stale calls/data transfers. Returns the IPs removed for
    /// inactivity, in case the embedder wants to log/report them.
    #[allow(clippy::too_many_arguments)]
    pub fn process(
        &mut self,
        now_ms: u64,
        config: &RuntimeConfig,
        sender: &mut impl RawUdpSender,
        snmp: &mut impl SnmpClient,
        timeout_handlers: &mut impl TimeoutHandler,
    ) -> Vec<Ipv4Addr> {
        for ip in self.order.clone() {
            if let Some(repeater) = self.by_ip.get_mut(&ip) {
                for ts in [Timeslot::Ts1, Timeslot::Ts2] {
                    drain_tx_buffer(repeater, ts, now_ms, sender);
                }
            }
        }

        let inactive_timeout_ms = config.repeater_inactive_timeout_sec() * 1000;
        let mut removed = Vec::new();
        for ip in self.order.clone() {
            let Some(repeater) = self.by_ip.get(&ip) else { continue };
            if now_ms.saturating_sub(repeater.last_active_at_ms) > inactive_timeout_ms {
                crate::repeaters_log!(config.log_flags(), "repeaters [{}]: timed out", repeater.display_string());
                removed.push(ip);
            }
        }
        for ip in &removed {
            self.remove(*ip);
        }

        let info_update_interval_ms = config.repeater_info_update_interval_sec() * 1000;
        let call_timeout_ms = config.call_timeout_sec() * 1000;
        let data_timeout_ms = config.data_timeout_sec() * 1000;
        let rssi_update_interval_ms = config.rssi_update_during_call_ms();

        for ip in self.order.clone() {
            let Some(repeater) = self.by_ip.get_mut(&ip) else { continue };

            if !repeater.snmpignored
                && info_update_interval_ms > 0
                && now_ms.saturating_sub(repeater.last_repeaterinfo_request_at_ms.unwrap_or(0)) > info_update_interval_ms
            {
                crate::cat_debug_log!(config.log_flags(), "repeaters [{}]: sending snmp info update request", repeater.display_string());
                snmp.start_read_repeaterinfo(ip);
                repeater.last_repeaterinfo_request_at_ms = Some(now_ms);
            }

            for ts in [Timeslot::Ts1, Timeslot::Ts2] {
                let slot = &repeater.slots[ts.index()];
                if slot.state == SlotState::CallRunning
                    && now_ms.saturating_sub(slot.last_voice_frame_at_ms.unwrap_or(0)) > call_timeout_ms
                {
                    timeout_handlers.handle_voicecall_timeout(ip, ts);
                }
            }

            if let Some(enabled_at) = repeater.auto_rssi_update_enabled_at_ms {
                if enabled_at <= now_ms
                    && rssi_update_interval_ms > 0
                    && now_ms.saturating_sub(repeater.last_rssi_request_at_ms.unwrap_or(0)) > rssi_update_interval_ms
                {
                    snmp.start_read_repeaterstatus(ip);
                    repeater.last_rssi_request_at_ms = Some(now_ms);
                }
            }

            for ts in [Timeslot::Ts1, Timeslot::Ts2] {
                let slot = &repeater.slots[ts.index()];
                if slot.state == SlotState::DataReceiveRunning
                    && now_ms.saturating_sub(slot.data_header_received_at_ms.unwrap_or(0)) > data_timeout_ms
                {
                    timeout_handlers.handle_data_timeout(ip, ts);
                }
            }
        }

        removed
    }
}

fn drain_tx_buffer(repeater: &mut Repeater, ts: Timeslot, now_ms: u64, sender: &mut impl RawUdpSender) {
    let slot = &mut repeater.slots[ts.index()];
    let ready = match slot.last_ipsc_packet_sent_at_ms {
        Some(last) => now_ms.saturating_sub(last) >= TX_PACING_MS,
        None => true,
    };
    if !ready {
        return;
    }
    if let Some(front) = slot.ipsc_tx_rawpacketbuf.front() {
        let bytes = front.to_bytes();
        if sender.send(repeater.ipaddr, &bytes) {
            slot.ipsc_tx_rawpacketbuf.pop_front();
            slot.last_ipsc_packet_sent_at_ms = Some(now_ms);
        }
    }
}

fn is_snmp_ignored(ip: Ipv4Addr, ignored_hosts: &str, resolver: &impl HostnameResolver) -> bool {
    ignored_hosts
        .split(',')
        .map(str::trim)
        .filter(|tok| !tok.is_empty())
        .any(|tok| resolver.hostname_to_ip(tok) == Some(ip))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::{NullScheduler, NullSnmpClient, NullTimeoutHandler, NullVoiceStreamRegistry};

    struct FakeResolver;
    impl HostnameResolver for FakeResolver {
        fn hostname_to_ip(&self, host: &str) -> Option<Ipv4Addr> {
            host.parse().ok()
        }
    }

    struct FakeSender {
        delivered: usize,
        fail_next: bool,
    }
    impl RawUdpSender for FakeSender {
        fn send(&mut self, _repeater_addr: Ipv4Addr, _bytes: &[u8]) -> bool {
            if self.fail_next {
                self.fail_next = false;
                false
            } else {
                self.delivered += 1;
                true
            }
        }
    }

    #[test]
    fn add_is_idempotent_and_refreshes_activity() {
        let mut reg = Registry::new();
        let ip = Ipv4Addr::new(10, 0, 0, 1);
        let resolver = FakeResolver;
        reg.add(ip, 1000, "", &resolver, &NullVoiceStreamRegistry);
        reg.add(ip, 2000, "", &resolver, &NullVoiceStreamRegistry);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.find_by_ip(ip).unwrap().last_active_at_ms, 2000);
    }

    #[test]
    fn add_marks_snmp_ignored_hosts() {
        let mut reg = Registry::new();
        let ip = Ipv4Addr::new(10, 0, 0, 2);
        let resolver = FakeResolver;
        reg.add(ip, 0, "10.0.0.2,10.0.0.3", &resolver, &NullVoiceStreamRegistry);
        assert!(reg.find_by_ip(ip).unwrap().snmpignored);
    }

    #[test]
    fn remove_drops_repeater() {
        let mut reg = Registry::new();
        let ip = Ipv4Addr::new(10, 0, 0, 1);
        reg.add(ip, 0, "", &FakeResolver, &NullVoiceStreamRegistry);
        reg.remove(ip);
        assert!(reg.find_by_ip(ip).is_none());
        assert_eq!(reg.len(), 0);
    }

    #[test]
    fn process_times_out_inactive_repeaters() {
        let mut reg = Registry::new();
        let ip = Ipv4Addr::new(10, 0, 0, 1);
        reg.add(ip, 0, "", &FakeResolver, &NullVoiceStreamRegistry);
        let config = RuntimeConfig::new().with_repeater_inactive_timeout_sec(10);
        let mut sender = FakeSender { delivered: 0, fail_next: false };
        let removed = reg.process(20_000, &config, &mut sender, &mut NullSnmpClient, &mut NullTimeoutHandler);
        assert_eq!(removed, vec![ip]);
        assert!(reg.find_by_ip(ip).is_none());
    }

    #[test]
    fn process_paces_sends_at_least_50ms_apart() {
        let mut reg = Registry::new();
        let ip = Ipv4Addr::new(10, 0, 0, 1);
        reg.add(ip, 0, "", &FakeResolver, &NullVoiceStreamRegistry);
        let raw = crate::protocol::codec::construct(
            0,
            Timeslot::Ts1,
            crate::protocol::SlotType::Csbk,
            CallType::Group,
            1,
            2,
            [0u8; crate::protocol::constants::PAYLOAD_LEN],
        );
        reg.find_by_ip_mut(ip).unwrap().slots[0].ipsc_tx_rawpacketbuf.push_back(raw);
        reg.find_by_ip_mut(ip).unwrap().slots[0].ipsc_tx_rawpacketbuf.push_back(raw);

        let config = RuntimeConfig::new();
        let mut sender = FakeSender { delivered: 0, fail_next: false };
        reg.process(0, &config, &mut sender, &mut NullSnmpClient, &mut NullTimeoutHandler);
        assert_eq!(sender.delivered, 1);
        reg.process(10, &config, &mut sender, &mut NullSnmpClient, &mut NullTimeoutHandler);
        assert_eq!(sender.delivered, 1, "second send before pacing interval elapses");
        reg.process(60, &config, &mut sender, &mut NullSnmpClient, &mut NullTimeoutHandler);
        assert_eq!(sender.delivered, 2);
    }

    #[test]
    fn process_retries_failed_send_on_next_tick() {
        let mut reg = Registry::new();
        let ip = Ipv4Addr::new(10, 0, 0, 1);
        reg.add(ip, 0, "", &FakeResolver, &NullVoiceStreamRegistry);
        let raw = crate::protocol::codec::construct(
            0,
            Timeslot::Ts1,
            crate::protocol::SlotType::Csbk,
            CallType::Group,
            1,
            2,
            [0u8; crate::protocol::constants::PAYLOAD_LEN],
        );
        reg.find_by_ip_mut(ip).unwrap().slots[0].ipsc_tx_rawpacketbuf.push_back(raw);

        let config = RuntimeConfig::new();
        let mut sender = FakeSender { delivered: 0, fail_next: true };
        reg.process(0, &config, &mut sender, &mut NullSnmpClient, &mut NullTimeoutHandler);
        assert_eq!(sender.delivered, 0);
        assert_eq!(reg.find_by_ip(ip).unwrap().slots[0].ipsc_tx_rawpacketbuf.len(), 1);
        reg.process(100, &config, &mut sender, &mut NullSnmpClient, &mut NullTimeoutHandler);
        assert_eq!(sender.delivered, 1);
    }

    #[test]
    fn process_triggers_snmp_info_read_after_update_interval() {
        let mut reg = Registry::new();
        let ip = Ipv4Addr::new(10, 0, 0, 1);
        reg.add(ip, 0, "", &FakeResolver, &NullVoiceStreamRegistry);
        let config = RuntimeConfig::new().with_repeater_info_update_interval_sec(10);
        let mut sender = FakeSender { delivered: 0, fail_next: false };

        #[derive(Default)]
        struct RecordingSnmp {
            info_reads: Vec<Ipv4Addr>,
        }
        impl SnmpClient for RecordingSnmp {
            fn start_read_repeaterinfo(&mut self, ip: Ipv4Addr) {
                self.info_reads.push(ip);
            }
            fn start_read_repeaterstatus(&mut self, _ip: Ipv4Addr) {}
        }

        let mut snmp = RecordingSnmp::default();
        reg.process(20_000, &config, &mut sender, &mut snmp, &mut NullTimeoutHandler);
        assert_eq!(snmp.info_reads, vec![ip]);
        reg.process(20_001, &config, &mut sender, &mut snmp, &mut NullTimeoutHandler);
        assert_eq!(snmp.info_reads, vec![ip], "shouldn't re-trigger before the next interval elapses");
    }

    #[test]
    fn process_notifies_voicecall_timeout_for_stale_running_calls() {
        let mut reg = Registry::new();
        let ip = Ipv4Addr::new(10, 0, 0, 1);
        reg.add(ip, 0, "", &FakeResolver, &NullVoiceStreamRegistry);
        {
            let slot = &mut reg.find_by_ip_mut(ip).unwrap().slots[0];
            slot.state = SlotState::CallRunning;
            slot.last_voice_frame_at_ms = Some(0);
        }
        let config = RuntimeConfig::new().with_call_timeout_sec(2);
        let mut sender = FakeSender { delivered: 0, fail_next: false };

        #[derive(Default)]
        struct RecordingTimeouts {
            voicecall: Vec<(Ipv4Addr, Timeslot)>,
        }
        impl TimeoutHandler for RecordingTimeouts {
            fn handle_voicecall_timeout(&mut self, ip: Ipv4Addr, ts: Timeslot) {
                self.voicecall.push((ip, ts));
            }
            fn handle_data_timeout(&mut self, _ip: Ipv4Addr, _ts: Timeslot) {}
        }

        let mut handlers = RecordingTimeouts::default();
        reg.process(5_000, &config, &mut sender, &mut NullSnmpClient, &mut handlers);
        assert_eq!(handlers.voicecall, vec![(ip, Timeslot::Ts1)]);
    }

    #[test]
    fn null_scheduler_is_usable_as_a_noop() {
        let _ = NullScheduler;
    }
}
