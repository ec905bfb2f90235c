//! A single repeater tracked by the registry: identity, SNMP-reported
//! metadata, and its two timeslots.

use std::net::Ipv4Addr;

use super::slot::Slot;

/// A repeater seen on the network, keyed by its source IPv4 address.
#[derive(Debug, Clone)]
pub struct Repeater {
    pub ipaddr: Ipv4Addr,
    pub id: u32,
    pub callsign: String,
    pub callsign_lowercase: String,
    pub repeater_type: String,
    pub fwversion: String,
    pub dlfreq: u32,
    pub ulfreq: u32,
    pub snmpignored: bool,
    pub last_active_at_ms: u64,
    pub last_repeaterinfo_request_at_ms: Option<u64>,
    pub auto_rssi_update_enabled_at_ms: Option<u64>,
    pub last_rssi_request_at_ms: Option<u64>,
    pub slots: [Slot; 2],
}

impl Repeater {
    pub fn new(ipaddr: Ipv4Addr, snmpignored: bool, now_ms: u64) -> Self {
        Self {
            ipaddr,
            id: 0,
            callsign: String::new(),
            callsign_lowercase: String::new(),
            repeater_type: String::new(),
            fwversion: String::new(),
            dlfreq: 0,
            ulfreq: 0,
            snmpignored,
            last_active_at_ms: now_ms,
            last_repeaterinfo_request_at_ms: None,
            auto_rssi_update_enabled_at_ms: None,
            last_rssi_request_at_ms: None,
            slots: [Slot::new(), Slot::new()],
        }
    }

    /// Set the repeater's callsign, keeping a lowercased copy for
    /// case-insensitive lookups and display.
    pub fn set_callsign(&mut self, callsign: impl Into<String>) {
        self.callsign = callsign.into();
        self.callsign_lowercase = self.callsign.to_lowercase();
    }

    /// Display string: lowercased callsign if known, else the dotted IP.
    pub fn display_string(&self) -> String {
        if self.callsign.is_empty() {
            self.ipaddr.to_string()
        } else {
            self.callsign_lowercase.clone()
        }
    }
}
