//! Runtime configuration: read-only accessors over plain fields.
//!
//! Configuration-file parsing lives with the embedder; this struct only
//! holds the values the core actually consults (see "Configuration"
//! in the external-interfaces section). Construct with [`RuntimeConfig::new`]
//! and adjust fields with the `with_*` builders before wiring up a
//! [`crate::tick::TickDriver`].

/// Runtime-tunable parameters consumed by the registry and SMS TX buffer.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    sms_send_retry_interval_sec: u64,
    sms_send_max_retry_count: u32,
    repeater_inactive_timeout_sec: u64,
    repeater_info_update_interval_sec: u64,
    call_timeout_sec: u64,
    data_timeout_sec: u64,
    rssi_update_during_call_ms: u64,
    ignored_snmp_repeater_hosts: String,
    log_flags: crate::logging::LogFlags,
}

impl RuntimeConfig {
    /// Defaults matching the upstream monitor's compiled-in defaults.
    pub fn new() -> Self {
        Self {
            sms_send_retry_interval_sec: 5,
            sms_send_max_retry_count: 3,
            repeater_inactive_timeout_sec: 60,
            repeater_info_update_interval_sec: 0,
            call_timeout_sec: 2,
            data_timeout_sec: 2,
            rssi_update_during_call_ms: 0,
            ignored_snmp_repeater_hosts: String::new(),
            log_flags: crate::logging::LogFlags::none(),
        }
    }

    pub fn with_sms_send_retry_interval_sec(mut self, v: u64) -> Self {
        self.sms_send_retry_interval_sec = v;
        self
    }

    pub fn with_sms_send_max_retry_count(mut self, v: u32) -> Self {
        self.sms_send_max_retry_count = v;
        self
    }

    pub fn with_repeater_inactive_timeout_sec(mut self, v: u64) -> Self {
        self.repeater_inactive_timeout_sec = v;
        self
    }

    pub fn with_repeater_info_update_interval_sec(mut self, v: u64) -> Self {
        self.repeater_info_update_interval_sec = v;
        self
    }

    pub fn with_call_timeout_sec(mut self, v: u64) -> Self {
        self.call_timeout_sec = v;
        self
    }

    pub fn with_data_timeout_sec(mut self, v: u64) -> Self {
        self.data_timeout_sec = v;
        self
    }

    pub fn with_rssi_update_during_call_ms(mut self, v: u64) -> Self {
        self.rssi_update_during_call_ms = v;
        self
    }

    pub fn with_ignored_snmp_repeater_hosts(mut self, v: impl Into<String>) -> Self {
        self.ignored_snmp_repeater_hosts = v.into();
        self
    }

    pub fn with_log_flags(mut self, v: crate::logging::LogFlags) -> Self {
        self.log_flags = v;
        self
    }

    pub fn sms_send_retry_interval_sec(&self) -> u64 {
        self.sms_send_retry_interval_sec
    }

    pub fn sms_send_max_retry_count(&self) -> u32 {
        self.sms_send_max_retry_count
    }

    pub fn repeater_inactive_timeout_sec(&self) -> u64 {
        self.repeater_inactive_timeout_sec
    }

    pub fn repeater_info_update_interval_sec(&self) -> u64 {
        self.repeater_info_update_interval_sec
    }

    pub fn call_timeout_sec(&self) -> u64 {
        self.call_timeout_sec
    }

    pub fn data_timeout_sec(&self) -> u64 {
        self.data_timeout_sec
    }

    pub fn rssi_update_during_call_ms(&self) -> u64 {
        self.rssi_update_during_call_ms
    }

    /// Comma-separated hostnames/IPs whose SNMP polling is suppressed.
    pub fn ignored_snmp_repeater_hosts(&self) -> &str {
        &self.ignored_snmp_repeater_hosts
    }

    pub fn log_flags(&self) -> crate::logging::LogFlags {
        self.log_flags
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_upstream() {
        let cfg = RuntimeConfig::new();
        assert_eq!(cfg.repeater_inactive_timeout_sec(), 60);
        assert_eq!(cfg.sms_send_max_retry_count(), 3);
    }

    #[test]
    fn builders_override_fields() {
        let cfg = RuntimeConfig::new()
            .with_sms_send_retry_interval_sec(10)
            .with_call_timeout_sec(4);
        assert_eq!(cfg.sms_send_retry_interval_sec(), 10);
        assert_eq!(cfg.call_timeout_sec(), 4);
    }
}
