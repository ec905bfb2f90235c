//! Single entry point for driving the whole core forward in time.
//!
//! An embedder owns a [`TickDriver`], feeds it inbound datagrams via
//! [`TickDriver::registry_mut`]/[`TickDriver::sms_tx_mut`], and calls
//! [`TickDriver::tick`] on its poll loop (paced by [`TX_PACING_MS`] at
//! worst, sooner if an SMS retry is pending).

use crate::config::RuntimeConfig;
use crate::external::{DmrDataSender, RawUdpSender, RetryTracker, Scheduler, SnmpClient, TimeoutHandler};
use crate::protocol::constants::TX_PACING_MS;
use crate::registry::Registry;
use crate::sms_tx::SmsTxBuffer;

/// Owns the registry and the SMS TX FIFO, driving both forward on every
/// tick and returning a suggested next-deadline hint in milliseconds.
#[derive(Debug, Default)]
pub struct TickDriver {
    registry: Registry,
    sms_tx: SmsTxBuffer,
}

impl TickDriver {
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            sms_tx: SmsTxBuffer::new(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn sms_tx(&self) -> &SmsTxBuffer {
        &self.sms_tx
    }

    pub fn sms_tx_mut(&mut self) -> &mut SmsTxBuffer {
        &mut self.sms_tx
    }

    /// Advance both subsystems by one tick, returning a next-deadline
    /// hint (milliseconds from now) the embedder's poll loop can use.
    #[allow(clippy::too_many_arguments)]
    pub fn tick(
        &mut self,
        now_ms: u64,
        config: &RuntimeConfig,
        udp_sender: &mut impl RawUdpSender,
        sms_sender: &mut impl DmrDataSender,
        retry_tracker: &mut impl RetryTracker,
        scheduler: &mut impl Scheduler,
        snmp: &mut impl SnmpClient,
        timeout_handlers: &mut impl TimeoutHandler,
    ) -> u64 {
        self.registry.process(now_ms, config, udp_sender, snmp, timeout_handlers);
        self.sms_tx.process(now_ms, config, sms_sender, retry_tracker, scheduler);

        if self.sms_tx.is_empty() {
            TX_PACING_MS
        } else {
            0
        }
    }
}
