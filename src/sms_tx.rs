//! Global SMS TX FIFO: queues outbound messages and retries failed
//! private-call sends up to a configured limit, one entry at a time.
//!
//! Group messages are unconfirmed at the DMR layer, so they're sent
//! exactly once and dropped regardless of outcome.

use std::collections::VecDeque;
use std::net::Ipv4Addr;

use crate::config::RuntimeConfig;
use crate::external::{DmrDataSender, RetryTracker, Scheduler};
use crate::protocol::constants::{CallType, SmsType, Timeslot};

#[derive(Debug, Clone)]
pub struct SmsTxEntry {
    pub repeater: Option<Ipv4Addr>,
    pub ts: Timeslot,
    pub call_type: CallType,
    pub dst_id: u32,
    pub src_id: u32,
    pub sms_type: SmsType,
    pub msg: String,
    pub added_at_ms: u64,
    pub send_tries: u32,
}

/// FIFO of pending SMS sends; only the front entry is ever active.
#[derive(Debug, Default)]
pub struct SmsTxBuffer {
    entries: VecDeque<SmsTxEntry>,
    last_send_try_at_ms: Option<u64>,
}

impl SmsTxBuffer {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            last_send_try_at_ms: None,
        }
    }

    /// Queue a message. `repeater: None` means broadcast to every
    /// tracked repeater.
    #[allow(clippy::too_many_arguments)]
    pub fn add(
        &mut self,
        repeater: Option<Ipv4Addr>,
        ts: Timeslot,
        call_type: CallType,
        dst_id: u32,
        src_id: u32,
        sms_type: SmsType,
        msg: impl Into<String>,
        now_ms: u64,
    ) {
        self.entries.push_back(SmsTxEntry {
            repeater,
            ts,
            call_type,
            dst_id,
            src_id,
            sms_type,
            msg: msg.into(),
            added_at_ms: now_ms,
            send_tries: 0,
        });
    }

    pub fn first_entry(&self) -> Option<&SmsTxEntry> {
        self.entries.front()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn remove_first(&mut self) {
        self.entries.pop_front();
    }

    /// Per-tick sweep: waits out the retry interval, drops the front
    /// entry once it exceeds the retry budget, otherwise dispatches it
    /// and either removes it (group call) or bumps its retry count
    /// (private call, awaiting ack out of band).
    pub fn process(
        &mut self,
        now_ms: u64,
        config: &RuntimeConfig,
        sender: &mut impl DmrDataSender,
        retry_tracker: &mut impl RetryTracker,
        scheduler: &mut impl Scheduler,
    ) {
        if self.entries.is_empty() {
            return;
        }

        let retry_interval_ms = config.sms_send_retry_interval_sec() * 1000;
        if let Some(last) = self.last_send_try_at_ms {
            let elapsed = now_ms.saturating_sub(last);
            if elapsed < retry_interval_ms {
                scheduler.set_max_timeout_ms(retry_interval_ms - elapsed);
                return;
            }
        }

        if self.entries[0].send_tries >= config.sms_send_max_retry_count() {
            let entry = self.entries.front().expect("checked non-empty above");
            crate::dmr_log!(config.log_flags(), "smstxbuf: all tries of sending the first entry have failed");
            retry_tracker.entry_send_unsuccessful(entry.dst_id, &entry.msg);
            self.remove_first();
            return;
        }

        let entry = self.entries.front().expect("checked non-empty above").clone();
        match entry.sms_type {
            SmsType::MotorolaTms => sender.send_motorola_tms_sms(
                entry.repeater.is_none(),
                entry.repeater,
                entry.ts,
                entry.call_type,
                entry.dst_id,
                entry.src_id,
                &entry.msg,
            ),
            SmsType::Normal => sender.send_sms(
                entry.repeater.is_none(),
                entry.repeater,
                entry.ts,
                entry.call_type,
                entry.dst_id,
                entry.src_id,
                &entry.msg,
            ),
        }

        if entry.call_type == CallType::Group {
            // Unconfirmed at the DMR layer: sent once and dropped, no
            // retry-tracker notification either way.
            self.remove_first();
        } else if let Some(front) = self.entries.front_mut() {
            front.send_tries += 1;
        }
        self.last_send_try_at_ms = Some(now_ms);
        scheduler.set_max_timeout_ms(0);
    }

    pub fn deinit(&mut self) {
        self.entries.clear();
        self.last_send_try_at_ms = None;
    }
}
