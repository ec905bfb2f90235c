//! Per-timeslot call/data state carried by each [`super::repeater::Repeater`].

use std::collections::VecDeque;

use crate::protocol::bptc::VariableBptc1611;
use crate::protocol::constants::CallType;
use crate::protocol::RawDatagram;

/// Number of bytes in one stored AMBE voice frame (3 fixed-length vocoder
/// frames packed into the echo buffer entry).
pub const VOICE_FRAME_BYTES: usize = 27;

/// Embedded-signalling BPTC storages use 8 rows: 77 data bits plus the
/// trailing Hamming/column-parity rows.
const EMB_SIG_LC_ROWS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Idle,
    CallRunning,
    DataReceiveRunning,
}

impl SlotState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::CallRunning => "call running",
            Self::DataReceiveRunning => "data receive running",
        }
    }
}

/// One of a repeater's two timeslots.
#[derive(Debug, Clone)]
pub struct Slot {
    pub state: SlotState,
    pub call_type: Option<CallType>,
    pub dst_id: u32,
    pub src_id: u32,

    /// Wrapping outbound sequence number, reset to 0 at the start of
    /// every new call/SMS transfer.
    pub ipsc_tx_seqnum: u8,
    pub voice_frame_index: u8,

    pub call_started_at_ms: Option<u64>,
    pub last_voice_frame_at_ms: Option<u64>,
    pub data_header_received_at_ms: Option<u64>,

    /// Inbound embedded-signalling LC storage, accumulated across frames
    /// B-E of the current voice superframe.
    pub emb_sig_lc_vbptc_storage: VariableBptc1611,
    /// Outbound counterpart, constructed once per call from the LC and
    /// read 32 bits at a time as frames B-E are sent.
    pub ipsc_tx_emb_sig_lc_vbptc_storage: VariableBptc1611,

    pub ipsc_tx_rawpacketbuf: VecDeque<RawDatagram>,
    pub last_ipsc_packet_sent_at_ms: Option<u64>,

    pub echo_buf: VecDeque<[u8; VOICE_FRAME_BYTES]>,

    pub voicestream: Option<String>,
}

impl Slot {
    pub fn new() -> Self {
        Self {
            state: SlotState::Idle,
            call_type: None,
            dst_id: 0,
            src_id: 0,
            ipsc_tx_seqnum: 0,
            voice_frame_index: 0,
            call_started_at_ms: None,
            last_voice_frame_at_ms: None,
            data_header_received_at_ms: None,
            emb_sig_lc_vbptc_storage: VariableBptc1611::init(EMB_SIG_LC_ROWS),
            ipsc_tx_emb_sig_lc_vbptc_storage: VariableBptc1611::init(EMB_SIG_LC_ROWS),
            ipsc_tx_rawpacketbuf: VecDeque::new(),
            last_ipsc_packet_sent_at_ms: None,
            echo_buf: VecDeque::new(),
            voicestream: None,
        }
    }

    /// Next wrapping sequence number, mutating `ipsc_tx_seqnum` for the
    /// following call.
    pub fn next_seqnum(&mut self) -> u8 {
        let seq = self.ipsc_tx_seqnum;
        self.ipsc_tx_seqnum = self.ipsc_tx_seqnum.wrapping_add(1);
        seq
    }

    pub fn next_voice_frame_index(&mut self) -> u8 {
        let idx = self.voice_frame_index;
        self.voice_frame_index = (self.voice_frame_index + 1) % 6;
        idx
    }
}

impl Default for Slot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seqnum_wraps_at_256() {
        let mut slot = Slot::new();
        slot.ipsc_tx_seqnum = 255;
        assert_eq!(slot.next_seqnum(), 255);
        assert_eq!(slot.ipsc_tx_seqnum, 0);
    }

    #[test]
    fn voice_frame_index_cycles_mod_6() {
        let mut slot = Slot::new();
        let seen: Vec<u8> = (0..7).map(|_| slot.next_voice_frame_index()).collect();
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 5, 0]);
    }

    #[test]
    fn new_slot_starts_idle() {
        let slot = Slot::new();
        assert_eq!(slot.state, SlotState::Idle);
        assert!(slot.ipsc_tx_rawpacketbuf.is_empty());
    }
}
