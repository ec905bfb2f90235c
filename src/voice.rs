//! Voice call lifecycle: LC header announcement, AMBE frame relay, call
//! teardown, and echo ("parrot") playback.

use std::mem;

use crate::protocol::bptc::VariableBptc1611;
use crate::protocol::codec::construct;
use crate::protocol::constants::{CallType, SlotType, Timeslot, DEFAULT_DMR_ID};
use crate::protocol::payload;
use crate::registry::slot::{Slot, SlotState, VOICE_FRAME_BYTES};
use crate::registry::Registry;

/// Embedded-signalling BPTC storages use 8 rows (matches [`crate::registry::slot`]).
const EMB_SIG_LC_ROWS: usize = 8;
/// Frame index the outbound cycle starts at: the voice LC header bursts
/// stand in for frames A/B of the first superframe, so AMBE relay begins
/// at frame C.
const FIRST_AMBE_FRAME_INDEX: u8 = 2;
/// Voice LC header repeated this many times to open a call.
const LC_HEADER_REPEATS: u8 = 4;

fn queue_raw(
    slot: &mut Slot,
    ts: Timeslot,
    slot_type: SlotType,
    call_type: CallType,
    dst_id: u32,
    src_id: u32,
    payload: payload::Payload,
) {
    let raw = construct(slot.next_seqnum(), ts, slot_type, call_type, dst_id, src_id, payload);
    slot.ipsc_tx_rawpacketbuf.push_back(raw);
}

/// Open a voice call on `ts`: reset the slot's outbound sequence number,
/// build the embedded-signalling LC storage for this call, and queue the
/// opening voice LC header bursts.
pub fn start_voice_call(registry: &mut Registry, ip: std::net::Ipv4Addr, ts: Timeslot, call_type: CallType, dst_id: u32, src_id: u32) {
    let Some(repeater) = registry.find_by_ip_mut(ip) else { return };
    let slot = &mut repeater.slots[ts.index()];
    slot.ipsc_tx_seqnum = 0;
    slot.voice_frame_index = FIRST_AMBE_FRAME_INDEX;
    slot.call_type = Some(call_type);
    slot.dst_id = dst_id;
    slot.src_id = src_id;
    slot.state = SlotState::CallRunning;

    let mut outbound = VariableBptc1611::init(EMB_SIG_LC_ROWS);
    let lc_bits = payload::lc_bits(call_type, dst_id, src_id);
    outbound.construct(&lc_bits, lc_bits.len());
    slot.ipsc_tx_emb_sig_lc_vbptc_storage = outbound;

    for _ in 0..LC_HEADER_REPEATS {
        queue_raw(
            slot,
            ts,
            SlotType::VoiceLcHeader,
            call_type,
            dst_id,
            src_id,
            payload::voice_lc_header(call_type, dst_id, src_id),
        );
    }
}

/// Relay one AMBE voice frame, cycling through voice data slot types
/// A-F and pulling 32 embedded-signalling bits per B-E frame.
pub fn play_ambe_data(
    registry: &mut Registry,
    ip: std::net::Ipv4Addr,
    ts: Timeslot,
    call_type: CallType,
    dst_id: u32,
    src_id: u32,
    voice_bits: &[bool],
) {
    let Some(repeater) = registry.find_by_ip_mut(ip) else { return };
    let slot = &mut repeater.slots[ts.index()];
    let slot_type = SlotType::from_voice_index(slot.next_voice_frame_index());

    let emb_bits = if slot_type.is_voice_data()
        && !matches!(slot_type, SlotType::VoiceDataA)
    {
        slot.ipsc_tx_emb_sig_lc_vbptc_storage.take_bits(32)
    } else {
        Vec::new()
    };

    queue_raw(
        slot,
        ts,
        slot_type,
        call_type,
        dst_id,
        src_id,
        payload::voice_frame(voice_bits, &emb_bits),
    );
}

/// Close a voice call: send the terminator-with-LC burst and mark the
/// slot idle again.
pub fn end_voice_call(registry: &mut Registry, ip: std::net::Ipv4Addr, ts: Timeslot, call_type: CallType, dst_id: u32, src_id: u32) {
    let Some(repeater) = registry.find_by_ip_mut(ip) else { return };
    let slot = &mut repeater.slots[ts.index()];
    queue_raw(
        slot,
        ts,
        SlotType::TerminatorWithLc,
        call_type,
        dst_id,
        src_id,
        payload::terminator_with_lc(call_type, dst_id, src_id),
    );
    slot.state = SlotState::Idle;
}

/// Store one received voice frame's bytes into the slot's echo buffer.
pub fn store_voice_frame_to_echo_buf(registry: &mut Registry, ip: std::net::Ipv4Addr, ts: Timeslot, voice_bytes: [u8; VOICE_FRAME_BYTES]) {
    if let Some(repeater) = registry.find_by_ip_mut(ip) {
        repeater.slots[ts.index()].echo_buf.push_back(voice_bytes);
    }
}

/// Replay and discard everything buffered on `ts`, as a default-identity
/// group call. Detaches the buffer before replay so frames queued while
/// playback is underway start a fresh echo rather than being consumed
/// out from under the loop.
pub fn play_and_free_echo_buf(registry: &mut Registry, ip: std::net::Ipv4Addr, ts: Timeslot, voice_bits_for: impl Fn(&[u8; VOICE_FRAME_BYTES]) -> Vec<bool>) {
    let Some(repeater) = registry.find_by_ip_mut(ip) else { return };
    let slot = &mut repeater.slots[ts.index()];
    if slot.echo_buf.is_empty() {
        return;
    }
    let buffered = mem::take(&mut slot.echo_buf);

    start_voice_call(registry, ip, ts, CallType::Group, DEFAULT_DMR_ID, DEFAULT_DMR_ID);
    for frame in &buffered {
        play_ambe_data(registry, ip, ts, CallType::Group, DEFAULT_DMR_ID, DEFAULT_DMR_ID, &voice_bits_for(frame));
    }
    end_voice_call(registry, ip, ts, CallType::Group, DEFAULT_DMR_ID, DEFAULT_DMR_ID);
}
