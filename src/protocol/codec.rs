//! Fixed-layout raw IPSC datagram: decode from UDP bytes, construct for
//! outbound sends, and the reduced form ([`IpscPacket`]) the rest of the
//! crate actually operates on.

use super::bits::bytes_to_bits;
use super::constants::{CallType, SlotType, Timeslot, DELIMITER, IPSC_UDP_PORT, PAYLOAD_LEN};
use super::payload::Payload;

/// Byte length of one raw IPSC datagram, matching the packed header
/// layout below field-for-field (including reserved padding).
pub const RAW_DATAGRAM_LEN: usize = 2 + 2 + 1 + 3 + 1 + 7 + 2 + 2 + 2 + 2 + 2 + PAYLOAD_LEN + 2 + 1 + 1 + 3 + 1 + 3 + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    TooShort { got: usize, want: usize },
    BadDelimiter(u16),
    UnknownSlotType(u16),
    UnknownTimeslot(u16),
    UnknownCallType(u8),
}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooShort { got, want } => {
                write!(f, "datagram too short: got {got} bytes, need {want}")
            }
            Self::BadDelimiter(v) => write!(f, "bad delimiter 0x{v:04x}"),
            Self::UnknownSlotType(v) => write!(f, "unrecognized slot type 0x{v:04x}"),
            Self::UnknownTimeslot(v) => write!(f, "unrecognized timeslot marker 0x{v:04x}"),
            Self::UnknownCallType(v) => write!(f, "unrecognized call type 0x{v:02x}"),
        }
    }
}

impl std::error::Error for CodecError {}

/// The fixed raw datagram layout, offsets matching the wire format
/// byte-for-byte. Reserved fields are kept (as zeroed bytes) rather than
/// dropped, so `construct` produces a datagram the same length and shape
/// as one seen on the wire.
#[derive(Debug, Clone, Copy)]
pub struct RawDatagram {
    pub udp_source_port: u16,
    pub seq: u8,
    pub packet_type: u8,
    pub timeslot_raw: u16,
    pub slot_type_raw: u16,
    pub delimiter: u16,
    pub frame_type_raw: u16,
    pub payload: Payload,
    pub calltype: u8,
    pub dst_id: u32,
    pub src_id: u32,
}

fn put_u16(out: &mut [u8], offset: usize, v: u16) {
    out[offset..offset + 2].copy_from_slice(&v.to_be_bytes());
}

fn get_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([bytes[offset], bytes[offset + 1]])
}

fn put_24(out: &mut [u8], offset: usize, v: u32) {
    let b = v.to_be_bytes();
    out[offset] = b[1];
    out[offset + 1] = b[2];
    out[offset + 2] = b[3];
}

fn get_24(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([0, bytes[offset], bytes[offset + 1], bytes[offset + 2]])
}

impl RawDatagram {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; RAW_DATAGRAM_LEN];
        put_u16(&mut out, 0, self.udp_source_port);
        out[4] = self.seq;
        out[8] = self.packet_type;
        put_u16(&mut out, 16, self.timeslot_raw);
        put_u16(&mut out, 18, self.slot_type_raw);
        put_u16(&mut out, 20, self.delimiter);
        put_u16(&mut out, 22, self.frame_type_raw);
        out[26..26 + PAYLOAD_LEN].copy_from_slice(&self.payload);
        let after_payload = 26 + PAYLOAD_LEN;
        out[after_payload + 2] = self.calltype;
        put_24(&mut out, after_payload + 4, self.dst_id);
        put_24(&mut out, after_payload + 8, self.src_id);
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() < RAW_DATAGRAM_LEN {
            return Err(CodecError::TooShort {
                got: bytes.len(),
                want: RAW_DATAGRAM_LEN,
            });
        }
        let after_payload = 26 + PAYLOAD_LEN;
        let mut payload = [0u8; PAYLOAD_LEN];
        payload.copy_from_slice(&bytes[26..after_payload]);
        Ok(Self {
            udp_source_port: get_u16(bytes, 0),
            seq: bytes[4],
            packet_type: bytes[8],
            timeslot_raw: get_u16(bytes, 16),
            slot_type_raw: get_u16(bytes, 18),
            delimiter: get_u16(bytes, 20),
            frame_type_raw: get_u16(bytes, 22),
            payload,
            calltype: bytes[after_payload + 2],
            dst_id: get_24(bytes, after_payload + 4),
            src_id: get_24(bytes, after_payload + 8),
        })
    }
}

/// Decoded, validated view of a raw datagram: what the rest of the crate
/// actually works with.
#[derive(Debug, Clone)]
pub struct IpscPacket {
    pub timeslot: Timeslot,
    pub slot_type: SlotType,
    pub call_type: CallType,
    pub dst_id: u32,
    pub src_id: u32,
    pub payload: Payload,
    pub payload_bits: Vec<bool>,
    pub from_us: bool,
}

/// Decode and validate a raw UDP datagram body into an [`IpscPacket`].
/// `from_us` should be set when the embedder recognizes the packet's
/// source address as its own outbound socket (a loopback echo), so
/// callers can ignore self-originated traffic.
pub fn decode(bytes: &[u8], from_us: bool) -> Result<IpscPacket, CodecError> {
    let raw = RawDatagram::from_bytes(bytes)?;
    if raw.delimiter != DELIMITER {
        return Err(CodecError::BadDelimiter(raw.delimiter));
    }
    let timeslot =
        Timeslot::from_raw(raw.timeslot_raw).ok_or(CodecError::UnknownTimeslot(raw.timeslot_raw))?;
    let slot_type =
        SlotType::from_raw(raw.slot_type_raw).ok_or(CodecError::UnknownSlotType(raw.slot_type_raw))?;
    let call_type = CallType::from_raw(raw.calltype).ok_or(CodecError::UnknownCallType(raw.calltype))?;
    Ok(IpscPacket {
        timeslot,
        slot_type,
        call_type,
        dst_id: raw.dst_id,
        src_id: raw.src_id,
        payload: raw.payload,
        payload_bits: bytes_to_bits(&raw.payload),
        from_us,
    })
}

/// IPSC heartbeats are UDP datagrams addressed to the IPSC port with no
/// body at all (as opposed to the fixed-length packet used for every
/// other IPSC message).
pub fn heartbeat_decode(udp_dest_port: u16, udp_body_len: usize) -> bool {
    udp_dest_port == IPSC_UDP_PORT && udp_body_len == 0
}

/// Build a raw outbound datagram for `payload` under the given slot
/// parameters. `udp_source_port` is left at 0; the sending socket fills
/// it in at the UDP layer.
#[allow(clippy::too_many_arguments)]
pub fn construct(
    seq: u8,
    ts: Timeslot,
    slot_type: SlotType,
    call_type: CallType,
    dst_id: u32,
    src_id: u32,
    payload: Payload,
) -> RawDatagram {
    RawDatagram {
        udp_source_port: 0,
        seq,
        packet_type: slot_type.packet_type_byte(),
        timeslot_raw: ts.raw(),
        slot_type_raw: slot_type.raw(),
        delimiter: DELIMITER,
        frame_type_raw: slot_type.frame_type_byte() as u16,
        payload,
        calltype: call_type.raw(),
        dst_id,
        src_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construct_then_decode_round_trips() {
        let payload = [0xAAu8; PAYLOAD_LEN];
        let raw = construct(5, Timeslot::Ts2, SlotType::Csbk, CallType::Group, 100, 200, payload);
        let bytes = raw.to_bytes();
        assert_eq!(bytes.len(), RAW_DATAGRAM_LEN);
        let decoded = decode(&bytes, false).unwrap();
        assert_eq!(decoded.timeslot, Timeslot::Ts2);
        assert_eq!(decoded.slot_type, SlotType::Csbk);
        assert_eq!(decoded.call_type, CallType::Group);
        assert_eq!(decoded.dst_id, 100);
        assert_eq!(decoded.src_id, 200);
        assert_eq!(decoded.payload, payload);
        assert!(!decoded.from_us);
    }

    #[test]
    fn too_short_is_rejected() {
        let err = decode(&[0u8; 4], false).unwrap_err();
        assert!(matches!(err, CodecError::TooShort { .. }));
    }

    #[test]
    fn bad_delimiter_is_rejected() {
        let payload = [0u8; PAYLOAD_LEN];
        let mut raw = construct(0, Timeslot::Ts1, SlotType::Csbk, CallType::Private, 1, 1, payload);
        raw.delimiter = 0x0000;
        let bytes = raw.to_bytes();
        assert!(matches!(decode(&bytes, false), Err(CodecError::BadDelimiter(_))));
    }

    #[test]
    fn heartbeat_is_zero_length_udp_body_on_the_ipsc_port() {
        assert!(heartbeat_decode(IPSC_UDP_PORT, 0));
        assert!(!heartbeat_decode(IPSC_UDP_PORT, RAW_DATAGRAM_LEN));
        assert!(!heartbeat_decode(9999, 0), "wrong destination port isn't a heartbeat");
    }
}
