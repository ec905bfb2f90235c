//! Link control (LC) PDU construction for voice LC header, terminator
//! with LC, and embedded signalling.
//!
//! The full-link-control PDU is the 9-byte frame carried (BPTC-protected)
//! in the voice LC header and terminator-with-LC bursts: one byte of
//! FLCO, one reserved/FID byte, one service-options byte, then 3-byte
//! dst_id and 3-byte src_id fields, big-endian. Embedded signalling LC
//! reuses the same 9-byte PDU but spreads it across the five embedded
//! signalling fragments of a voice superframe instead of a single burst.

use super::constants::CallType;

/// Full link control opcode for a group voice call.
const FLCO_GROUP_VOICE: u8 = 0x00;
/// Full link control opcode for a unit-to-unit (private) voice call.
const FLCO_PRIVATE_VOICE: u8 = 0x03;

/// Length in bytes of a full link control PDU.
pub const LC_PDU_LEN: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LcError {
    UnknownFlco(u8),
}

impl std::fmt::Display for LcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownFlco(v) => write!(f, "unrecognized FLCO byte 0x{v:02x}"),
        }
    }
}

impl std::error::Error for LcError {}

/// Build a 9-byte full link control PDU for a voice call.
///
/// Layout: `[flco, fid(0), service_options(0), dst_id[0..3], src_id[0..3]]`,
/// dst/src ids truncated to 24 bits and written big-endian.
pub fn build_lc(call_type: CallType, dst_id: u32, src_id: u32) -> [u8; LC_PDU_LEN] {
    let flco = match call_type {
        CallType::Group => FLCO_GROUP_VOICE,
        CallType::Private => FLCO_PRIVATE_VOICE,
    };
    let dst = dst_id.to_be_bytes();
    let src = src_id.to_be_bytes();
    [
        flco, 0x00, 0x00, dst[1], dst[2], dst[3], src[1], src[2], src[3],
    ]
}

/// Parse a full link control PDU back into its call type and ids.
pub fn parse_lc(pdu: &[u8; LC_PDU_LEN]) -> Result<(CallType, u32, u32), LcError> {
    let call_type = match pdu[0] {
        FLCO_GROUP_VOICE => CallType::Group,
        FLCO_PRIVATE_VOICE => CallType::Private,
        other => return Err(LcError::UnknownFlco(other)),
    };
    let dst_id = u32::from_be_bytes([0, pdu[3], pdu[4], pdu[5]]);
    let src_id = u32::from_be_bytes([0, pdu[6], pdu[7], pdu[8]]);
    Ok((call_type, dst_id, src_id))
}

/// Expand a 9-byte LC PDU into its 72-bit, MSB-first representation for
/// feeding into an embedded-signalling BPTC storage.
pub fn lc_to_bits(pdu: &[u8; LC_PDU_LEN]) -> Vec<bool> {
    super::bits::bytes_to_bits(pdu)
}

/// Recover a 9-byte LC PDU from 72 (or more, extra bits ignored) bits
/// previously produced by [`lc_to_bits`].
pub fn lc_from_bits(bits: &[bool]) -> [u8; LC_PDU_LEN] {
    let bytes = super::bits::bits_to_bytes(&bits[..LC_PDU_LEN * 8]);
    let mut out = [0u8; LC_PDU_LEN];
    out.copy_from_slice(&bytes[..LC_PDU_LEN]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_voice_round_trips() {
        let pdu = build_lc(CallType::Group, 12345, 67890);
        let (ct, dst, src) = parse_lc(&pdu).unwrap();
        assert_eq!(ct, CallType::Group);
        assert_eq!(dst, 12345);
        assert_eq!(src, 67890);
    }

    #[test]
    fn private_voice_round_trips() {
        let pdu = build_lc(CallType::Private, 1, 2);
        let (ct, dst, src) = parse_lc(&pdu).unwrap();
        assert_eq!(ct, CallType::Private);
        assert_eq!(dst, 1);
        assert_eq!(src, 2);
    }

    #[test]
    fn unknown_flco_rejected() {
        let mut pdu = build_lc(CallType::Group, 1, 2);
        pdu[0] = 0x7F;
        assert!(matches!(parse_lc(&pdu), Err(LcError::UnknownFlco(0x7F))));
    }

    #[test]
    fn bits_round_trip_through_embedded_signalling_encoding() {
        let pdu = build_lc(CallType::Private, 99, 100);
        let bits = lc_to_bits(&pdu);
        assert_eq!(bits.len(), LC_PDU_LEN * 8);
        let back = lc_from_bits(&bits);
        assert_eq!(back, pdu);
    }
}
