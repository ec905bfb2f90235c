//! Protocol-wide constants: wire magics, ports, and buffer sizing.
//!
//! These are compile-time facts about the IPSC wire format, not runtime
//! knobs — see [`crate::config::RuntimeConfig`] for the latter.

/// UDP destination port used by every IPSC datagram, inbound and outbound.
pub const IPSC_UDP_PORT: u16 = 62006;

/// Delimiter value that must appear at a fixed offset in every raw datagram.
pub const DELIMITER: u16 = 0x1111;

/// Timeslot marker for TS1.
pub const TIMESLOT_RAW_TS1: u16 = 0x1111;
/// Timeslot marker for TS2.
pub const TIMESLOT_RAW_TS2: u16 = 0x2222;

/// Length in bytes of the fixed IPSC payload field.
pub const PAYLOAD_LEN: usize = 34;

/// Number of bits a 34-byte payload expands into (34 * 8).
pub const PAYLOAD_BITCOUNT: usize = PAYLOAD_LEN * 8;

/// Maximum number of UTF-16LE characters (as raw bytes, including the
/// leading two zero bytes) an SMS fragment may hold before truncation.
pub const MAX_FRAGMENT_SIZE: usize = 140;

/// Size in bytes of one rate-3/4 data block's payload (excludes CRC9/serial).
pub const DATA_BLOCK_LEN: usize = 16;

/// Number of CSBK preamble datagrams sent ahead of every SMS data header.
pub const SMS_PREAMBLE_COUNT: u8 = 10;

/// Minimum spacing, in milliseconds, between two sends on the same slot.
pub const TX_PACING_MS: u64 = 50;

/// Default DMR id used as both source and destination for echoed
/// ("parrot") playback when no specific identity applies.
pub const DEFAULT_DMR_ID: u32 = 9999999;

/// Slot type magic values (16-bit), transmitted verbatim on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotType {
    VoiceLcHeader,
    TerminatorWithLc,
    Csbk,
    DataHeader,
    Rate12Data,
    Rate34Data,
    VoiceDataA,
    VoiceDataB,
    VoiceDataC,
    VoiceDataD,
    VoiceDataE,
    VoiceDataF,
}

impl SlotType {
    /// Raw 16-bit value as transmitted on the wire.
    pub const fn raw(self) -> u16 {
        match self {
            Self::VoiceLcHeader => 0x1111,
            Self::TerminatorWithLc => 0x2222,
            Self::Csbk => 0x3333,
            Self::DataHeader => 0x4444,
            Self::Rate12Data => 0x5555,
            Self::Rate34Data => 0x6666,
            Self::VoiceDataA => 0xBBBB,
            Self::VoiceDataB => 0xCCCC,
            Self::VoiceDataC => 0x7777,
            Self::VoiceDataD => 0x8888,
            Self::VoiceDataE => 0x9999,
            Self::VoiceDataF => 0xAAAA,
        }
    }

    /// Parse a raw 16-bit wire value; `None` if it doesn't name a slot type.
    pub const fn from_raw(raw: u16) -> Option<Self> {
        Some(match raw {
            0x1111 => Self::VoiceLcHeader,
            0x2222 => Self::TerminatorWithLc,
            0x3333 => Self::Csbk,
            0x4444 => Self::DataHeader,
            0x5555 => Self::Rate12Data,
            0x6666 => Self::Rate34Data,
            0xBBBB => Self::VoiceDataA,
            0xCCCC => Self::VoiceDataB,
            0x7777 => Self::VoiceDataC,
            0x8888 => Self::VoiceDataD,
            0x9999 => Self::VoiceDataE,
            0xAAAA => Self::VoiceDataF,
            _ => return None,
        })
    }

    /// `packet_type` byte the outbound constructor writes for this slot type.
    ///
    /// Verbatim values captured from a reference trace; not derivable from
    /// any other field.
    pub const fn packet_type_byte(self) -> u8 {
        match self {
            Self::VoiceLcHeader
            | Self::TerminatorWithLc
            | Self::VoiceDataA
            | Self::VoiceDataB
            | Self::VoiceDataC
            | Self::VoiceDataD
            | Self::VoiceDataE
            | Self::VoiceDataF => 0x00,
            Self::Csbk | Self::DataHeader | Self::Rate12Data | Self::Rate34Data => 0x01,
        }
    }

    /// `frame_type` byte the outbound constructor writes for this slot type.
    pub const fn frame_type_byte(self) -> u8 {
        match self {
            Self::VoiceLcHeader => 0x01,
            Self::TerminatorWithLc => 0x02,
            Self::VoiceDataA => 0x00,
            Self::VoiceDataB | Self::VoiceDataC | Self::VoiceDataD | Self::VoiceDataE => 0x03,
            Self::VoiceDataF => 0x04,
            Self::Csbk | Self::DataHeader | Self::Rate12Data | Self::Rate34Data => 0x00,
        }
    }

    /// Whether this slot type carries one of the six rotating voice frames.
    pub const fn is_voice_data(self) -> bool {
        matches!(
            self,
            Self::VoiceDataA
                | Self::VoiceDataB
                | Self::VoiceDataC
                | Self::VoiceDataD
                | Self::VoiceDataE
                | Self::VoiceDataF
        )
    }

    /// The voice-frame index (0=A..5=F) used by [`Self::from_voice_index`].
    pub const fn from_voice_index(index: u8) -> Self {
        match index % 6 {
            0 => Self::VoiceDataA,
            1 => Self::VoiceDataB,
            2 => Self::VoiceDataC,
            3 => Self::VoiceDataD,
            4 => Self::VoiceDataE,
            _ => Self::VoiceDataF,
        }
    }
}

/// Timeslot discriminant. Modeled as a two-variant enum rather than a
/// signed/unsigned integer so there is no dead "ts < 0" branch to reproduce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timeslot {
    Ts1,
    Ts2,
}

impl Timeslot {
    /// Array index (0 or 1) for indexing a repeater's two slots.
    pub const fn index(self) -> usize {
        match self {
            Self::Ts1 => 0,
            Self::Ts2 => 1,
        }
    }

    /// Build from a 0/1 index.
    pub const fn from_index(index: usize) -> Self {
        if index == 0 {
            Self::Ts1
        } else {
            Self::Ts2
        }
    }

    pub(crate) const fn raw(self) -> u16 {
        match self {
            Self::Ts1 => TIMESLOT_RAW_TS1,
            Self::Ts2 => TIMESLOT_RAW_TS2,
        }
    }

    pub(crate) const fn from_raw(raw: u16) -> Option<Self> {
        match raw {
            TIMESLOT_RAW_TS1 => Some(Self::Ts1),
            TIMESLOT_RAW_TS2 => Some(Self::Ts2),
            _ => None,
        }
    }
}

/// Call type carried in every IPSC datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallType {
    Private,
    Group,
}

impl CallType {
    pub(crate) const fn raw(self) -> u8 {
        match self {
            Self::Private => 0x00,
            Self::Group => 0x01,
        }
    }

    pub(crate) const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0x00 => Some(Self::Private),
            0x01 => Some(Self::Group),
            _ => None,
        }
    }
}

/// SMS transport variant (see data-header/CSBK construction in `send_sms`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SmsType {
    Normal,
    MotorolaTms,
}
