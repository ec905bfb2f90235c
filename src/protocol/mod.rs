//! IPSC wire protocol: constants, bit-level helpers, BPTC storage, link
//! control framing, payload construction, the raw datagram codec, and
//! SMS fragment/block slicing.

pub mod bits;
pub mod bptc;
pub mod codec;
pub mod constants;
pub mod crc;
pub mod lc;
pub mod payload;
pub mod sms_fragment;

pub use codec::{decode, heartbeat_decode, CodecError, IpscPacket, RawDatagram};
pub use constants::{CallType, SlotType, SmsType, Timeslot};
