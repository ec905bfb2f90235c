//! SMS message fragment construction: UTF-16LE byte interleave, block
//! slicing, and the trailing fragment CRC32.
//!
//! Only plain-ASCII text round-trips losslessly through the interleave
//! scheme below (each source byte becomes one UTF-16LE code unit with a
//! zero high byte); this matches the DD_FORMAT_UTF16LE short-data header
//! used for outbound SMS.

use super::constants::MAX_FRAGMENT_SIZE;
use super::crc::crc32_sms_fragment;

/// One rate-3/4 data block's 16-byte payload before CRC9/serial framing.
pub type BlockData = [u8; 16];

/// UTF-16LE-interleave `msg` into a zero-padded fragment buffer: the
/// first two bytes are reserved/empty, then every other byte holds one
/// message byte, capped at [`MAX_FRAGMENT_SIZE`].
pub fn build_fragment(msg: &str) -> (Vec<u8>, usize) {
    let mut fragment = vec![0u8; MAX_FRAGMENT_SIZE];
    let bytes_stored = (2 + msg.len() * 2).min(MAX_FRAGMENT_SIZE);
    let mut i = 2;
    for &b in msg.as_bytes() {
        if i >= bytes_stored {
            break;
        }
        fragment[i] = b;
        i += 2;
    }
    (fragment, bytes_stored)
}

/// Number of rate-3/4 data blocks needed to carry `bytes_stored` fragment
/// bytes plus a trailing 4-byte CRC32, per DMR AI spec page 73.
pub fn blocks_needed(bytes_stored: usize) -> u8 {
    let mut needed = (bytes_stored as f64 / 16.0).ceil() as u32;
    if needed * 16 - bytes_stored as u32 >= 4 {
        needed as u8
    } else {
        needed += 1;
        needed as u8
    }
}

/// Padding octets between the message bytes and the trailing CRC32,
/// within the block space `blocks_needed` reserves.
pub fn pad_octets(blocks_needed: u8, bytes_stored: usize) -> u8 {
    ((blocks_needed as u32 * 16 - 4) - bytes_stored as u32) as u8
}

/// Slice a fragment into its data blocks, storing the fragment's CRC32
/// (big-endian-in-reverse, matching the construction order below) in the
/// trailing four bytes of the final block.
pub fn build_blocks(fragment: &[u8], bytes_stored: usize) -> Vec<BlockData> {
    let needed = blocks_needed(bytes_stored);
    let pad = pad_octets(needed, bytes_stored);
    let total_len = bytes_stored + pad as usize;
    let crc = crc32_sms_fragment(&fragment[..bytes_stored], total_len);

    let mut blocks = vec![[0u8; 16]; needed as usize];
    let mut stored_so_far = 0usize;
    for (i, block) in blocks.iter_mut().enumerate() {
        if i == needed as usize - 1 {
            block[15] = (crc >> 24) as u8;
            block[14] = (crc >> 16) as u8;
            block[13] = (crc >> 8) as u8;
            block[12] = crc as u8;
        }
        let remaining = bytes_stored.saturating_sub(stored_so_far);
        let to_store = remaining.min(16);
        block[..to_store].copy_from_slice(&fragment[stored_so_far..stored_so_far + to_store]);
        stored_so_far += to_store;
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_message_needs_one_block() {
        let (fragment, bytes_stored) = build_fragment("hi");
        assert_eq!(bytes_stored, 2 + 2 * 2);
        assert_eq!(blocks_needed(bytes_stored), 1);
        let blocks = build_blocks(&fragment, bytes_stored);
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn message_long_enough_to_spill_into_second_block() {
        let msg = "a".repeat(10); // bytes_stored = 2 + 20 = 22
        let (fragment, bytes_stored) = build_fragment(&msg);
        assert_eq!(bytes_stored, 22);
        // 22 bytes need ceil(22/16)=2 blocks; 2*16-22=10 >= 4, so stays at 2.
        assert_eq!(blocks_needed(bytes_stored), 2);
        let blocks = build_blocks(&fragment, bytes_stored);
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn crc_trailer_lands_in_final_block_tail() {
        let (fragment, bytes_stored) = build_fragment("x");
        let blocks = build_blocks(&fragment, bytes_stored);
        let last = blocks.last().unwrap();
        assert!(last[12..16].iter().any(|&b| b != 0) || bytes_stored >= 12);
    }

    #[test]
    fn fragment_is_truncated_at_max_size() {
        let msg = "z".repeat(200);
        let (_, bytes_stored) = build_fragment(&msg);
        assert_eq!(bytes_stored, MAX_FRAGMENT_SIZE);
    }
}
