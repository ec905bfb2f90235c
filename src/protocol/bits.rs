//! Byte/bit conversion helpers used by the wire codec and BPTC storage.
//!
//! The IPSC codec works with individual bits (MSB-first per byte) for
//! payload expansion, embedded-signalling interleaving, and BPTC matrices.

/// Expand `bytes` into an MSB-first bit vector, one `bool` per bit.
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1 != 0);
        }
    }
    bits
}

/// Pack an MSB-first bit vector back into bytes, zero-padding the final
/// byte if `bits.len()` isn't a multiple of 8.
pub fn bits_to_bytes(bits: &[bool]) -> Vec<u8> {
    let mut bytes = vec![0u8; bits.len().div_ceil(8)];
    for (i, &bit) in bits.iter().enumerate() {
        if bit {
            bytes[i / 8] |= 1 << (7 - (i % 8));
        }
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_whole_bytes() {
        let original = [0xA5u8, 0x00, 0xFF, 0x3C];
        let bits = bytes_to_bits(&original);
        assert_eq!(bits.len(), 32);
        let back = bits_to_bytes(&bits);
        assert_eq!(back, original);
    }

    #[test]
    fn msb_first_ordering() {
        let bits = bytes_to_bits(&[0b1000_0000]);
        assert!(bits[0]);
        assert!(!bits[1..].iter().any(|&b| b));
    }
}
