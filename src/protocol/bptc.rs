//! Variable-length BPTC(16,11) storage for embedded signalling LC.
//!
//! A storage is a `(rows x 16)` bit matrix: each of the first `rows - 1`
//! rows carries 11 data bits plus 5 row-parity bits (a systematic
//! Hamming(16,11)-style row code), and the final row holds column parity
//! over the data rows — the "variable length" comes from choosing `rows`
//! to fit however many LC data bits are being spread across the matrix.
//!
//! `construct`/`extract` are inverses of each other; there is no
//! dependency on a specific external BPTC implementation here, only on
//! internal round-trip consistency, since embedded-signalling decode of a
//! real radio's bitstream is explicitly out of scope (voice decode is a
//! Non-goal).
//!
//! Outbound storages double as a write-once, read-cursored bit buffer:
//! [`VariableBptc1611::take_bits`] advances an internal cursor so that
//! `voice_frame` can pull consecutive 32-bit slices for frames B-E.

const ROW_DATA_BITS: usize = 11;
const ROW_WIDTH: usize = 16;

/// Fixed row-parity generator: row-parity bit `k` (0..5) is the XOR of the
/// data bits whose index, 1-based, has bit `k` set in its binary expansion
/// restricted to the 11 data positions — a standard systematic parity
/// check pattern for a (16,11) row code.
fn row_parity_bit(data: &[bool; ROW_DATA_BITS], k: usize) -> bool {
    let mut acc = false;
    for (i, &bit) in data.iter().enumerate() {
        if (i + 1) & (1 << k) != 0 {
            acc ^= bit;
        }
    }
    acc
}

/// A single (rows x 16) BPTC(16,11) storage.
#[derive(Debug, Clone)]
pub struct VariableBptc1611 {
    rows: usize,
    matrix: Vec<[bool; ROW_WIDTH]>,
    /// Read cursor over the constructed data bits, in bits.
    cursor: usize,
    bitcount: usize,
}

impl VariableBptc1611 {
    /// Allocate a zeroed `rows x 16` matrix. `rows` includes the trailing
    /// column-parity row, so capacity for data bits is `(rows-1)*11`.
    pub fn init(rows: usize) -> Self {
        Self {
            rows,
            matrix: vec![[false; ROW_WIDTH]; rows],
            cursor: 0,
            bitcount: 0,
        }
    }

    /// Data-bit capacity of this storage.
    pub fn capacity_bits(&self) -> usize {
        self.rows.saturating_sub(1) * ROW_DATA_BITS
    }

    /// Fill the matrix with `bits` (truncated/zero-padded to `bitcount`),
    /// computing row Hamming parity and the trailing column-parity row.
    pub fn construct(&mut self, bits: &[bool], bitcount: usize) {
        let data_rows = self.rows.saturating_sub(1);
        for row in 0..data_rows {
            let mut data = [false; ROW_DATA_BITS];
            for col in 0..ROW_DATA_BITS {
                let idx = row * ROW_DATA_BITS + col;
                data[col] = idx < bitcount && bits.get(idx).copied().unwrap_or(false);
            }
            let mut packed = [false; ROW_WIDTH];
            packed[..ROW_DATA_BITS].copy_from_slice(&data);
            for k in 0..(ROW_WIDTH - ROW_DATA_BITS) {
                packed[ROW_DATA_BITS + k] = row_parity_bit(&data, k);
            }
            self.matrix[row] = packed;
        }

        // Column parity: XOR each column down across the data rows.
        if self.rows > 0 {
            let mut parity_row = [false; ROW_WIDTH];
            for col in 0..ROW_WIDTH {
                let mut acc = false;
                for row in self.matrix.iter().take(data_rows) {
                    acc ^= row[col];
                }
                parity_row[col] = acc;
            }
            let last = self.rows - 1;
            self.matrix[last] = parity_row;
        }

        self.bitcount = bitcount.min(data_rows * ROW_DATA_BITS);
        self.cursor = 0;
    }

    /// Recover the data bits previously passed to [`Self::construct`].
    pub fn extract(&self, bitcount: usize) -> Vec<bool> {
        let data_rows = self.rows.saturating_sub(1);
        let mut out = Vec::with_capacity(bitcount);
        'outer: for row in self.matrix.iter().take(data_rows) {
            for col in 0..ROW_DATA_BITS {
                if out.len() >= bitcount {
                    break 'outer;
                }
                out.push(row[col]);
            }
        }
        out.resize(bitcount, false);
        out
    }

    /// Take the next `n` bits from the constructed data, advancing the
    /// internal read cursor. Returns fewer than `n` bits once the cursor
    /// reaches the end (the final voice frame reads whatever remains).
    pub fn take_bits(&mut self, n: usize) -> Vec<bool> {
        let all = self.extract(self.bitcount);
        let start = self.cursor.min(all.len());
        let end = (start + n).min(all.len());
        self.cursor = end;
        all[start..end].to_vec()
    }

    /// Reset the read cursor to the beginning without re-encoding.
    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::bits::bytes_to_bits;

    #[test]
    fn round_trips_arbitrary_data() {
        let bits = bytes_to_bits(&[0xDE, 0xAD, 0xBE, 0xEF, 0x01, 0x23, 0x45, 0x67, 0x89, 0xAB]);
        let mut storage = VariableBptc1611::init(8);
        storage.construct(&bits, bits.len());
        let out = storage.extract(bits.len());
        assert_eq!(out, bits);
    }

    #[test]
    fn take_bits_advances_cursor_in_32_bit_slices() {
        let bits = bytes_to_bits(&[0xFFu8; 11]); // 88 bits
        let mut storage = VariableBptc1611::init(8); // capacity = 7*11 = 77 bits
        storage.construct(&bits, 77);
        let first = storage.take_bits(32);
        let second = storage.take_bits(32);
        assert_eq!(first.len(), 32);
        assert_eq!(second.len(), 32);
        let remaining = storage.take_bits(32);
        assert_eq!(remaining.len(), 77 - 64);
    }

    #[test]
    fn capacity_reflects_row_count() {
        let storage = VariableBptc1611::init(8);
        assert_eq!(storage.capacity_bits(), 7 * ROW_DATA_BITS);
    }
}
