//! MSB-first bit cursor over an owned byte buffer

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitError {
    #[error("cannot read {requested} bits at position {position}: only {available} bits left")]
    OutOfRange {
        position: usize,
        requested: usize,
        available: usize,
    },
    #[error("read width must be 1..=64 bits, got {0}")]
    InvalidWidth(usize),
}

/// Reads big-endian bit fields of arbitrary width and alignment.
///
/// The first bit of the stream is the most significant bit of byte 0. A
/// reader may be bounded to fewer bits than its buffer holds, in which case
/// the bits past `len_bits` are never visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitReader {
    bytes: Vec<u8>,
    len_bits: usize,
    position: usize,
}

impl BitReader {
    pub fn new(bytes: Vec<u8>) -> Self {
        let len_bits = bytes.len() * 8;
        Self::with_len(bytes, len_bits)
    }

    /// A reader over the first `len_bits` bits of `bytes`.
    ///
    /// `len_bits` is clamped to the buffer size.
    pub fn with_len(bytes: Vec<u8>, len_bits: usize) -> Self {
        let len_bits = len_bits.min(bytes.len() * 8);
        Self {
            bytes,
            len_bits,
            position: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len_bits(&self) -> usize {
        self.len_bits
    }

    pub fn remaining(&self) -> usize {
        self.len_bits - self.position
    }

    /// Consume `n` bits and return them as an integer, first bit most significant.
    pub fn read(&mut self, n: usize) -> Result<u64, BitError> {
        if n == 0 || n > 64 {
            return Err(BitError::InvalidWidth(n));
        }
        self.ensure(n)?;
        let value = self.bits_at(self.position, n);
        self.position += n;
        Ok(value)
    }

    /// Consume `n` bits and return them left-justified in `ceil(n / 8)` bytes.
    ///
    /// Bit 0 of the result is the bit at the current position; unused low
    /// bits of the last byte are zero.
    pub fn read_slice(&mut self, n: usize) -> Result<Vec<u8>, BitError> {
        self.ensure(n)?;
        let mut out = Vec::with_capacity(n.div_ceil(8));
        let mut left = n;
        while left > 0 {
            let take = left.min(8);
            let chunk = self.bits_at(self.position, take) as u8;
            out.push(chunk << (8 - take));
            self.position += take;
            left -= take;
        }
        Ok(out)
    }

    /// Same result as [`read`](Self::read), assembled through [`read_slice`](Self::read_slice).
    pub fn read_int(&mut self, n: usize) -> Result<u64, BitError> {
        if n == 0 || n > 64 {
            return Err(BitError::InvalidWidth(n));
        }
        let slice = self.read_slice(n)?;
        Ok(slice_to_u64(&slice, n))
    }

    /// True when every bit from the cursor to the end is zero.
    ///
    /// Only meaningful where the stream is known to be zero-padded, i.e.
    /// the tail of a hex-encoded transmission or a length-delimited region.
    pub fn is_done(&self) -> bool {
        let mut pos = self.position;
        while pos < self.len_bits {
            let take = (self.len_bits - pos).min(64);
            if self.bits_at(pos, take) != 0 {
                return false;
            }
            pos += take;
        }
        true
    }

    fn ensure(&self, n: usize) -> Result<(), BitError> {
        if n > self.remaining() {
            return Err(BitError::OutOfRange {
                position: self.position,
                requested: n,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    // Caller guarantees 1 <= n <= 64 and start + n <= len_bits. At most nine
    // source bytes are touched, which fits the u128 accumulator.
    fn bits_at(&self, start: usize, n: usize) -> u64 {
        let end = start + n;
        let first = start / 8;
        let last = (end - 1) / 8;
        let acc = self.bytes[first..=last]
            .iter()
            .fold(0u128, |acc, &b| (acc << 8) | u128::from(b));
        let trailing = (last + 1) * 8 - end;
        let mask = (1u128 << n) - 1;
        ((acc >> trailing) & mask) as u64
    }
}

/// Interpret the first `bits` bits of a left-justified buffer as an integer.
///
/// The inverse of [`BitReader::read_slice`]; `bits` is capped at 64 and at
/// the buffer size.
pub fn slice_to_u64(bytes: &[u8], bits: usize) -> u64 {
    let bits = bits.min(64).min(bytes.len() * 8);
    let used = bits.div_ceil(8);
    let acc = bytes[..used]
        .iter()
        .fold(0u128, |acc, &b| (acc << 8) | u128::from(b));
    (acc >> (used * 8 - bits)) as u64
}
