//! Hex transmission text to bytes

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("hex input has an odd number of digits ({0})")]
    OddLength(usize),
    #[error("invalid hex digit {digit:?} at offset {offset}")]
    InvalidDigit { offset: usize, digit: char },
}

/// Decode a hex string (either case) into bytes, two digits per byte.
///
/// Leading and trailing whitespace is ignored.
pub fn decode_hex(text: &str) -> Result<Vec<u8>, HexError> {
    let digits: Vec<(usize, char)> = text.trim().char_indices().collect();
    if digits.len() % 2 != 0 {
        return Err(HexError::OddLength(digits.len()));
    }

    let nibble = |offset: usize, digit: char| {
        digit
            .to_digit(16)
            .map(|d| d as u8)
            .ok_or(HexError::InvalidDigit { offset, digit })
    };

    digits
        .chunks_exact(2)
        .map(|pair| -> Result<u8, HexError> {
            let (hi_offset, hi) = pair[0];
            let (lo_offset, lo) = pair[1];
            Ok(nibble(hi_offset, hi)? << 4 | nibble(lo_offset, lo)?)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_both_cases() {
        assert_eq!(decode_hex("D2fe28\n").unwrap(), vec![0xD2, 0xFE, 0x28]);
        assert_eq!(decode_hex("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn rejects_odd_length() {
        assert_eq!(decode_hex("ABC"), Err(HexError::OddLength(3)));
    }

    #[test]
    fn reports_offending_digit() {
        assert_eq!(
            decode_hex("0G"),
            Err(HexError::InvalidDigit {
                offset: 1,
                digit: 'G'
            })
        );
    }
}
