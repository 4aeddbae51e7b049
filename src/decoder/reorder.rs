//! Byte-order correction for the raw capture stream
//!
//! The capture agent writes each key as a little-endian `u16` of
//! `(flags << 8) | scancode`, so on disk the scancode byte comes first.

use super::DecodeError;
use crate::keyboard::KeyPair;

/// Pair up raw log bytes into `(flags, scancode)` key pairs.
///
/// Fails on an odd byte count rather than dropping the trailing byte.
pub fn reorder(raw: &[u8]) -> Result<Vec<KeyPair>, DecodeError> {
    if raw.len() % 2 != 0 {
        return Err(DecodeError::OddLength { len: raw.len() });
    }

    Ok(raw
        .chunks_exact(2)
        .map(|chunk| KeyPair::new(chunk[1], chunk[0]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::KeyCode;

    #[test]
    fn swaps_within_each_pair() {
        let pairs = reorder(&[30, 0x02, 57, 0x00]).expect("even input");
        assert_eq!(pairs, vec![KeyPair::new(0x02, 30), KeyPair::new(0x00, 57)]);
    }

    #[test]
    fn matches_positional_definition() {
        let raw: Vec<u8> = (0..=255u8).collect();
        let pairs = reorder(&raw).expect("even input");
        assert_eq!(pairs.len(), raw.len() / 2);
        for (i, pair) in pairs.iter().enumerate() {
            assert_eq!(pair.flag_bits(), raw[2 * i + 1]);
            assert_eq!(pair.scancode, KeyCode(raw[2 * i]));
        }
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(reorder(&[]).expect("even input").is_empty());
    }

    #[test]
    fn rejects_odd_lengths() {
        for len in [1usize, 3, 5, 9, 101] {
            let raw = vec![0u8; len];
            match reorder(&raw) {
                Err(DecodeError::OddLength { len: reported }) => assert_eq!(reported, len),
                other => panic!("expected OddLength for {len} bytes, got {other:?}"),
            }
        }
    }
}
