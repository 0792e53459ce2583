//! Obfuscated hex encoding of Studio records.
//!
//! The rendering service accepts record data only through a rolling-cipher
//! encoding: a running checksum byte, seeded to zero and emitted first, is
//! XORed into each data byte, the sum offset by 7 (mod 256), and the
//! result carried forward as the next checksum.

use std::fmt::Write;

use crate::STUDIO_DATA_SIZE;

/// Encode 46 bytes of Studio data as the 94-character lowercase hex string
/// the rendering service expects (1 seed byte + 46 encoded bytes).
pub fn encode(data: &[u8; STUDIO_DATA_SIZE]) -> String {
    let mut out = String::with_capacity((STUDIO_DATA_SIZE + 1) * 2);
    let mut checksum: u8 = 0;
    let _ = write!(out, "{:02x}", checksum);
    for &byte in data {
        let encoded = (byte ^ checksum).wrapping_add(7);
        let _ = write!(out, "{:02x}", encoded);
        checksum = encoded;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_data_golden_string() {
        let encoded = encode(&[0u8; STUDIO_DATA_SIZE]);
        assert_eq!(encoded.len(), 94);
        assert_eq!(
            encoded,
            "00070e151c232a31383f464d545b626970777e858c939aa1a8afb6bdc4cbd2d9e0e7eef5fc030a11181f262d343b42"
        );
    }

    #[test]
    fn seed_byte_is_emitted_first() {
        let encoded = encode(&[0u8; STUDIO_DATA_SIZE]);
        assert_eq!(&encoded[..4], "0007");
    }

    #[test]
    fn checksum_carries_forward() {
        // 0xFF ^ 0x00 + 7 wraps to 0x06, which then ciphers the next byte.
        let mut data = [0u8; STUDIO_DATA_SIZE];
        data[0] = 0xFF;
        let encoded = encode(&data);
        assert_eq!(&encoded[..8], "00060d14");
    }

    #[test]
    fn output_is_lowercase_hex() {
        let mut data = [0u8; STUDIO_DATA_SIZE];
        data[0] = 0xA8;
        let encoded = encode(&data);
        assert!(encoded.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }
}
