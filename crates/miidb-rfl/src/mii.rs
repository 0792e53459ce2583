//! The 74-byte Mii record.
//!
//! Each database slot holds one fixed-size record. Records are opaque to
//! the editor: slots are copied, cleared, swapped, and replaced whole. The
//! only facts derived from the bytes are whether the slot is occupied and
//! the profile's display name.

use std::fmt::Write;

use miidb_common::BinaryReader;

use crate::{Error, Result};

/// The fixed size of a Mii record in bytes.
pub const MII_SIZE: usize = 74;

/// Byte offset of the name field within a record.
const NAME_OFFSET: usize = 2;

/// Capacity of the name field in UTF-16 code units.
const NAME_MAX_UNITS: usize = 10;

/// A single 74-byte Mii record.
///
/// An all-zero record marks an empty slot; anything else is treated as
/// occupied. No structural validation beyond the length is performed, so
/// records round-trip byte-exact through a database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mii {
    data: [u8; MII_SIZE],
}

impl Mii {
    /// Create an empty (all-zero) record.
    pub const fn empty() -> Self {
        Self {
            data: [0u8; MII_SIZE],
        }
    }

    /// Create a record from raw bytes.
    ///
    /// The buffer must be exactly [`MII_SIZE`] bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let data: [u8; MII_SIZE] = bytes.try_into().map_err(|_| Error::SizeMismatch {
            expected: MII_SIZE,
            actual: bytes.len(),
        })?;
        Ok(Self { data })
    }

    /// Get the raw record bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; MII_SIZE] {
        &self.data
    }

    /// Get mutable access to the raw record bytes.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8; MII_SIZE] {
        &mut self.data
    }

    /// Check whether this record holds a Mii.
    ///
    /// A slot is occupied iff at least one byte of its record is non-zero.
    pub fn is_valid(&self) -> bool {
        self.data.iter().any(|&b| b != 0)
    }

    /// Check whether this record is an empty slot.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.is_valid()
    }

    /// Extract the display name.
    ///
    /// The name field holds up to 10 big-endian UTF-16 code units at offset
    /// 2, terminated early by a null unit. Returns the empty string for an
    /// empty slot; malformed sequences decode lossily.
    pub fn name(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let mut reader = BinaryReader::new_at(&self.data, NAME_OFFSET);
        // The field ends at offset 22 of 74, so the read cannot fail.
        reader.read_utf16_string(NAME_MAX_UNITS).unwrap_or_default()
    }

    /// Render the record as an uppercase hex string (148 characters).
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(MII_SIZE * 2);
        for byte in self.data {
            let _ = write!(out, "{:02X}", byte);
        }
        out
    }

    /// Zero the record, marking the slot empty.
    pub fn clear(&mut self) {
        self.data = [0u8; MII_SIZE];
    }
}

impl Default for Mii {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_byte(offset: usize, value: u8) -> Mii {
        let mut mii = Mii::empty();
        mii.as_bytes_mut()[offset] = value;
        mii
    }

    #[test]
    fn empty_record_is_an_empty_slot() {
        let mii = Mii::empty();
        assert!(mii.is_empty());
        assert!(!mii.is_valid());
        assert_eq!(mii.as_bytes(), &[0u8; MII_SIZE]);
    }

    #[test]
    fn any_nonzero_byte_marks_the_slot_occupied() {
        for offset in [0, 1, 37, MII_SIZE - 1] {
            let mii = record_with_byte(offset, 1);
            assert!(mii.is_valid(), "byte at offset {} ignored", offset);
        }
    }

    #[test]
    fn from_bytes_rejects_wrong_lengths() {
        for len in [0, MII_SIZE - 1, MII_SIZE + 1] {
            let err = Mii::from_bytes(&vec![0u8; len]).unwrap_err();
            match err {
                Error::SizeMismatch { expected, actual } => {
                    assert_eq!(expected, MII_SIZE);
                    assert_eq!(actual, len);
                }
                other => panic!("unexpected error: {:?}", other),
            }
        }
    }

    #[test]
    fn from_bytes_round_trips() {
        let bytes: Vec<u8> = (0..MII_SIZE as u8).collect();
        let mii = Mii::from_bytes(&bytes).unwrap();
        assert_eq!(mii.as_bytes().as_slice(), bytes.as_slice());
    }

    #[test]
    fn name_of_empty_slot_is_empty() {
        assert_eq!(Mii::empty().name(), "");
    }

    #[test]
    fn name_decodes_utf16_be() {
        let mut mii = record_with_byte(0, 0x40);
        mii.as_bytes_mut()[2..8].copy_from_slice(&[0x00, 0x41, 0x00, 0x42, 0x00, 0x43]);
        assert_eq!(mii.name(), "ABC");
    }

    #[test]
    fn name_stops_at_null_terminator() {
        let mut mii = record_with_byte(0, 0x40);
        mii.as_bytes_mut()[2..10]
            .copy_from_slice(&[0x00, 0x41, 0x00, 0x42, 0x00, 0x00, 0x00, 0x43]);
        assert_eq!(mii.name(), "AB");
    }

    #[test]
    fn name_uses_full_field_without_terminator() {
        let mut mii = Mii::empty();
        for unit in 0..10 {
            let offset = 2 + unit * 2;
            mii.as_bytes_mut()[offset] = 0x00;
            mii.as_bytes_mut()[offset + 1] = b'A' + unit as u8;
        }
        assert_eq!(mii.name(), "ABCDEFGHIJ");
    }

    #[test]
    fn name_decodes_unpaired_surrogate_lossily() {
        let mut mii = record_with_byte(0, 0x40);
        mii.as_bytes_mut()[2..6].copy_from_slice(&[0xD8, 0x00, 0x00, 0x41]);
        assert_eq!(mii.name(), "\u{FFFD}A");
    }

    #[test]
    fn to_hex_is_uppercase_and_full_width() {
        let mut mii = Mii::empty();
        mii.as_bytes_mut()[0] = 0xAB;
        mii.as_bytes_mut()[1] = 0x0F;

        let hex = mii.to_hex();
        assert_eq!(hex.len(), MII_SIZE * 2);
        assert!(hex.starts_with("AB0F00"));
        assert!(hex.ends_with("00"));
    }

    #[test]
    fn clear_empties_the_slot() {
        let mut mii = record_with_byte(40, 0xFF);
        assert!(mii.is_valid());
        mii.clear();
        assert!(mii.is_empty());
    }
}
