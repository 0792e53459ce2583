//! RFL database image parsing and building.
//!
//! The database file (`RFL_DB.dat`) is a fixed 779968-byte image:
//!
//! | offset | size   | content                                    |
//! |--------|--------|--------------------------------------------|
//! | 0      | 4      | magic `"RNOD"`                             |
//! | 4      | 7400   | 100 Mii records of 74 bytes each           |
//! | 7404   | 1      | constant 0x80                              |
//! | 7424   | 8      | parade header `"RNHD"` + 0xFFFFFFFF        |
//! | 7432   | 120000 | 10000 reserved parade slot entries         |
//! | 127454 | 2      | CRC-16/XMODEM over bytes 0..127454         |
//! | 127456 |        | zero to end of image                       |
//!
//! Unlisted gaps are zero. Parsing performs structural checks only (length
//! and magic) and extracts the records; building regenerates the whole
//! auxiliary layout from constants and re-derives the checksum, so images
//! built from the same records are always byte-identical.

use miidb_common::{crc, BinaryReader};

use crate::mii::{Mii, MII_SIZE};
use crate::{Error, Result};

/// The fixed size of a database image in bytes.
pub const DATABASE_SIZE: usize = 779968;

/// Number of Mii slots in a database.
pub const MAX_MIIS: usize = 100;

/// Magic bytes at the start of a database image.
pub const RFL_MAGIC: &[u8; 4] = b"RNOD";

/// Byte offset where the record block starts.
const MII_DATA_OFFSET: usize = 4;

/// Offset of the constant byte following the record block.
const STATIC_BYTE_OFFSET: usize = 7404;

/// The Mii Parade header region: `"RNHD"` followed by 0xFFFFFFFF.
const PARADE_MAGIC: &[u8; 8] = b"RNHD\xFF\xFF\xFF\xFF";

/// Byte offset of the parade header.
const PARADE_MAGIC_OFFSET: usize = 7424;

/// One reserved parade slot entry, repeated [`PARADE_ENTRY_COUNT`] times.
const PARADE_ENTRY: &[u8; 12] = b"\x00\x00\x00\x00\x00\x00\x00\x00\x7F\xFF\x7F\xFF";

/// Number of reserved parade slot entries.
const PARADE_ENTRY_COUNT: usize = 10000;

/// Byte offset of the parade entry table.
const PARADE_TABLE_OFFSET: usize = 7432;

/// Byte offset of the stored checksum, which covers all bytes before it.
const CRC_OFFSET: usize = 127454;

/// A parsed RFL database: 100 Mii slots in console order.
///
/// Only the records survive a parse. The auxiliary regions carry no user
/// data (the console rewrites them wholesale) and are regenerated on every
/// [`to_bytes`](Self::to_bytes) call, stored checksum included.
#[derive(Debug, Clone)]
pub struct RflDatabase {
    miis: [Mii; MAX_MIIS],
}

impl RflDatabase {
    /// Create a database of 100 empty slots.
    pub fn new() -> Self {
        Self {
            miis: std::array::from_fn(|_| Mii::empty()),
        }
    }

    /// Parse a database image.
    ///
    /// Performs structural checks only: the total length and the magic
    /// bytes. The stored checksum is not verified, so images edited by
    /// other tools load even when their trailing regions are stale.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() != DATABASE_SIZE {
            return Err(Error::SizeMismatch {
                expected: DATABASE_SIZE,
                actual: data.len(),
            });
        }

        let mut reader = BinaryReader::new(data);

        let mut magic = [0u8; 4];
        magic.copy_from_slice(reader.read_bytes(4)?);
        if &magic != RFL_MAGIC {
            return Err(Error::BadMagic(magic));
        }

        let mut db = Self::new();
        for slot in 0..MAX_MIIS {
            db.miis[slot] = Mii::from_bytes(reader.read_bytes(MII_SIZE)?)?;
        }

        Ok(db)
    }

    /// Encode the database to a canonical 779968-byte image.
    pub fn to_bytes(&self) -> Vec<u8> {
        build_image(&self.miis)
    }

    /// Get the record in a slot, if the index is in range.
    #[inline]
    pub fn mii(&self, slot: usize) -> Option<&Mii> {
        self.miis.get(slot)
    }

    /// Get mutable access to the record in a slot.
    #[inline]
    pub fn mii_mut(&mut self, slot: usize) -> Option<&mut Mii> {
        self.miis.get_mut(slot)
    }

    /// Get all 100 slots in order.
    #[inline]
    pub fn miis(&self) -> &[Mii] {
        &self.miis
    }

    /// Get mutable access to all 100 slots.
    #[inline]
    pub fn miis_mut(&mut self) -> &mut [Mii] {
        &mut self.miis
    }

    /// Replace the record in a slot.
    pub fn replace(&mut self, slot: usize, mii: Mii) -> Result<()> {
        let target = self.miis.get_mut(slot).ok_or(Error::InvalidSlot(slot))?;
        *target = mii;
        Ok(())
    }

    /// Zero-fill a slot.
    pub fn clear_slot(&mut self, slot: usize) -> Result<()> {
        self.miis
            .get_mut(slot)
            .ok_or(Error::InvalidSlot(slot))?
            .clear();
        Ok(())
    }

    /// Exchange the records of two slots.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        if a >= MAX_MIIS {
            return Err(Error::InvalidSlot(a));
        }
        if b >= MAX_MIIS {
            return Err(Error::InvalidSlot(b));
        }
        self.miis.swap(a, b);
        Ok(())
    }

    /// Move every occupied slot to the front, preserving their relative
    /// order, and leave the remainder empty. Returns the occupied count.
    pub fn compact(&mut self) -> usize {
        let mut kept = 0;
        for slot in 0..MAX_MIIS {
            if self.miis[slot].is_valid() {
                // Slots below `slot` and at or above `kept` are all empty,
                // so swapping keeps the occupied order intact.
                if slot != kept {
                    self.miis.swap(kept, slot);
                }
                kept += 1;
            }
        }
        kept
    }

    /// Count the occupied slots.
    pub fn valid_count(&self) -> usize {
        self.miis.iter().filter(|mii| mii.is_valid()).count()
    }
}

impl Default for RflDatabase {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a database image from a slice of exactly 100 records.
///
/// Loose-slice counterpart of [`RflDatabase::to_bytes`]; any other record
/// count is rejected as [`Error::InvalidMiiCount`].
pub fn build(miis: &[Mii]) -> Result<Vec<u8>> {
    let miis: &[Mii; MAX_MIIS] = miis
        .try_into()
        .map_err(|_| Error::InvalidMiiCount(miis.len()))?;
    Ok(build_image(miis))
}

fn build_image(miis: &[Mii; MAX_MIIS]) -> Vec<u8> {
    let mut image = vec![0u8; DATABASE_SIZE];

    image[..MII_DATA_OFFSET].copy_from_slice(RFL_MAGIC);

    let mut offset = MII_DATA_OFFSET;
    for mii in miis {
        image[offset..offset + MII_SIZE].copy_from_slice(mii.as_bytes());
        offset += MII_SIZE;
    }

    image[STATIC_BYTE_OFFSET] = 0x80;
    image[PARADE_MAGIC_OFFSET..PARADE_MAGIC_OFFSET + PARADE_MAGIC.len()]
        .copy_from_slice(PARADE_MAGIC);

    let mut offset = PARADE_TABLE_OFFSET;
    for _ in 0..PARADE_ENTRY_COUNT {
        image[offset..offset + PARADE_ENTRY.len()].copy_from_slice(PARADE_ENTRY);
        offset += PARADE_ENTRY.len();
    }

    // Everything past the checksum stays zero.
    let checksum = crc::checksum(&image[..CRC_OFFSET]);
    image[CRC_OFFSET..CRC_OFFSET + 2].copy_from_slice(&checksum.to_be_bytes());

    image
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterned_mii(seed: u8) -> Mii {
        let bytes: Vec<u8> = (0..MII_SIZE as u8)
            .map(|i| i.wrapping_mul(7).wrapping_add(seed))
            .collect();
        Mii::from_bytes(&bytes).unwrap()
    }

    #[test]
    fn new_database_is_empty() {
        let db = RflDatabase::new();
        assert_eq!(db.valid_count(), 0);
        assert!(db.miis().iter().all(Mii::is_empty));
    }

    #[test]
    fn empty_database_image_layout() {
        let image = RflDatabase::new().to_bytes();
        assert_eq!(image.len(), DATABASE_SIZE);

        assert_eq!(&image[..4], RFL_MAGIC);
        assert!(image[4..7404].iter().all(|&b| b == 0));
        assert_eq!(image[7404], 0x80);
        assert!(image[7405..7424].iter().all(|&b| b == 0));
        assert_eq!(&image[7424..7432], PARADE_MAGIC);

        // First and last of the 10000 parade entries.
        assert_eq!(&image[7432..7444], PARADE_ENTRY);
        assert_eq!(&image[127420..127432], PARADE_ENTRY);
        assert!(image[127432..127454].iter().all(|&b| b == 0));

        // Checksum of the canonical empty prefix, stored big-endian.
        assert_eq!(image[127454], 0x9A);
        assert_eq!(image[127455], 0xFF);
        assert!(image[127456..].iter().all(|&b| b == 0));
    }

    #[test]
    fn stored_checksum_matches_prefix() {
        let mut db = RflDatabase::new();
        db.replace(12, patterned_mii(3)).unwrap();

        let image = db.to_bytes();
        let expected = crc::checksum(&image[..CRC_OFFSET]);
        let stored = u16::from_be_bytes([image[CRC_OFFSET], image[CRC_OFFSET + 1]]);
        assert_eq!(stored, expected);
    }

    #[test]
    fn records_round_trip_byte_exact() {
        let mut db = RflDatabase::new();
        db.replace(0, patterned_mii(1)).unwrap();
        db.replace(42, patterned_mii(9)).unwrap();
        db.replace(99, patterned_mii(250)).unwrap();

        let parsed = RflDatabase::parse(&db.to_bytes()).unwrap();
        for slot in 0..MAX_MIIS {
            assert_eq!(
                parsed.mii(slot).unwrap(),
                db.mii(slot).unwrap(),
                "slot {} did not round-trip",
                slot
            );
        }
    }

    #[test]
    fn rebuild_is_deterministic() {
        let mut db = RflDatabase::new();
        db.replace(7, patterned_mii(77)).unwrap();

        let first = db.to_bytes();
        let reparsed = RflDatabase::parse(&first).unwrap();
        assert_eq!(reparsed.to_bytes(), first);
    }

    #[test]
    fn parse_rejects_wrong_size() {
        let err = RflDatabase::parse(&[0u8; 16]).unwrap_err();
        match err {
            Error::SizeMismatch { expected, actual } => {
                assert_eq!(expected, DATABASE_SIZE);
                assert_eq!(actual, 16);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn parse_rejects_bad_magic() {
        let mut image = RflDatabase::new().to_bytes();
        image[..4].copy_from_slice(b"RNOE");

        let err = RflDatabase::parse(&image).unwrap_err();
        match err {
            Error::BadMagic(magic) => assert_eq!(&magic, b"RNOE"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn parse_ignores_stale_checksum() {
        let mut image = RflDatabase::new().to_bytes();
        image[CRC_OFFSET] = 0xDE;
        image[CRC_OFFSET + 1] = 0xAD;

        assert!(RflDatabase::parse(&image).is_ok());
    }

    #[test]
    fn build_requires_exactly_one_hundred_records() {
        let short = vec![Mii::empty(); MAX_MIIS - 1];
        match build(&short).unwrap_err() {
            Error::InvalidMiiCount(count) => assert_eq!(count, MAX_MIIS - 1),
            other => panic!("unexpected error: {:?}", other),
        }

        let exact = vec![Mii::empty(); MAX_MIIS];
        let image = build(&exact).unwrap();
        assert_eq!(image, RflDatabase::new().to_bytes());
    }

    #[test]
    fn slot_accessors_bound_check() {
        let mut db = RflDatabase::new();
        assert!(db.mii(99).is_some());
        assert!(db.mii(100).is_none());
        assert!(db.mii_mut(100).is_none());

        assert!(matches!(
            db.replace(100, Mii::empty()),
            Err(Error::InvalidSlot(100))
        ));
        assert!(matches!(db.clear_slot(200), Err(Error::InvalidSlot(200))));
        assert!(matches!(db.swap(0, 100), Err(Error::InvalidSlot(100))));
        assert!(matches!(db.swap(100, 0), Err(Error::InvalidSlot(100))));
    }

    #[test]
    fn swap_exchanges_records() {
        let mut db = RflDatabase::new();
        db.replace(0, patterned_mii(1)).unwrap();
        db.swap(0, 99).unwrap();

        assert!(db.mii(0).unwrap().is_empty());
        assert_eq!(db.mii(99).unwrap(), &patterned_mii(1));
    }

    #[test]
    fn clear_slot_empties_the_record() {
        let mut db = RflDatabase::new();
        db.replace(5, patterned_mii(2)).unwrap();
        assert_eq!(db.valid_count(), 1);

        db.clear_slot(5).unwrap();
        assert_eq!(db.valid_count(), 0);
    }

    #[test]
    fn compact_preserves_occupied_order() {
        let mut db = RflDatabase::new();
        db.replace(10, patterned_mii(1)).unwrap();
        db.replace(50, patterned_mii(2)).unwrap();
        db.replace(51, patterned_mii(3)).unwrap();
        db.replace(99, patterned_mii(4)).unwrap();

        assert_eq!(db.compact(), 4);
        assert_eq!(db.mii(0).unwrap(), &patterned_mii(1));
        assert_eq!(db.mii(1).unwrap(), &patterned_mii(2));
        assert_eq!(db.mii(2).unwrap(), &patterned_mii(3));
        assert_eq!(db.mii(3).unwrap(), &patterned_mii(4));
        assert!(db.miis()[4..].iter().all(Mii::is_empty));
    }

    #[test]
    fn compact_of_already_packed_database_is_identity() {
        let mut db = RflDatabase::new();
        db.replace(0, patterned_mii(1)).unwrap();
        db.replace(1, patterned_mii(2)).unwrap();

        assert_eq!(db.compact(), 2);
        assert_eq!(db.mii(0).unwrap(), &patterned_mii(1));
        assert_eq!(db.mii(1).unwrap(), &patterned_mii(2));
    }
}
