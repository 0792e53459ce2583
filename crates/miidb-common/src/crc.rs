//! CRC-16/XMODEM checksum utilities.
//!
//! Database images carry a CRC-16/XMODEM checksum over everything that
//! precedes it: polynomial 0x1021, initial value 0x0000, no reflection, no
//! final XOR. The image stores the result big-endian.

use crc::{Crc, CRC_16_XMODEM};

const XMODEM: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

/// Compute the CRC-16/XMODEM checksum of a byte slice.
///
/// The empty input hashes to 0x0000.
#[inline]
pub fn checksum(data: &[u8]) -> u16 {
    XMODEM.checksum(data)
}
