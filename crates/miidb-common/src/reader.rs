//! Binary reader for parsing byte slices.
//!
//! This module provides [`BinaryReader`], a cursor-like type for reading
//! binary data from a byte slice without copying. The Mii formats store
//! every multi-byte value big-endian, so the numeric reads decode
//! big-endian.

use crate::{Error, Result};

/// A binary reader over a byte slice.
///
/// # Example
///
/// ```
/// use miidb_common::BinaryReader;
///
/// let data = [0x01, 0x02, 0x03, 0x04];
/// let mut reader = BinaryReader::new(&data);
///
/// assert_eq!(reader.read_u16().unwrap(), 0x0102);
/// assert_eq!(reader.read_u16().unwrap(), 0x0304);
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader positioned at the start of the slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Create a new reader starting at a specific position.
    #[inline]
    pub const fn new_at(data: &'a [u8], position: usize) -> Self {
        Self { data, position }
    }

    /// Get the current position in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the total length of the underlying buffer.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if there are no more bytes to read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Advance the position by `count` bytes without reading them.
    #[inline]
    pub fn advance(&mut self, count: usize) {
        self.position = self.position.saturating_add(count);
    }

    /// Read `count` bytes and advance the position.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(Error::UnexpectedEof {
                needed: count,
                available: self.remaining(),
            });
        }
        let bytes = &self.data[self.position..self.position + count];
        self.position += count;
        Ok(bytes)
    }

    /// Read a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_bytes(1).map(|bytes| bytes[0])
    }

    /// Read a big-endian u16.
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Read a big-endian u32.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a UTF-16BE string from a fixed field of `max_units` code units.
    ///
    /// Always consumes `max_units * 2` bytes. Decoding stops at the first
    /// null code unit; malformed sequences (unpaired surrogates) are decoded
    /// lossily as U+FFFD.
    pub fn read_utf16_string(&mut self, max_units: usize) -> Result<String> {
        let bytes = self.read_bytes(max_units * 2)?;
        let mut units = Vec::with_capacity(max_units);
        for chunk in bytes.chunks_exact(2) {
            let unit = u16::from_be_bytes([chunk[0], chunk[1]]);
            if unit == 0 {
                break;
            }
            units.push(unit);
        }
        Ok(String::from_utf16_lossy(&units))
    }
}
