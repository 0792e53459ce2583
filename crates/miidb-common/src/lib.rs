//! Common utilities for miidb.
//!
//! This crate provides the foundational pieces shared by the miidb format
//! crates:
//!
//! - [`BinaryReader`] - zero-copy big-endian reading from byte slices
//! - [`crc`] - CRC-16/XMODEM checksums as stored in database images
//! - [`Error`] / [`Result`] - the common error type

mod error;
mod reader;

pub mod crc;

pub use error::{Error, Result};
pub use reader::BinaryReader;
