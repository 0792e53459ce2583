//! Wii Mii database (`RFL_DB.dat`) parsing and building.
//!
//! The RFL database is the console's Mii storage: a fixed 779968-byte
//! image holding 100 profile records plus reserved Mii Parade regions and
//! a CRC-16/XMODEM checksum. This crate reads such images, exposes the
//! records as opaque 74-byte blobs (validity, display name, clear, swap,
//! replace), and rebuilds canonical images with a fresh checksum.
//!
//! # Example
//!
//! ```
//! use miidb_rfl::{Mii, RflDatabase, DATABASE_SIZE};
//!
//! let mut db = RflDatabase::new();
//! assert_eq!(db.valid_count(), 0);
//!
//! let mut mii = Mii::empty();
//! mii.as_bytes_mut()[2..8].copy_from_slice(&[0x00, 0x4D, 0x00, 0x69, 0x00, 0x69]);
//! db.replace(0, mii)?;
//!
//! let image = db.to_bytes();
//! assert_eq!(image.len(), DATABASE_SIZE);
//!
//! let parsed = RflDatabase::parse(&image)?;
//! assert_eq!(parsed.mii(0).unwrap().name(), "Mii");
//! # Ok::<(), miidb_rfl::Error>(())
//! ```

mod database;
mod error;
mod mii;

pub use database::{build, RflDatabase, DATABASE_SIZE, MAX_MIIS, RFL_MAGIC};
pub use error::{Error, Result};
pub use mii::{Mii, MII_SIZE};
