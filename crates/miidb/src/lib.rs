//! miidb - Wii Mii database editing.
//!
//! Unified interface to the miidb crates for working with the console's
//! Mii database file (`RFL_DB.dat`) and the external rendering service's
//! Studio format.
//!
//! # Crates
//!
//! - [`common`] - big-endian binary reading and CRC-16/XMODEM
//! - [`rfl`] - the database codec (records, parse, build, slot edits)
//! - [`studio`] - Studio transcoding and the obfuscated hex encoding
//!
//! # Example
//!
//! ```
//! use miidb::prelude::*;
//!
//! let mut db = RflDatabase::new();
//! let mut mii = Mii::empty();
//! mii.as_bytes_mut()[2..6].copy_from_slice(&[0x00, 0x41, 0x00, 0x42]);
//! db.replace(3, mii).unwrap();
//!
//! let reloaded = RflDatabase::parse(&db.to_bytes()).unwrap();
//! assert_eq!(reloaded.mii(3).unwrap().name(), "AB");
//!
//! let studio = StudioMii::from_mii(reloaded.mii(3).unwrap()).unwrap();
//! assert_eq!(studio.encode().len(), 94);
//! ```

pub use miidb_common as common;
pub use miidb_rfl as rfl;
pub use miidb_studio as studio;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use miidb_common::{crc, BinaryReader};
    pub use miidb_rfl::{
        build, Mii, RflDatabase, DATABASE_SIZE, MAX_MIIS, MII_SIZE, RFL_MAGIC,
    };
    pub use miidb_studio::{StudioMii, STUDIO_DATA_SIZE};
}

/// Version of the miidb library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
