//! Studio-format derivation for Mii records.
//!
//! The external rendering service takes Miis in its own packing ("Studio
//! format") wrapped in an obfuscating hex encoding. This crate derives
//! that representation from 74-byte records:
//!
//! - [`StudioMii::from_mii`] - lossy bit-field transcoding to 46 bytes
//! - [`StudioMii::encode`] / [`encode`] - rolling-cipher hex string for
//!   the service's `data=` query parameter
//!
//! # Example
//!
//! ```
//! use miidb_rfl::Mii;
//! use miidb_studio::StudioMii;
//!
//! let mut mii = Mii::empty();
//! assert!(StudioMii::from_mii(&mii).is_none());
//!
//! mii.as_bytes_mut()[0x16] = 93;
//! let studio = StudioMii::from_mii(&mii).unwrap();
//! assert_eq!(studio.encode().len(), 94);
//! ```

mod encode;
mod transform;

pub use encode::encode;
pub use transform::{StudioMii, STUDIO_DATA_SIZE};
