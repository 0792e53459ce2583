//! Mii record to Studio format transcoding.
//!
//! The external rendering service consumes Miis in a different packing: 46
//! single-byte parameters instead of the record's packed bit fields. The
//! whole conversion is one declarative table ([`FIELD_MAP`]): each entry
//! names the source bits (or a constant), an optional value remap, and the
//! destination byte. The transform is lossy. Creation metadata never
//! crosses over and several remaps collapse distinct inputs, so there is
//! no inverse.

use miidb_rfl::{Mii, MII_SIZE};

/// The fixed size of a Studio record in bytes.
pub const STUDIO_DATA_SIZE: usize = 46;

/// Wrinkle output values indexed by the 4-bit facial-feature code.
///
/// Codes 12..=15 fall off the table and map to 0.
const WRINKLES: [u8; 12] = [0, 0, 0, 0, 5, 2, 3, 7, 8, 0, 9, 11];

/// Makeup output values indexed by the 4-bit facial-feature code.
const MAKEUP: [u8; 12] = [0, 1, 6, 9, 0, 0, 0, 0, 0, 10, 0, 0];

/// Where a Studio parameter's raw value comes from.
#[derive(Debug, Clone, Copy)]
enum Source {
    /// Bits `shift..shift + bits` of the big-endian u16 at `offset`.
    Word { offset: usize, shift: u32, bits: u32 },
    /// Bits `shift..shift + bits` of the big-endian u32 at `offset`.
    Dword { offset: usize, shift: u32, bits: u32 },
    /// The raw input byte at `offset`.
    Byte { offset: usize },
    /// A fixed value with no counterpart in the record.
    Fixed(u8),
}

/// Adjustment applied to an extracted raw value.
#[derive(Debug, Clone, Copy)]
enum Remap {
    /// Store the raw value unchanged.
    None,
    /// Add a constant.
    Offset(u8),
    /// Raw 0 is a sentinel selecting color slot 8.
    ZeroToEight,
    /// Glasses colors: 0 selects slot 8, 1..=5 shift up by 13, others
    /// clamp to 0.
    Glasses,
    /// Facial-feature code through the [`MAKEUP`] table.
    Makeup,
    /// Facial-feature code through the [`WRINKLES`] table.
    Wrinkles,
}

/// One transcoded parameter: named source bits, remap, destination byte.
#[derive(Debug, Clone, Copy)]
struct FieldMap {
    name: &'static str,
    source: Source,
    remap: Remap,
    dest: usize,
}

#[rustfmt::skip]
impl FieldMap {
    const fn word(
        name: &'static str,
        offset: usize,
        shift: u32,
        bits: u32,
        remap: Remap,
        dest: usize,
    ) -> Self {
        Self { name, source: Source::Word { offset, shift, bits }, remap, dest }
    }

    const fn dword(
        name: &'static str,
        offset: usize,
        shift: u32,
        bits: u32,
        remap: Remap,
        dest: usize,
    ) -> Self {
        Self { name, source: Source::Dword { offset, shift, bits }, remap, dest }
    }

    const fn byte(name: &'static str, offset: usize, dest: usize) -> Self {
        Self { name, source: Source::Byte { offset }, remap: Remap::None, dest }
    }

    const fn fixed(name: &'static str, value: u8, dest: usize) -> Self {
        Self { name, source: Source::Fixed(value), remap: Remap::None, dest }
    }
}

/// The full record-to-Studio parameter mapping, grouped by source word.
///
/// Byte- and bit-exact with what the rendering service expects; every
/// output byte is written by exactly one entry.
#[rustfmt::skip]
const FIELD_MAP: &[FieldMap] = &[
    // Word at 0x00: gender flag and favorite color.
    FieldMap::word("gender", 0x00, 14, 1, Remap::None, 0x16),
    FieldMap::word("favorite_color", 0x00, 1, 4, Remap::None, 0x15),
    // Raw body bytes.
    FieldMap::byte("height", 0x16, 0x1E),
    FieldMap::byte("weight", 0x17, 0x02),
    // Word at 0x20: face shape, skin, and the facial-feature code that
    // fans out to both makeup and wrinkles.
    FieldMap::word("face_shape", 0x20, 13, 3, Remap::None, 0x13),
    FieldMap::word("skin_color", 0x20, 10, 3, Remap::None, 0x11),
    FieldMap::word("makeup", 0x20, 6, 4, Remap::Makeup, 0x12),
    FieldMap::word("wrinkles", 0x20, 6, 4, Remap::Wrinkles, 0x14),
    // Word at 0x22: hair.
    FieldMap::word("hair_style", 0x22, 9, 7, Remap::None, 0x1D),
    FieldMap::word("hair_color", 0x22, 6, 3, Remap::ZeroToEight, 0x1B),
    FieldMap::word("hair_flip", 0x22, 5, 1, Remap::None, 0x1C),
    // Dword at 0x24: eyebrows. The Y scale is not stored in the record.
    FieldMap::dword("eyebrow_style", 0x24, 27, 5, Remap::None, 0x0E),
    FieldMap::dword("eyebrow_rotation", 0x24, 22, 4, Remap::None, 0x0C),
    FieldMap::dword("eyebrow_color", 0x24, 13, 3, Remap::ZeroToEight, 0x0B),
    FieldMap::dword("eyebrow_scale", 0x24, 9, 4, Remap::None, 0x0D),
    FieldMap::fixed("eyebrow_y_scale", 3, 0x0A),
    FieldMap::dword("eyebrow_y_position", 0x24, 4, 5, Remap::None, 0x10),
    FieldMap::dword("eyebrow_x_spacing", 0x24, 0, 4, Remap::None, 0x0F),
    // Dword at 0x28: eyes.
    FieldMap::dword("eye_style", 0x28, 26, 6, Remap::None, 0x07),
    FieldMap::dword("eye_rotation", 0x28, 21, 3, Remap::None, 0x05),
    FieldMap::dword("eye_y_position", 0x28, 16, 5, Remap::None, 0x09),
    FieldMap::dword("eye_color", 0x28, 13, 3, Remap::Offset(8), 0x04),
    FieldMap::dword("eye_scale", 0x28, 9, 3, Remap::None, 0x06),
    FieldMap::fixed("eye_y_scale", 3, 0x03),
    FieldMap::dword("eye_x_spacing", 0x28, 5, 4, Remap::None, 0x08),
    // Word at 0x2C: nose.
    FieldMap::word("nose_style", 0x2C, 12, 4, Remap::None, 0x2C),
    FieldMap::word("nose_scale", 0x2C, 8, 4, Remap::None, 0x2B),
    FieldMap::word("nose_y_position", 0x2C, 3, 5, Remap::None, 0x2D),
    // Word at 0x2E: mouth.
    FieldMap::word("mouth_style", 0x2E, 11, 5, Remap::None, 0x26),
    FieldMap::word("mouth_color", 0x2E, 9, 2, Remap::Offset(19), 0x24),
    FieldMap::word("mouth_scale", 0x2E, 5, 4, Remap::None, 0x25),
    FieldMap::fixed("mouth_y_scale", 3, 0x23),
    FieldMap::word("mouth_y_position", 0x2E, 0, 5, Remap::None, 0x27),
    // Word at 0x30: glasses.
    FieldMap::word("glasses_style", 0x30, 12, 4, Remap::None, 0x19),
    FieldMap::word("glasses_color", 0x30, 9, 3, Remap::Glasses, 0x17),
    FieldMap::word("glasses_scale", 0x30, 5, 3, Remap::None, 0x18),
    FieldMap::word("glasses_y_position", 0x30, 0, 5, Remap::None, 0x1A),
    // Word at 0x32: mustache and beard.
    FieldMap::word("mustache_style", 0x32, 14, 2, Remap::None, 0x29),
    FieldMap::word("beard_style", 0x32, 12, 2, Remap::None, 0x01),
    FieldMap::word("beard_color", 0x32, 9, 3, Remap::ZeroToEight, 0x00),
    FieldMap::word("mustache_scale", 0x32, 5, 4, Remap::None, 0x28),
    FieldMap::word("mustache_y_position", 0x32, 0, 5, Remap::None, 0x2A),
    // Word at 0x34: mole.
    FieldMap::word("mole_enabled", 0x34, 15, 1, Remap::None, 0x20),
    FieldMap::word("mole_scale", 0x34, 11, 4, Remap::None, 0x1F),
    FieldMap::word("mole_y_position", 0x34, 6, 5, Remap::None, 0x22),
    FieldMap::word("mole_x_position", 0x34, 1, 5, Remap::None, 0x21),
];

const fn mask(bits: u32) -> u32 {
    (1 << bits) - 1
}

fn word_at(data: &[u8; MII_SIZE], offset: usize) -> u16 {
    u16::from_be_bytes([data[offset], data[offset + 1]])
}

fn dword_at(data: &[u8; MII_SIZE], offset: usize) -> u32 {
    u32::from_be_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

impl Source {
    /// Extract the raw (pre-remap) value from a record.
    fn extract(&self, data: &[u8; MII_SIZE]) -> u8 {
        match *self {
            Source::Word { offset, shift, bits } => {
                ((u32::from(word_at(data, offset)) >> shift) & mask(bits)) as u8
            }
            Source::Dword { offset, shift, bits } => {
                ((dword_at(data, offset) >> shift) & mask(bits)) as u8
            }
            Source::Byte { offset } => data[offset],
            Source::Fixed(value) => value,
        }
    }
}

impl Remap {
    /// Apply the remap to a raw extracted value.
    fn apply(&self, raw: u8) -> u8 {
        match *self {
            Remap::None => raw,
            Remap::Offset(delta) => raw + delta,
            Remap::ZeroToEight => {
                if raw == 0 {
                    8
                } else {
                    raw
                }
            }
            Remap::Glasses => match raw {
                0 => 8,
                1..=5 => raw + 13,
                _ => 0,
            },
            Remap::Makeup => MAKEUP.get(raw as usize).copied().unwrap_or(0),
            Remap::Wrinkles => WRINKLES.get(raw as usize).copied().unwrap_or(0),
        }
    }
}

/// Run the full parameter mapping over a record.
fn transcode(data: &[u8; MII_SIZE]) -> [u8; STUDIO_DATA_SIZE] {
    let mut out = [0u8; STUDIO_DATA_SIZE];
    for field in FIELD_MAP {
        out[field.dest] = field.remap.apply(field.source.extract(data));
    }
    out
}

/// A 46-byte Studio-format record derived from a Mii.
///
/// Studio records exist only to feed [`encode`](Self::encode); they are
/// never persisted and cannot be converted back into a Mii record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudioMii {
    data: [u8; STUDIO_DATA_SIZE],
}

impl StudioMii {
    /// Transcode a Mii record into Studio format.
    ///
    /// Returns `None` for an empty slot. For occupied slots the transform
    /// is a pure function of the record bytes.
    pub fn from_mii(mii: &Mii) -> Option<Self> {
        if mii.is_empty() {
            return None;
        }
        Some(Self {
            data: transcode(mii.as_bytes()),
        })
    }

    /// Wrap already-transcoded Studio bytes.
    pub const fn from_bytes(data: [u8; STUDIO_DATA_SIZE]) -> Self {
        Self { data }
    }

    /// Get the raw Studio bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; STUDIO_DATA_SIZE] {
        &self.data
    }

    /// Iterate the named parameter values of this record, in mapping order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, u8)> + '_ {
        FIELD_MAP.iter().map(|field| (field.name, self.data[field.dest]))
    }

    /// Encode into the obfuscated hex string the rendering service expects.
    pub fn encode(&self) -> String {
        crate::encode::encode(&self.data)
    }
}
