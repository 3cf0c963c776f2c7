//! Packing grid coordinates into single hashable keys.

use util::{compact_u64_by_2, spread_u32_by_2};

use crate::prelude::*;

/// Flipping the sign bit maps `i32::MIN..=i32::MAX` onto `0..=u32::MAX`
/// monotonically, so keys sort by Z-order of the coordinates.
const SIGN: u32 = 1 << 31;

/// Grid cell coordinate packed into a single 64-bit value.
///
/// The two coordinates are bit-interleaved into a Z-order (Morton) code. The
/// encoding is total and invertible over the whole `i32` domain on both
/// axes, so distinct cells never collide.
#[derive(
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Debug,
)]
pub struct Key(u64);

impl Key {
    pub const fn encode(x: i32, y: i32) -> Key {
        let x = (x as u32) ^ SIGN;
        let y = (y as u32) ^ SIGN;
        Key(spread_u32_by_2(x) | (spread_u32_by_2(y) << 1))
    }

    pub const fn decode(self) -> (i32, i32) {
        let x = compact_u64_by_2(self.0) ^ SIGN;
        let y = compact_u64_by_2(self.0 >> 1) ^ SIGN;
        (x as i32, y as i32)
    }
}

impl From<IVec2> for Key {
    fn from(p: IVec2) -> Self {
        Key::encode(p.x, p.y)
    }
}

impl From<[i32; 2]> for Key {
    fn from([x, y]: [i32; 2]) -> Self {
        Key::encode(x, y)
    }
}

impl From<Key> for IVec2 {
    fn from(key: Key) -> Self {
        let (x, y) = key.decode();
        ivec2(x, y)
    }
}

impl From<Key> for [i32; 2] {
    fn from(key: Key) -> Self {
        let (x, y) = key.decode();
        [x, y]
    }
}
