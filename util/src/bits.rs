//! Bit interleaving for Z-order (Morton) keys.

/// Spread the bits of a 32-bit value into the even bit positions of a 64-bit
/// value, leaving zeroes in the odd positions.
pub const fn spread_u32_by_2(x: u32) -> u64 {
    let mut x = x as u64;
    x = (x | (x << 16)) & 0x0000_ffff_0000_ffff;
    x = (x | (x << 8)) & 0x00ff_00ff_00ff_00ff;
    x = (x | (x << 4)) & 0x0f0f_0f0f_0f0f_0f0f;
    x = (x | (x << 2)) & 0x3333_3333_3333_3333;
    x = (x | (x << 1)) & 0x5555_5555_5555_5555;
    x
}

/// Inverse of `spread_u32_by_2`, gather the even bits of a 64-bit value into
/// a 32-bit value. Odd bits are ignored.
pub const fn compact_u64_by_2(x: u64) -> u32 {
    let mut x = x & 0x5555_5555_5555_5555;
    x = (x | (x >> 1)) & 0x3333_3333_3333_3333;
    x = (x | (x >> 2)) & 0x0f0f_0f0f_0f0f_0f0f;
    x = (x | (x >> 4)) & 0x00ff_00ff_00ff_00ff;
    x = (x | (x >> 8)) & 0x0000_ffff_0000_ffff;
    x = (x | (x >> 16)) & 0x0000_0000_ffff_ffff;
    x as u32
}

#[cfg(test)]
mod test {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn spread_bits() {
        assert_eq!(spread_u32_by_2(0), 0);
        assert_eq!(spread_u32_by_2(1), 1);
        assert_eq!(spread_u32_by_2(0b11), 0b101);
        assert_eq!(spread_u32_by_2(0b1010), 0b1000100);
        assert_eq!(spread_u32_by_2(u32::MAX), 0x5555_5555_5555_5555);
    }

    #[test]
    fn compact_ignores_odd_bits() {
        assert_eq!(compact_u64_by_2(0xaaaa_aaaa_aaaa_aaaa), 0);
        assert_eq!(compact_u64_by_2(u64::MAX), u32::MAX);
    }

    #[quickcheck]
    fn spread_compact(x: u32) -> bool {
        compact_u64_by_2(spread_u32_by_2(x)) == x
    }

    #[quickcheck]
    fn interleaved_pairs_are_separable(x: u32, y: u32) -> bool {
        let z = spread_u32_by_2(x) | (spread_u32_by_2(y) << 1);
        compact_u64_by_2(z) == x && compact_u64_by_2(z >> 1) == y
    }
}
