use glam::IVec2;

/// 8 directions, clock face order.
pub const DIR_8: [IVec2; 8] = [
    IVec2::from_array([0, -1]),
    IVec2::from_array([1, -1]),
    IVec2::from_array([1, 0]),
    IVec2::from_array([1, 1]),
    IVec2::from_array([0, 1]),
    IVec2::from_array([-1, 1]),
    IVec2::from_array([-1, 0]),
    IVec2::from_array([-1, -1]),
];

/// Iterate the 8-connected neighbors of a grid cell in clock face order.
///
/// Coordinates wrap around at the edges of the `i32` range.
pub fn neighbors_8(p: impl Into<IVec2>) -> impl Iterator<Item = IVec2> {
    let p = p.into();
    DIR_8.into_iter().map(move |d| p.wrapping_add(d))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::ivec2;

    #[test]
    fn neighborhood() {
        let ns: Vec<IVec2> = neighbors_8(ivec2(10, -3)).collect();
        assert_eq!(ns.len(), 8);
        assert_eq!(ns[0], ivec2(10, -4));
        assert_eq!(ns[2], ivec2(11, -3));
        assert!(!ns.contains(&ivec2(10, -3)));
    }

    #[test]
    fn neighborhood_wraps() {
        let ns: Vec<IVec2> = neighbors_8(ivec2(i32::MAX, 0)).collect();
        assert!(ns.contains(&ivec2(i32::MIN, 0)));
        assert!(ns.contains(&ivec2(i32::MAX - 1, 1)));
    }
}
