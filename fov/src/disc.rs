/// Offsets of the lattice points inside a Euclidean disc.
///
/// Iterates every integer offset `(dx, dy)` with `dx² + dy² <= radius²`,
/// boundary inclusive, in row-major order from the top row (`dy = -radius`)
/// down. A negative radius yields nothing.
///
/// ```
/// let cells: Vec<[i32; 2]> = fov::Disc::<[i32; 2]>::new(1).collect();
/// assert_eq!(cells, vec![[0, -1], [-1, 0], [0, 0], [1, 0], [0, 1]]);
/// ```
#[derive(Clone, Debug)]
pub struct Disc<V> {
    radius: i32,
    /// Current row.
    dy: i32,
    /// Next column on current row.
    dx: i32,
    /// Half-width of current row.
    span: i32,

    phantom: std::marker::PhantomData<V>,
}

impl<V> Disc<V> {
    pub fn new(radius: i32) -> Self {
        if radius < 0 {
            // Start past the last row, nothing to iterate.
            return Disc {
                radius,
                dy: 1,
                dx: 0,
                span: -1,
                phantom: Default::default(),
            };
        }

        let dy = -radius;
        let span = half_width(radius, dy);
        Disc {
            radius,
            dy,
            dx: -span,
            span,
            phantom: Default::default(),
        }
    }
}

impl<V: From<[i32; 2]>> Iterator for Disc<V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.radius < 0 || self.dy > self.radius {
            return None;
        }

        let ret = V::from([self.dx, self.dy]);

        self.dx += 1;
        if self.dx > self.span {
            self.dy += 1;
            self.span = half_width(self.radius, self.dy);
            self.dx = -self.span;
        }

        Some(ret)
    }
}

/// Return whether an offset lies inside the disc of the given radius.
pub fn in_disc(offset: impl Into<[i32; 2]>, radius: i32) -> bool {
    if radius < 0 {
        return false;
    }
    let [x, y] = offset.into();
    let (x, y, r) = (x as i64, y as i64, radius as i64);
    x * x + y * y <= r * r
}

/// Number of lattice points in a disc of the given radius.
///
/// Gauss circle count `1 + 4r + 4 Σ_{i=1..r} ⌊√(r² - i²)⌋`, computed
/// independently of the `Disc` sweep.
pub fn disc_cell_count(radius: i32) -> usize {
    if radius < 0 {
        return 0;
    }
    let r = radius as i64;
    let quadrant: i64 = (1..=r).map(|i| isqrt(r * r - i * i)).sum();
    (1 + 4 * r + 4 * quadrant) as usize
}

/// Integer square root, largest `n` with `n * n <= x`.
pub fn isqrt(x: i64) -> i64 {
    if x <= 0 {
        return 0;
    }
    // Float estimate, then fix up rounding error at the edges.
    let mut n = (x as f64).sqrt() as i64;
    while n * n > x {
        n -= 1;
    }
    while (n + 1) * (n + 1) <= x {
        n += 1;
    }
    n
}

/// Half-width of the disc's row at height `dy`, or -1 past the disc.
fn half_width(radius: i32, dy: i32) -> i32 {
    let (r, y) = (radius as i64, dy as i64);
    if radius < 0 || y.abs() > r {
        return -1;
    }
    isqrt(r * r - y * y) as i32
}
