use std::fmt::Write;

use engine::prelude::*;

/// Characters for fog overlay from no overlay to fully opaque.
const SHADES: [char; 5] = ['.', '+', ':', '%', '#'];

/// Draw the fog overlay of a square viewport centered on `camera` as text.
///
/// The observer's cell is drawn as `@`.
pub fn view_map<C: Clock>(
    fog: &Fog<C>,
    camera: IVec2,
    half_size: i32,
) -> String {
    let min = camera - IVec2::splat(half_size);
    let max = camera + IVec2::splat(half_size + 1);

    let mut alpha: HashMap<IVec2, f32> = fog.overlay(min, max).collect();
    if let Some(p) = fog.observer() {
        // Marker value for the observer.
        alpha.insert(p, -1.0);
    }

    let mut ret = String::new();
    for y in min.y..max.y {
        for x in min.x..max.x {
            let c = match alpha.get(&ivec2(x, y)) {
                Some(a) if *a < 0.0 => '@',
                Some(a) => shade(*a),
                None => SHADES[0],
            };
            ret.push(c);
        }
        let _ = writeln!(ret);
    }
    ret
}

fn shade(alpha: f32) -> char {
    let i = (alpha * (SHADES.len() - 1) as f32).round() as usize;
    SHADES[i.clamp(1, SHADES.len() - 1)]
}
