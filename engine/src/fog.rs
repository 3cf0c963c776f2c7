//! Observer visibility and discovery tracking

use fov::Disc;

use crate::{
    prelude::*, store::Store, Clock, FogConfig, Key, RevealTable, WallClock,
};

/// Fog of war over an unbounded grid.
///
/// Tracks which cells the observer currently sees, which cells have ever
/// been seen, and fade-in animations for newly revealed cells. Visibility is
/// a filled Euclidean disc around the observer, there is no occlusion.
pub struct Fog<C: Clock = WallClock> {
    pub(crate) clock: C,
    pub(crate) radius: i32,
    discovered_opacity: f32,
    pub(crate) store: Store,
    pub(crate) reveals: RevealTable,
    /// Observer cell the current visibility was computed for.
    pub(crate) observer: Option<Key>,
}

impl Fog {
    pub fn new(config: &FogConfig) -> Self {
        Fog::with_clock(config, WallClock)
    }
}

impl<C: Clock> Fog<C> {
    pub fn with_clock(config: &FogConfig, clock: C) -> Self {
        Fog {
            clock,
            radius: config.radius,
            discovered_opacity: config.discovered_opacity,
            store: Default::default(),
            reveals: RevealTable::new(config.fade_ms),
            observer: None,
        }
    }

    /// Move the observer and recompute visibility.
    ///
    /// Does nothing if the observer is still on the cell visibility was last
    /// computed for.
    pub fn update(&mut self, observer: impl Into<IVec2>) {
        let observer = observer.into();
        if self.observer == Some(Key::from(observer)) {
            return;
        }

        self.sweep(observer);
        self.tick();
    }

    /// Advance reveal animations to the current time.
    ///
    /// Call once per frame, `update` doesn't advance animations while the
    /// observer stays on the same cell.
    pub fn tick(&mut self) {
        self.reveals.advance(self.clock.now());
    }

    fn sweep(&mut self, origin: IVec2) {
        let now = self.clock.now();
        self.observer = Some(Key::from(origin));
        self.store.begin_sweep();

        for offset in Disc::<IVec2>::new(self.radius) {
            let key = Key::from(origin.wrapping_add(offset));
            if self.store.sight(key) {
                self.reveals.start(key, now);
            }
        }

        log::trace!(
            "fog: swept {} cells at {origin}, {} discovered, {} fading in",
            self.store.visible.len(),
            self.store.discovered.len(),
            self.reveals.len()
        );
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Change visibility radius and recompute visibility right away.
    ///
    /// Uses the last observer position, or the origin if there hasn't been
    /// one yet.
    pub fn set_radius(&mut self, radius: i32) {
        log::debug!("fog: radius {} -> {radius}", self.radius);
        self.radius = radius;
        let origin = self.observer().unwrap_or_default();
        self.sweep(origin);
        self.tick();
    }

    /// Cell visibility was last computed for.
    pub fn observer(&self) -> Option<IVec2> {
        self.observer.map(IVec2::from)
    }

    pub fn is_visible(&self, p: impl Into<IVec2>) -> bool {
        self.store.visible.contains(&Key::from(p.into()))
    }

    pub fn is_discovered(&self, p: impl Into<IVec2>) -> bool {
        self.store.discovered.contains(&Key::from(p.into()))
    }

    /// Cell is still fading in.
    pub fn is_partially_visible(&self, p: impl Into<IVec2>) -> bool {
        self.reveals.contains(Key::from(p.into()))
    }

    /// How much of a cell should show through the fog, from 0.0 to 1.0.
    ///
    /// Visible cells are fully shown, fading cells show their fade progress,
    /// discovered cells are dimmed and undiscovered cells are hidden.
    pub fn opacity(&self, p: impl Into<IVec2>) -> f32 {
        let key = Key::from(p.into());
        if self.store.visible.contains(&key) {
            1.0
        } else if let Some(progress) = self.reveals.progress(key) {
            progress
        } else if self.store.discovered.contains(&key) {
            self.discovered_opacity
        } else {
            0.0
        }
    }

    /// Fraction of a visible cell's 8 neighbors that are not visible.
    ///
    /// Zero for cells that aren't visible themselves.
    pub fn edge_ratio(&self, p: impl Into<IVec2>) -> f32 {
        let p = p.into();
        if !self.is_visible(p) {
            return 0.0;
        }

        let hidden = util::neighbors_8(p)
            .filter(|&n| !self.is_visible(n))
            .count();
        hidden as f32 / util::DIR_8.len() as f32
    }

    /// Cells in the viewport rectangle `min..max` that need a fog overlay,
    /// with the overlay alpha.
    ///
    /// Fully visible cells are skipped.
    pub fn overlay(
        &self,
        min: IVec2,
        max: IVec2,
    ) -> impl Iterator<Item = (IVec2, f32)> + '_ {
        (min.y..max.y)
            .flat_map(move |y| (min.x..max.x).map(move |x| ivec2(x, y)))
            .filter_map(|p| {
                let opacity = self.opacity(p);
                (opacity < 1.0).then_some((p, 1.0 - opacity))
            })
    }

    /// Forget all visibility, discovery and animation state.
    pub fn reset(&mut self) {
        self.store = Default::default();
        self.reveals.clear();
        self.observer = None;
    }

    pub fn visible_cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.store.visible.iter().map(|&k| IVec2::from(k))
    }

    pub fn discovered_cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.store.discovered.iter().map(|&k| IVec2::from(k))
    }

    pub fn visible_count(&self) -> usize {
        self.store.visible.len()
    }

    pub fn discovered_count(&self) -> usize {
        self.store.discovered.len()
    }

    /// Number of reveal animations in flight.
    pub fn reveal_count(&self) -> usize {
        self.reveals.len()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Instant, ManualClock};
    use fov::{disc_cell_count, in_disc};
    use quickcheck_macros::quickcheck;

    fn fog(radius: i32) -> (Fog<ManualClock>, ManualClock) {
        let clock = ManualClock::new(Instant(10_000));
        let config = FogConfig {
            radius,
            ..Default::default()
        };
        (Fog::with_clock(&config, clock.clone()), clock)
    }

    #[test]
    fn empty_before_update() {
        let (fog, _) = fog(5);
        assert!(!fog.is_visible([0, 0]));
        assert!(!fog.is_discovered([0, 0]));
        assert_eq!(fog.opacity([0, 0]), 0.0);
        assert_eq!(fog.observer(), None);
    }

    #[test]
    fn disc_visibility() {
        let (mut fog, _) = fog(5);
        fog.update([3, -2]);

        assert_eq!(fog.visible_count(), disc_cell_count(5));
        assert!(fog.is_visible([3, -2]));
        assert!(fog.is_visible([6, 2]));
        assert!(fog.is_visible([8, -2]));
        assert!(!fog.is_visible([7, 2]));
        assert!(!fog.is_visible([9, -2]));
        assert_eq!(fog.observer(), Some(ivec2(3, -2)));
    }

    #[quickcheck]
    fn visible_set_is_exact_disc(radius: u8, x: i16, y: i16) -> bool {
        let radius = (radius % 20) as i32;
        let center = ivec2(x as i32, y as i32);
        let (mut fog, _) = fog(radius);
        fog.update(center);

        fog.visible_count() == disc_cell_count(radius)
            && fog.visible_cells().all(|p| in_disc(p - center, radius))
    }

    #[test]
    fn negative_radius_sees_nothing() {
        let (mut fog, _) = fog(-3);
        fog.update([0, 0]);
        assert_eq!(fog.visible_count(), 0);
        assert_eq!(fog.discovered_count(), 0);
    }

    #[test]
    fn extreme_radius_sees_nothing() {
        let (mut fog, _) = fog(3);
        fog.update([0, 0]);
        fog.set_radius(i32::MIN);
        assert_eq!(fog.visible_count(), 0);
        assert_eq!(fog.discovered_count(), disc_cell_count(3));
    }

    #[test]
    fn coordinates_wrap_at_edges() {
        let (mut fog, _) = fog(1);
        fog.update([i32::MAX, 0]);
        assert_eq!(fog.visible_count(), 5);
        assert!(fog.is_visible([i32::MIN, 0]));
        assert!(fog.is_visible([i32::MAX - 1, 0]));
        assert_eq!(fog.edge_ratio([i32::MAX, 0]), 0.5);
    }

    #[test]
    fn same_cell_update_is_noop() {
        let (mut fog, clock) = fog(3);
        fog.update([0, 0]);
        let k = Key::encode(0, 0);
        assert_eq!(fog.reveals.progress(k), Some(0.0));

        // Mark the animation so a recomputation would be noticed.
        clock.advance(100);
        fog.reveals.start(k, Instant(9_800));
        fog.update([0, 0]);
        assert_eq!(fog.reveals.get(k).map(|a| a.start), Some(Instant(9_800)));
        assert_eq!(fog.reveals.progress(k), Some(0.0));
        assert_eq!(fog.reveal_count(), disc_cell_count(3));
    }

    #[test]
    fn moving_animates_only_new_cells() {
        let (mut fog, clock) = fog(2);
        fog.update([0, 0]);
        clock.advance(600);
        fog.tick();
        assert_eq!(fog.reveal_count(), 0);

        fog.update([1, 0]);
        // The new column of cells at x = 3 and the ones swinging into the
        // disc's rounded edges.
        for p in fog.visible_cells() {
            let was_seen = in_disc(p, 2);
            assert_eq!(fog.is_partially_visible(p), !was_seen, "{p}");
        }
        assert!(fog.is_partially_visible([3, 0]));
        assert!(!fog.is_partially_visible([-2, 0]));
        assert!(fog.is_discovered([-2, 0]));
        assert!(!fog.is_visible([-2, 0]));
    }

    #[test]
    fn opacity_priorities() {
        let (mut fog, clock) = fog(1);
        fog.update([0, 0]);
        clock.advance(1000);
        fog.update([10, 0]);
        fog.reveal_area(20, 0, 0);

        // Visible beats animating.
        assert!(fog.is_partially_visible([10, 0]));
        assert_eq!(fog.opacity([10, 0]), 1.0);
        // Animating.
        assert_eq!(fog.opacity([20, 0]), 0.0);
        clock.advance(250);
        fog.tick();
        assert_eq!(fog.opacity([20, 0]), 0.5);
        // Remembered.
        assert_eq!(fog.opacity([0, 0]), 0.3);
        // Never seen.
        assert_eq!(fog.opacity([0, 5]), 0.0);
    }

    #[test]
    fn reveal_converges() {
        let (mut fog, clock) = fog(4);
        fog.update([0, 0]);
        fog.reveal([30, 30]);
        assert!(fog.is_partially_visible([30, 30]));

        let mut last = fog.opacity([30, 30]);
        assert_eq!(last, 0.0);
        for _ in 0..4 {
            clock.advance(100);
            fog.tick();
            let o = fog.opacity([30, 30]);
            assert!(o > last);
            last = o;
        }

        clock.advance(100);
        fog.tick();
        assert!(!fog.is_partially_visible([30, 30]));
        assert_eq!(fog.reveal_count(), 0);
        assert_eq!(fog.opacity([30, 30]), 0.3);
    }

    #[test]
    fn edge_ratio() {
        let (mut fog, _) = fog(2);
        fog.update([0, 0]);
        assert_eq!(fog.edge_ratio([0, 0]), 0.0);
        // Rightmost cell of the disc only sees its left neighbors.
        assert_eq!(fog.edge_ratio([2, 0]), 5.0 / 8.0);
        assert_eq!(fog.edge_ratio([1, 1]), 3.0 / 8.0);
        assert_eq!(fog.edge_ratio([5, 5]), 0.0);
    }

    #[test]
    fn radius_change_recomputes() {
        let (mut fog, _) = fog(2);
        fog.set_radius(3);
        assert_eq!(fog.observer(), Some(IVec2::ZERO));
        assert_eq!(fog.visible_count(), disc_cell_count(3));

        fog.update([5, 5]);
        fog.set_radius(1);
        assert_eq!(fog.radius(), 1);
        assert_eq!(fog.visible_count(), 5);
        assert!(fog.is_visible([5, 6]));
        assert!(!fog.is_visible([6, 6]));
    }

    #[test]
    fn discovery_is_monotonic() {
        let (mut fog, _) = fog(3);
        let mut seen = 0;
        let path = [[0, 0], [1, 0], [5, 5], [1, 0], [-8, 2]];
        for (i, p) in path.into_iter().enumerate() {
            fog.update(p);
            if i % 2 == 0 {
                fog.reveal_area(p[0] * 3, p[1] - 10, 2);
            }
            assert!(fog.discovered_count() >= seen);
            seen = fog.discovered_count();
        }
    }

    #[test]
    fn overlay_skips_visible_cells() {
        let (mut fog, _) = fog(1);
        fog.update([0, 0]);
        let overlay: Vec<(IVec2, f32)> =
            fog.overlay(ivec2(-1, -1), ivec2(2, 2)).collect();
        // 3x3 viewport minus the 5 cells of a radius 1 disc.
        assert_eq!(overlay.len(), 4);
        assert!(overlay.iter().all(|&(_, a)| a == 1.0));
        assert!(overlay.iter().any(|&(p, _)| p == ivec2(1, 1)));
    }

    #[test]
    fn reset_forgets_everything() {
        let (mut fog, _) = fog(3);
        fog.update([0, 0]);
        fog.reset();
        assert_eq!(fog.discovered_count(), 0);
        assert_eq!(fog.visible_count(), 0);
        assert_eq!(fog.reveal_count(), 0);
        assert_eq!(fog.observer(), None);
        assert_eq!(fog.radius(), 3);

        fog.update([0, 0]);
        assert_eq!(fog.visible_count(), disc_cell_count(3));
    }
}
