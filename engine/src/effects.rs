//! Area reveal and hide effects

use fov::Disc;

use crate::{prelude::*, Clock, Fog, Key};

impl<C: Clock> Fog<C> {
    /// Discover every cell within radius `r` of `(cx, cy)` and start their
    /// reveal animations.
    ///
    /// Current visibility is not changed.
    pub fn reveal_area(&mut self, cx: i32, cy: i32, r: i32) {
        let now = self.clock.now();
        let center = ivec2(cx, cy);
        let mut n = 0;
        for offset in Disc::<IVec2>::new(r) {
            let key = Key::from(center.wrapping_add(offset));
            self.store.discovered.insert(key);
            self.reveals.start(key, now);
            n += 1;
        }
        log::debug!("fog: revealed {n} cells around {center}");
    }

    /// Discover a single cell.
    pub fn reveal(&mut self, p: impl Into<IVec2>) {
        let p = p.into();
        self.reveal_area(p.x, p.y, 0);
    }

    /// Undiscover and unsee every cell within radius `r` of `(cx, cy)`.
    ///
    /// Reveal animations in flight are left to run out. The next visibility
    /// sweep will see and discover any hidden cell inside the observer's
    /// disc again.
    pub fn hide_area(&mut self, cx: i32, cy: i32, r: i32) {
        let center = ivec2(cx, cy);
        let mut n = 0;
        for offset in Disc::<IVec2>::new(r) {
            let key = Key::from(center.wrapping_add(offset));
            n += self.store.discovered.remove(&key) as usize;
            self.store.visible.remove(&key);
        }
        log::debug!("fog: hid {n} discovered cells around {center}");
    }
}
