//! Fade-in animations for newly revealed cells.

use crate::{prelude::*, Instant, Key};

/// Fade-in state of one cell.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Reveal {
    pub start: Instant,
    /// From 0.0 to 1.0.
    pub progress: f32,
}

/// Table of in-flight reveal animations.
///
/// Entries retire themselves in `advance` once their fade duration has
/// elapsed, so the table only ever holds cells revealed within the last fade
/// duration.
#[derive(Clone, Debug)]
pub struct RevealTable {
    /// Fade duration in milliseconds.
    fade: i64,
    entries: HashMap<Key, Reveal>,
}

impl RevealTable {
    pub fn new(fade: i64) -> Self {
        RevealTable {
            fade,
            entries: Default::default(),
        }
    }

    /// Start or restart the reveal animation of a cell.
    pub fn start(&mut self, key: Key, now: Instant) {
        self.entries.insert(
            key,
            Reveal {
                start: now,
                progress: 0.0,
            },
        );
    }

    /// Update every animation's progress from its start time and drop the
    /// ones that have finished.
    pub fn advance(&mut self, now: Instant) {
        let fade = self.fade;
        self.entries.retain(|_, a| {
            a.progress = if fade <= 0 {
                1.0
            } else {
                ((now - a.start) as f32 / fade as f32).clamp(0.0, 1.0)
            };
            a.progress < 1.0
        });
    }

    pub fn progress(&self, key: Key) -> Option<f32> {
        self.entries.get(&key).map(|a| a.progress)
    }

    pub fn get(&self, key: Key) -> Option<&Reveal> {
        self.entries.get(&key)
    }

    pub fn contains(&self, key: Key) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fade_in() {
        let k = Key::encode(4, 4);
        let mut table = RevealTable::new(500);
        table.start(k, Instant(1000));
        assert_eq!(table.progress(k), Some(0.0));

        table.advance(Instant(1250));
        assert_eq!(table.progress(k), Some(0.5));

        table.advance(Instant(1499));
        assert!(table.progress(k).unwrap() < 1.0);

        table.advance(Instant(1500));
        assert!(!table.contains(k));
        assert!(table.is_empty());
    }

    #[test]
    fn restart_overwrites() {
        let k = Key::encode(0, 1);
        let mut table = RevealTable::new(500);
        table.start(k, Instant(0));
        table.advance(Instant(400));
        assert_eq!(table.progress(k), Some(0.8));

        table.start(k, Instant(400));
        assert_eq!(table.len(), 1);
        assert_eq!(table.progress(k), Some(0.0));
        assert_eq!(table.get(k).map(|a| a.start), Some(Instant(400)));

        table.advance(Instant(650));
        assert_eq!(table.progress(k), Some(0.5));
    }

    #[test]
    fn zero_fade_completes_immediately() {
        let k = Key::encode(0, 0);
        let mut table = RevealTable::new(0);
        table.start(k, Instant(10));
        table.advance(Instant(10));
        assert!(table.is_empty());
    }
}
