use std::{cell::Cell, rc::Rc};

use serde::{Deserialize, Serialize};

/// An opaque representation of a time instant.
///
/// The unit of time is a millisecond. Wall clock instants count from the
/// UNIX epoch.
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
    Serialize,
    Deserialize,
)]
pub struct Instant(pub i64);

impl Instant {
    /// Return number of milliseconds elapsed since this instant.
    pub fn elapsed(&self, c: &impl Clock) -> i64 {
        c.now() - *self
    }

    /// Span between two instants in seconds.
    pub fn secs_since(self, earlier: Instant) -> f64 {
        (self - earlier) as f64 / 1000.0
    }
}

impl std::ops::Add<i64> for Instant {
    type Output = Self;

    fn add(self, rhs: i64) -> Self::Output {
        Instant(self.0 + rhs)
    }
}

impl std::ops::AddAssign<i64> for Instant {
    fn add_assign(&mut self, rhs: i64) {
        self.0 += rhs;
    }
}

impl std::ops::Sub<Instant> for Instant {
    type Output = i64;

    fn sub(self, rhs: Instant) -> Self::Output {
        self.0 - rhs.0
    }
}

impl std::ops::Sub<i64> for Instant {
    type Output = Self;

    fn sub(self, rhs: i64) -> Self::Output {
        Instant(self.0 - rhs)
    }
}

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Real time clock.
///
/// Uses system time instead of a monotonic clock, persisted instants must
/// stay comparable after the program restarts.
#[derive(Copy, Clone, Default, Debug)]
pub struct WallClock;

impl Clock for WallClock {
    fn now(&self) -> Instant {
        let t = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default();
        Instant(t.as_millis() as i64)
    }
}

/// Manually advanced clock for simulations and tests.
///
/// Clones share the same time value.
#[derive(Clone, Default, Debug)]
pub struct ManualClock(Rc<Cell<i64>>);

impl ManualClock {
    pub fn new(start: Instant) -> Self {
        ManualClock(Rc::new(Cell::new(start.0)))
    }

    pub fn advance(&self, ms: i64) {
        self.0.set(self.0.get() + ms);
    }

    pub fn set(&self, t: Instant) {
        self.0.set(t.0);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        Instant(self.0.get())
    }
}
