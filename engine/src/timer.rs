//! Countdown timer with pause/resume and drift-free save restoration.

use std::fmt;

use crate::{
    event::{ListenerId, Listeners, TimerEvent, TimerEventKind},
    Clock, Instant, TimerConfig, TimerSave, WallClock,
};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum TimerState {
    Stopped,
    Running,
    Paused,
    Expired,
}

/// Countdown timer driven by an external tick.
///
/// Time is measured from the timer's clock, so a slow or irregular frame
/// rate does not change how fast the countdown runs. Time spent paused is
/// tracked separately and never counts as elapsed time.
pub struct Timer<C: Clock = WallClock> {
    clock: C,

    /// Length of the countdown in seconds, including time added or removed
    /// afterwards.
    duration: f64,
    remaining: f64,

    // Flags as they appear in save files. A paused timer is also running.
    is_running: bool,
    is_paused: bool,
    has_expired: bool,

    total_elapsed: f64,
    start_time: Instant,
    pause_time: Instant,
    total_paused_time: f64,

    warning_threshold: f64,
    critical_threshold: f64,
    show_milliseconds: bool,

    // Threshold events already sent for the current approach.
    warned: bool,
    went_critical: bool,

    /// Baseline for the next tick's elapsed time.
    last_tick: Instant,

    on_expire: Option<Box<dyn FnOnce()>>,
    listeners: Listeners,
}

impl<C: Clock> Timer<C> {
    pub fn new(duration: f64, clock: C) -> Self {
        let now = clock.now();
        Timer {
            clock,
            duration,
            remaining: duration,
            is_running: false,
            is_paused: false,
            has_expired: false,
            total_elapsed: 0.0,
            start_time: now,
            pause_time: now,
            total_paused_time: 0.0,
            warning_threshold: crate::WARNING_THRESHOLD,
            critical_threshold: crate::CRITICAL_THRESHOLD,
            show_milliseconds: false,
            warned: false,
            went_critical: false,
            last_tick: now,
            on_expire: None,
            listeners: Default::default(),
        }
    }

    pub fn from_config(config: &TimerConfig, clock: C) -> Self {
        let mut ret = Timer::new(config.duration, clock).with_thresholds(
            config.warning_threshold,
            config.critical_threshold,
        );
        ret.show_milliseconds = config.show_milliseconds;
        ret
    }

    pub fn with_thresholds(mut self, warning: f64, critical: f64) -> Self {
        self.warning_threshold = warning;
        self.critical_threshold = critical;
        self
    }

    pub fn show_milliseconds(mut self, show: bool) -> Self {
        self.show_milliseconds = show;
        self
    }

    pub fn state(&self) -> TimerState {
        if self.has_expired {
            TimerState::Expired
        } else if self.is_paused {
            TimerState::Paused
        } else if self.is_running {
            TimerState::Running
        } else {
            TimerState::Stopped
        }
    }

    /// Seconds left on the countdown.
    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Seconds the timer has spent running, not counting pauses.
    pub fn total_elapsed(&self) -> f64 {
        self.total_elapsed
    }

    pub fn total_paused_time(&self) -> f64 {
        self.total_paused_time
    }

    /// Register a callback to run once when the countdown reaches zero.
    ///
    /// Replaces any earlier callback that hasn't fired yet.
    pub fn on_expire(&mut self, f: impl FnOnce() + 'static) {
        self.on_expire = Some(Box::new(f));
    }

    pub fn subscribe(
        &mut self,
        f: impl FnMut(&TimerEvent) -> anyhow::Result<()> + 'static,
    ) -> ListenerId {
        self.listeners.subscribe(f)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Start a stopped timer or resume a paused one.
    pub fn start(&mut self) {
        let now = self.clock.now();
        match self.state() {
            TimerState::Stopped => {
                // Backdate the start so that start time and paused time keep
                // describing the remaining time when resuming after a stop.
                let spent = ((self.duration - self.remaining) * 1000.0).round();
                self.start_time = now - spent as i64;
                self.total_paused_time = 0.0;
            }
            TimerState::Paused => {
                self.total_paused_time += now.secs_since(self.pause_time);
                self.is_paused = false;
            }
            TimerState::Running | TimerState::Expired => return,
        }

        self.is_running = true;
        self.last_tick = now;
        log::debug!("timer started with {:.3} s remaining", self.remaining);
        self.emit(TimerEventKind::Started);
    }

    /// Pause a running timer.
    ///
    /// Time up to the pause is settled first, so remaining time is exact at
    /// the moment of pausing.
    pub fn pause(&mut self) {
        if self.state() != TimerState::Running {
            return;
        }

        self.tick();
        if self.state() != TimerState::Running {
            // Settling the time expired the timer.
            return;
        }

        self.is_paused = true;
        self.pause_time = self.last_tick;
        self.emit(TimerEventKind::Paused);
    }

    /// Halt the timer without resetting remaining time.
    pub fn stop(&mut self) {
        if !matches!(self.state(), TimerState::Running | TimerState::Paused) {
            return;
        }

        self.is_running = false;
        self.is_paused = false;
        self.emit(TimerEventKind::Stopped);
    }

    /// Stop the timer and rewind it to full duration.
    pub fn reset(&mut self) {
        let now = self.clock.now();
        self.is_running = false;
        self.is_paused = false;
        self.has_expired = false;
        self.remaining = self.duration;
        self.total_elapsed = 0.0;
        self.total_paused_time = 0.0;
        self.warned = false;
        self.went_critical = false;
        self.start_time = now;
        self.pause_time = now;
        self.last_tick = now;
        self.emit(TimerEventKind::Reset);
    }

    /// Advance a running timer by the clock time since the previous tick.
    pub fn tick(&mut self) {
        if self.state() != TimerState::Running {
            return;
        }

        let now = self.clock.now();
        let elapsed = now.secs_since(self.last_tick).max(0.0);
        self.last_tick = now;

        let prev = self.remaining;
        self.remaining = (self.remaining - elapsed).max(0.0);
        self.total_elapsed += elapsed;

        self.emit(TimerEventKind::Updated);
        self.check_thresholds(prev);

        if self.remaining <= 0.0 {
            self.expire();
        }
    }

    /// Extend the countdown.
    pub fn add_time(&mut self, secs: f64) {
        if self.has_expired {
            log::debug!("timer: not adding time to an expired timer");
            return;
        }

        self.duration += secs;
        self.remaining += secs;

        // Moving back above a threshold lets it fire again.
        if self.remaining > self.warning_threshold {
            self.warned = false;
        }
        if self.remaining > self.critical_threshold {
            self.went_critical = false;
        }

        self.emit(TimerEventKind::TimeAdded);
    }

    /// Shorten the countdown, expiring an active timer that runs out.
    pub fn remove_time(&mut self, secs: f64) {
        if self.has_expired {
            return;
        }

        let prev = self.remaining;
        self.duration = (self.duration - secs).max(0.0);
        self.remaining = (self.remaining - secs).max(0.0);
        self.emit(TimerEventKind::TimeRemoved);

        if matches!(self.state(), TimerState::Running | TimerState::Paused) {
            self.check_thresholds(prev);
            if self.remaining <= 0.0 {
                self.expire();
            }
        }
    }

    pub fn save(&self) -> TimerSave {
        TimerSave {
            duration: self.duration,
            remaining: self.remaining,
            is_running: self.is_running,
            is_paused: self.is_paused,
            has_expired: self.has_expired,
            total_elapsed: self.total_elapsed,
            start_time: self.start_time,
            pause_time: self.pause_time,
            total_paused_time: self.total_paused_time,
            warning_threshold: self.warning_threshold,
            critical_threshold: self.critical_threshold,
            show_milliseconds: self.show_milliseconds,
        }
    }

    /// Rebuild a timer from saved state.
    ///
    /// A timer that was running when saved has its remaining time computed
    /// from the clock, start time and total paused time, so time passes
    /// while the program is not running. A timer that runs out this way
    /// comes back expired, but no events or expiration callback fire.
    pub fn restore(save: TimerSave, clock: C) -> Self {
        let now = clock.now();
        let mut ret = Timer::new(save.duration, clock)
            .with_thresholds(save.warning_threshold, save.critical_threshold)
            .show_milliseconds(save.show_milliseconds);

        ret.remaining = save.remaining;
        ret.is_running = save.is_running;
        ret.is_paused = save.is_paused;
        ret.has_expired = save.has_expired;
        ret.total_elapsed = save.total_elapsed;
        ret.start_time = save.start_time;
        ret.pause_time = save.pause_time;
        ret.total_paused_time = save.total_paused_time;
        ret.last_tick = now;

        if ret.state() == TimerState::Running {
            let elapsed =
                now.secs_since(save.start_time) - save.total_paused_time;
            ret.total_elapsed = elapsed.max(0.0);
            ret.remaining = save.duration - elapsed;

            if ret.remaining <= 0.0 {
                log::info!("timer ran out while saved, restoring as expired");
                ret.remaining = 0.0;
                ret.is_running = false;
                ret.has_expired = true;
            }
        }

        // Don't replay threshold events the saved timer is already past.
        ret.warned = ret.remaining <= ret.warning_threshold;
        ret.went_critical = ret.remaining <= ret.critical_threshold;

        ret
    }

    /// Send threshold events when remaining time is in the `(t - 1, t]`
    /// window of a threshold, or has jumped past the whole window since the
    /// previous update. Each threshold fires once per approach.
    fn check_thresholds(&mut self, prev: f64) {
        let cur = self.remaining;
        let reached = |t: f64| cur <= t && (cur > t - 1.0 || prev > t);

        if !self.warned && reached(self.warning_threshold) {
            self.warned = true;
            self.emit(TimerEventKind::Warning);
        }
        if !self.went_critical && reached(self.critical_threshold) {
            self.went_critical = true;
            self.emit(TimerEventKind::Critical);
        }
    }

    fn expire(&mut self) {
        if self.has_expired {
            return;
        }

        self.remaining = 0.0;
        self.is_running = false;
        self.is_paused = false;
        self.has_expired = true;
        log::info!("timer expired after {:.3} s", self.total_elapsed);

        if let Some(f) = self.on_expire.take() {
            f();
        }
        self.emit(TimerEventKind::Expired);
    }

    fn emit(&mut self, kind: TimerEventKind) {
        self.listeners.dispatch(&TimerEvent {
            kind,
            remaining: self.remaining,
        });
    }
}

impl<C: Clock> fmt::Display for Timer<C> {
    /// `MM:SS`, or `MM:SS.mmm` when showing milliseconds.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.show_milliseconds {
            let ms = (self.remaining * 1000.0).round() as i64;
            write!(
                f,
                "{:02}:{:02}.{:03}",
                ms / 60_000,
                (ms / 1000) % 60,
                ms % 1000
            )
        } else {
            // Round up so the display reads zero only once the timer is done.
            let s = self.remaining.ceil() as i64;
            write!(f, "{:02}:{:02}", s / 60, s % 60)
        }
    }
}
