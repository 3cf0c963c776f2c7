//! Fog of war and countdown timing logic.

/// Default radius of the observer's visibility disc.
pub const DEFAULT_RADIUS: i32 = 5;

/// Default fade-in time of newly revealed cells in milliseconds.
pub const DEFAULT_FADE_MS: i64 = 500;

/// Opacity of explored cells that are out of sight.
pub const DISCOVERED_OPACITY: f32 = 0.3;

/// Default seconds remaining when a countdown warns.
pub const WARNING_THRESHOLD: f64 = 60.0;

/// Default seconds remaining when a countdown turns critical.
pub const CRITICAL_THRESHOLD: f64 = 10.0;

mod config;
pub use config::{Config, FogConfig, TimerConfig};

mod effects;

pub mod event;
pub use event::{ListenerId, TimerEvent, TimerEventKind};

mod fog;
pub use fog::Fog;

mod key;
pub use key::Key;

pub mod prelude;

mod reveal;
pub use reveal::{Reveal, RevealTable};

mod save;
pub use save::{FogSave, SaveData, TimerSave};

pub mod store;

mod time;
pub use time::{Clock, Instant, ManualClock, WallClock};

mod timer;
pub use timer::{Timer, TimerState};
