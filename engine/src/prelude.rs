pub use crate::{
    Clock, Fog, FogSave, Instant, Key, SaveData, Timer, TimerEventKind,
    TimerSave, TimerState,
};
pub use glam::{ivec2, IVec2};
pub use util::{HashMap, HashSet};
