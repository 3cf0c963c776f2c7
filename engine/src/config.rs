//! Tunable parameters for the fog and the countdown timer.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{
    CRITICAL_THRESHOLD, DEFAULT_FADE_MS, DEFAULT_RADIUS, DISCOVERED_OPACITY,
    WARNING_THRESHOLD,
};

/// Visibility engine settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FogConfig {
    /// Radius of the observer's visibility disc in cells.
    pub radius: i32,
    /// How long a newly revealed cell takes to fade in, in milliseconds.
    pub fade_ms: i64,
    /// Opacity of cells that have been discovered but are not currently
    /// visible.
    pub discovered_opacity: f32,
}

impl Default for FogConfig {
    fn default() -> Self {
        FogConfig {
            radius: DEFAULT_RADIUS,
            fade_ms: DEFAULT_FADE_MS,
            discovered_opacity: DISCOVERED_OPACITY,
        }
    }
}

/// Countdown timer settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TimerConfig {
    /// Countdown length in seconds.
    pub duration: f64,
    pub warning_threshold: f64,
    pub critical_threshold: f64,
    pub show_milliseconds: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        TimerConfig {
            duration: 300.0,
            warning_threshold: WARNING_THRESHOLD,
            critical_threshold: CRITICAL_THRESHOLD,
            show_milliseconds: false,
        }
    }
}

#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub fog: FogConfig,
    pub timer: TimerConfig,
}

impl Config {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(idm::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let ret = Config::parse(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("loaded config from {}", path.display());
        Ok(ret)
    }
}
