//! Persisted state formats.
//!
//! Saves are JSON documents. The byte form used for storage is the JSON text
//! compressed with snappy.

use anyhow::Context;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    store::Discovered, Clock, Fog, Instant, CRITICAL_THRESHOLD,
    WARNING_THRESHOLD,
};

/// Discovery history of a visibility engine.
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FogSave {
    /// Discovered cells, order is not significant.
    pub discovered_cells: Vec<[i32; 2]>,
    pub radius: i32,
}

/// Countdown timer state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSave {
    pub duration: f64,
    pub remaining: f64,
    pub is_running: bool,
    pub is_paused: bool,
    pub has_expired: bool,
    pub total_elapsed: f64,
    pub start_time: Instant,
    pub pause_time: Instant,
    pub total_paused_time: f64,
    #[serde(default = "default_warning")]
    pub warning_threshold: f64,
    #[serde(default = "default_critical")]
    pub critical_threshold: f64,
    #[serde(default)]
    pub show_milliseconds: bool,
}

fn default_warning() -> f64 {
    WARNING_THRESHOLD
}

fn default_critical() -> f64 {
    CRITICAL_THRESHOLD
}

/// Save data with a byte-level storage form.
pub trait SaveData: Serialize + DeserializeOwned {
    fn to_bytes(&self) -> anyhow::Result<Vec<u8>> {
        let json = serde_json::to_vec(self)?;
        Ok(snap::raw::Encoder::new().compress_vec(&json)?)
    }

    fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let json = snap::raw::Decoder::new()
            .decompress_vec(bytes)
            .context("corrupt save data")?;
        serde_json::from_slice(&json).context("malformed save data")
    }
}

impl SaveData for FogSave {}

impl<C: Clock> Fog<C> {
    /// Snapshot the discovery history and radius.
    pub fn serialize(&self) -> FogSave {
        FogSave {
            discovered_cells: self.store.discovered.cells(),
            radius: self.radius,
        }
    }

    /// Replace discovery history and radius from a save.
    ///
    /// Visibility is not restored. Everything derived from the observer is
    /// cleared, and nothing is visible until the next `update`.
    pub fn deserialize(&mut self, save: FogSave) {
        self.store.discovered = Discovered::from(save.discovered_cells);
        self.store.clear_transient();
        self.reveals.clear();
        self.observer = None;
        self.radius = save.radius;
        log::info!(
            "fog: loaded {} discovered cells, radius {}",
            self.store.discovered.len(),
            self.radius
        );
    }
}

impl SaveData for TimerSave {}
