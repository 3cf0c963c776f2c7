//! Cell sets for visibility and discovery history.

use derive_more::{Deref, DerefMut};
use serde::{Deserialize, Serialize};

use crate::{prelude::*, Key};

/// Portions of map that have been revealed to player.
///
/// Serializes as a sorted list of `[x, y]` pairs.
#[derive(
    Clone, Default, Debug, PartialEq, Deref, DerefMut, Serialize, Deserialize,
)]
#[serde(from = "Vec<[i32; 2]>", into = "Vec<[i32; 2]>")]
pub struct Discovered(HashSet<Key>);

impl From<Vec<[i32; 2]>> for Discovered {
    fn from(cells: Vec<[i32; 2]>) -> Self {
        Discovered(cells.into_iter().map(Key::from).collect())
    }
}

impl From<Discovered> for Vec<[i32; 2]> {
    fn from(discovered: Discovered) -> Self {
        discovered.cells()
    }
}

impl Discovered {
    /// Coordinates of discovered cells in key order.
    pub fn cells(&self) -> Vec<[i32; 2]> {
        let mut keys: Vec<Key> = self.0.iter().copied().collect();
        keys.sort();
        keys.into_iter().map(<[i32; 2]>::from).collect()
    }
}

/// The three cell sets the visibility engine maintains.
#[derive(Clone, Default, Debug)]
pub struct Store {
    /// Cells inside the observer's current visibility disc.
    pub visible: HashSet<Key>,
    /// Visibility as it was before the latest sweep.
    ///
    /// Only used to tell which cells are new in the current sweep.
    pub previous: HashSet<Key>,
    /// Every cell that has ever been seen or revealed.
    pub discovered: Discovered,
}

impl Store {
    /// Move current visibility into the previous-visibility snapshot and
    /// leave current visibility empty for a new sweep.
    pub fn begin_sweep(&mut self) {
        std::mem::swap(&mut self.visible, &mut self.previous);
        self.visible.clear();
    }

    /// Mark a cell visible and discovered by the current sweep, return
    /// whether it was outside the visibility of the previous sweep.
    pub fn sight(&mut self, key: Key) -> bool {
        self.visible.insert(key);
        self.discovered.insert(key);
        !self.previous.contains(&key)
    }

    /// Forget everything that is derived from observer position.
    pub fn clear_transient(&mut self) {
        self.visible.clear();
        self.previous.clear();
    }
}
