//! Unopinionated standalone utilities.

mod bits;
pub use bits::{compact_u64_by_2, spread_u32_by_2};

mod geom;
pub use geom::{neighbors_8, DIR_8};

/// Map with an efficient hash function.
pub use rustc_hash::FxHashMap as HashMap;

/// Set with an efficient hash function.
pub use rustc_hash::FxHashSet as HashSet;
