//! Generic field-of-view computation.
//!
//! Field of view here is a pure distance disc, there is no occlusion. Cells
//! are included when the Euclidean distance between cell centers is at most
//! the radius.

mod disc;
pub use disc::{disc_cell_count, in_disc, isqrt, Disc};
