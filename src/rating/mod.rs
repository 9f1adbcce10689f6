//! Rating adjustments derived from a completed table.
//!
//! For every entry the delta is the sum of two terms:
//!
//! - gap: mean opponent rating minus own rating (0 with no opponents)
//! - performance: `sum / total * n - 1`, or 0 when the total is not positive
//!
//! [`apply`] computes deltas from a ratings snapshot without touching
//! anything. [`commit`] adds each delta, truncated toward zero, to the
//! matching player.
mod deltas;
mod engine;

pub use deltas::*;
pub use engine::*;
