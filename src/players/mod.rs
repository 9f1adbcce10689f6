//! Club players keyed by their unique name.
mod player;

pub use player::*;
