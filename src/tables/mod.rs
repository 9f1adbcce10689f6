//! Saved scoring sessions.
//!
//! - [`TableEntry`]: one player's point total in a session
//! - [`Table`]: an ordered list of entries with its identifier
//! - [`Sheet`]: raw per-round form columns, summed into entries
mod entry;
mod sheet;
mod table;

pub use entry::*;
pub use sheet::*;
pub use table::*;
