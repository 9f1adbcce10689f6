use crate::Points;

/// One row of a table: a player name and their total across all rounds.
/// Serialized as `{"player": ..., "sum": ...}`, the stored payload shape.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TableEntry {
    pub player: String,
    pub sum: Points,
}

impl TableEntry {
    pub fn new(player: impl Into<String>, sum: Points) -> Self {
        Self {
            player: player.into(),
            sum,
        }
    }
}
