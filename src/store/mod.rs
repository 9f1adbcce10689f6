//! Persistence for players and tables.
//!
//! [`Store`] abstracts the backing store from the request layer. Two
//! implementations exist: [`Memory`] for tests and demos, and `Postgres`
//! behind the `database` feature.
mod memory;
#[cfg(feature = "database")]
mod postgres;

pub use memory::*;
#[cfg(feature = "database")]
pub use postgres::*;

use crate::ClubError;
use crate::Rating;
use crate::TableId;
use crate::players::Player;
use crate::rating::Deltas;
use crate::tables::Table;
use crate::tables::TableEntry;

/// Player store, table store, and the rating application that spans both.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    /// Creates tables if they do not exist yet.
    async fn migrate(&self) -> Result<(), ClubError>;
    /// Fails with [`ClubError::Conflict`] if the name is taken.
    async fn create_player(&self, player: &Player) -> Result<(), ClubError>;
    /// All players in creation order.
    async fn players(&self) -> Result<Vec<Player>, ClubError>;
    async fn player(&self, name: &str) -> Result<Option<Player>, ClubError>;
    /// The named players by rating, highest first. Unknown names are skipped.
    async fn ranked(&self, names: &[String]) -> Result<Vec<Player>, ClubError>;
    /// Fails with [`ClubError::NotFound`] if no such player exists.
    async fn update_rating(&self, name: &str, rating: Rating) -> Result<(), ClubError>;
    async fn create_table(&self, entries: &[TableEntry]) -> Result<TableId, ClubError>;
    /// Fails with [`ClubError::NotFound`] if no such table exists.
    async fn table(&self, id: TableId) -> Result<Table, ClubError>;
    /// All tables in identifier order.
    async fn tables(&self) -> Result<Vec<Table>, ClubError>;
    /// Computes and commits the deltas of a table as one unit: either
    /// every participant's rating moves or none does.
    async fn apply_ratings(&self, id: TableId) -> Result<Deltas, ClubError>;
    /// Cheap round trip for health checks.
    async fn ping(&self) -> Result<(), ClubError>;
}

/// Ranking order: rating descending, then name.
pub(crate) fn rank(players: &mut [Player]) {
    players.sort_by(|a, b| {
        b.rating()
            .total_cmp(&a.rating())
            .then_with(|| a.name().cmp(b.name()))
    });
}
