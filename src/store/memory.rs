use super::*;
use crate::rating;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    players: Vec<Player>,
    tables: BTreeMap<TableId, Vec<TableEntry>>,
    next: TableId,
}

/// Process-lifetime store. Nothing survives a restart.
#[derive(Default)]
pub struct Memory {
    inner: RwLock<Inner>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Store for Memory {
    async fn migrate(&self) -> Result<(), ClubError> {
        Ok(())
    }

    async fn create_player(&self, player: &Player) -> Result<(), ClubError> {
        let mut inner = self.inner.write().await;
        if inner.players.iter().any(|p| p.name() == player.name()) {
            return Err(ClubError::Conflict(player.name().to_string()));
        }
        inner.players.push(player.clone());
        Ok(())
    }

    async fn players(&self) -> Result<Vec<Player>, ClubError> {
        Ok(self.inner.read().await.players.clone())
    }

    async fn player(&self, name: &str) -> Result<Option<Player>, ClubError> {
        Ok(self
            .inner
            .read()
            .await
            .players
            .iter()
            .find(|p| p.name() == name)
            .cloned())
    }

    async fn ranked(&self, names: &[String]) -> Result<Vec<Player>, ClubError> {
        let mut players = self
            .inner
            .read()
            .await
            .players
            .iter()
            .filter(|p| names.iter().any(|n| n == p.name()))
            .cloned()
            .collect::<Vec<_>>();
        rank(&mut players);
        Ok(players)
    }

    async fn update_rating(&self, name: &str, rating: Rating) -> Result<(), ClubError> {
        self.inner
            .write()
            .await
            .players
            .iter_mut()
            .find(|p| p.name() == name)
            .map(|p| p.rate(rating))
            .ok_or_else(|| ClubError::NotFound(format!("player {}", name)))
    }

    async fn create_table(&self, entries: &[TableEntry]) -> Result<TableId, ClubError> {
        let mut inner = self.inner.write().await;
        inner.next += 1;
        let id = inner.next;
        inner.tables.insert(id, entries.to_vec());
        Ok(id)
    }

    async fn table(&self, id: TableId) -> Result<Table, ClubError> {
        self.inner
            .read()
            .await
            .tables
            .get(&id)
            .map(|entries| Table::new(id, entries.clone()))
            .ok_or_else(|| ClubError::NotFound(format!("table {}", id)))
    }

    async fn tables(&self) -> Result<Vec<Table>, ClubError> {
        Ok(self
            .inner
            .read()
            .await
            .tables
            .iter()
            .map(|(id, entries)| Table::new(*id, entries.clone()))
            .collect())
    }

    async fn apply_ratings(&self, id: TableId) -> Result<Deltas, ClubError> {
        let mut inner = self.inner.write().await;
        let entries = inner
            .tables
            .get(&id)
            .ok_or_else(|| ClubError::NotFound(format!("table {}", id)))?;
        let snapshot = inner
            .players
            .iter()
            .map(|p| (p.name().to_string(), p.rating()))
            .collect::<rating::Ratings>();
        let deltas = rating::apply(entries, &snapshot)?;
        rating::commit(&deltas, &mut inner.players)?;
        Ok(deltas)
    }

    async fn ping(&self) -> Result<(), ClubError> {
        Ok(())
    }
}
