use super::*;
use crate::pg::*;
use crate::rating;
use tokio::sync::Mutex;
use tokio_postgres::Client;
use tokio_postgres::types::Json;

/// PostgreSQL-backed store.
///
/// The single client sits behind a mutex because a transaction needs
/// exclusive access to it; every call is therefore serialized.
pub struct Postgres {
    client: Mutex<Client>,
}

impl Postgres {
    pub fn new(client: Client) -> Self {
        Self {
            client: Mutex::new(client),
        }
    }
    pub async fn connect(url: &str) -> Result<Self, ClubError> {
        Ok(Self::new(db(url).await?))
    }
    /// Clears every table. Used by the `--reset` mode.
    pub async fn truncate(&self) -> Result<(), ClubError> {
        let client = self.client.lock().await;
        client.batch_execute(<Table as Schema>::truncates()).await?;
        client.batch_execute(<Player as Schema>::truncates()).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl Store for Postgres {
    async fn migrate(&self) -> Result<(), ClubError> {
        let client = self.client.lock().await;
        for sql in [
            <Player as Schema>::creates(),
            <Player as Schema>::indices(),
            <Table as Schema>::creates(),
            <Table as Schema>::indices(),
        ]
        .into_iter()
        .filter(|sql| !sql.is_empty())
        {
            client.batch_execute(sql).await?;
        }
        log::info!("schema ready ({}, {})", PLAYERS, TABLES);
        Ok(())
    }

    async fn create_player(&self, player: &Player) -> Result<(), ClubError> {
        let inserted = self
            .client
            .lock()
            .await
            .execute(
                const_format::concatcp!(
                    "INSERT INTO ",
                    PLAYERS,
                    " (name, rating) VALUES ($1, $2) ON CONFLICT (name) DO NOTHING"
                ),
                &[&player.name(), &player.rating()],
            )
            .await?;
        match inserted {
            0 => Err(ClubError::Conflict(player.name().to_string())),
            _ => Ok(()),
        }
    }

    async fn players(&self) -> Result<Vec<Player>, ClubError> {
        Ok(self
            .client
            .lock()
            .await
            .query(
                const_format::concatcp!("SELECT name, rating FROM ", PLAYERS, " ORDER BY id"),
                &[],
            )
            .await?
            .iter()
            .map(|row| Player::new(row.get::<_, String>(0), row.get::<_, Rating>(1)))
            .collect())
    }

    async fn player(&self, name: &str) -> Result<Option<Player>, ClubError> {
        Ok(self
            .client
            .lock()
            .await
            .query_opt(
                const_format::concatcp!("SELECT name, rating FROM ", PLAYERS, " WHERE name = $1"),
                &[&name],
            )
            .await?
            .map(|row| Player::new(row.get::<_, String>(0), row.get::<_, Rating>(1))))
    }

    async fn ranked(&self, names: &[String]) -> Result<Vec<Player>, ClubError> {
        Ok(self
            .client
            .lock()
            .await
            .query(
                const_format::concatcp!(
                    "SELECT name, rating FROM ",
                    PLAYERS,
                    " WHERE name = ANY($1) ORDER BY rating DESC, name ASC"
                ),
                &[&names],
            )
            .await?
            .iter()
            .map(|row| Player::new(row.get::<_, String>(0), row.get::<_, Rating>(1)))
            .collect())
    }

    async fn update_rating(&self, name: &str, rating: Rating) -> Result<(), ClubError> {
        let updated = self
            .client
            .lock()
            .await
            .execute(
                const_format::concatcp!("UPDATE ", PLAYERS, " SET rating = $2 WHERE name = $1"),
                &[&name, &rating],
            )
            .await?;
        match updated {
            0 => Err(ClubError::NotFound(format!("player {}", name))),
            _ => Ok(()),
        }
    }

    async fn create_table(&self, entries: &[TableEntry]) -> Result<TableId, ClubError> {
        Ok(self
            .client
            .lock()
            .await
            .query_one(
                const_format::concatcp!("INSERT INTO ", TABLES, " (data) VALUES ($1) RETURNING id"),
                &[&Json(entries)],
            )
            .await?
            .get::<_, TableId>(0))
    }

    async fn table(&self, id: TableId) -> Result<Table, ClubError> {
        self.client
            .lock()
            .await
            .query_opt(
                const_format::concatcp!("SELECT data FROM ", TABLES, " WHERE id = $1"),
                &[&id],
            )
            .await?
            .map(|row| Table::new(id, row.get::<_, Json<Vec<TableEntry>>>(0).0))
            .ok_or_else(|| ClubError::NotFound(format!("table {}", id)))
    }

    async fn tables(&self) -> Result<Vec<Table>, ClubError> {
        Ok(self
            .client
            .lock()
            .await
            .query(
                const_format::concatcp!("SELECT id, data FROM ", TABLES, " ORDER BY id"),
                &[],
            )
            .await?
            .iter()
            .map(|row| {
                Table::new(
                    row.get::<_, TableId>(0),
                    row.get::<_, Json<Vec<TableEntry>>>(1).0,
                )
            })
            .collect())
    }

    async fn apply_ratings(&self, id: TableId) -> Result<Deltas, ClubError> {
        let mut client = self.client.lock().await;
        let tx = client.transaction().await?;
        let entries = tx
            .query_opt(
                const_format::concatcp!("SELECT data FROM ", TABLES, " WHERE id = $1"),
                &[&id],
            )
            .await?
            .map(|row| row.get::<_, Json<Vec<TableEntry>>>(0).0)
            .ok_or_else(|| ClubError::NotFound(format!("table {}", id)))?;
        let snapshot = tx
            .query(
                const_format::concatcp!("SELECT name, rating FROM ", PLAYERS, " FOR UPDATE"),
                &[],
            )
            .await?
            .iter()
            .map(|row| (row.get::<_, String>(0), row.get::<_, Rating>(1)))
            .collect::<rating::Ratings>();
        let deltas = rating::apply(&entries, &snapshot)?;
        for (name, delta) in deltas.iter() {
            let updated = tx
                .execute(
                    const_format::concatcp!(
                        "UPDATE ",
                        PLAYERS,
                        " SET rating = rating + $2 WHERE name = $1"
                    ),
                    &[&name, &rating::truncate(delta)],
                )
                .await?;
            if updated == 0 {
                return Err(ClubError::UnknownPlayer(name.to_string()));
            }
        }
        tx.commit().await?;
        Ok(deltas)
    }

    async fn ping(&self) -> Result<(), ClubError> {
        self.client
            .lock()
            .await
            .execute("SELECT 1", &[])
            .await
            .map(|_| ())
            .map_err(ClubError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Needs a scratch database in `DB_URL`; both tables are truncated.
    async fn scratch() -> Option<Postgres> {
        let url = std::env::var("DB_URL").ok()?;
        let store = Postgres::connect(&url).await.unwrap();
        store.migrate().await.unwrap();
        store.truncate().await.unwrap();
        Some(store)
    }

    async fn rating(store: &Postgres, name: &str) -> Rating {
        store.player(name).await.unwrap().unwrap().rating()
    }

    #[tokio::test]
    #[ignore]
    async fn unknown_player_rolls_back() {
        let Some(store) = scratch().await else { return };
        store.create_player(&Player::new("a".into(), 1500.0)).await.unwrap();
        store.create_player(&Player::new("b".into(), 1000.0)).await.unwrap();
        let id = store
            .create_table(&[
                TableEntry::new("a", 10),
                TableEntry::new("ghost", 10),
                TableEntry::new("b", 10),
            ])
            .await
            .unwrap();
        assert!(matches!(
            store.apply_ratings(id).await,
            Err(ClubError::UnknownPlayer(name)) if name == "ghost"
        ));
        assert_eq!(rating(&store, "a").await, 1500.0);
        assert_eq!(rating(&store, "b").await, 1000.0);
        store.ping().await.unwrap();
    }

    #[tokio::test]
    #[ignore]
    async fn apply_commits_truncated_deltas() {
        let Some(store) = scratch().await else { return };
        for (name, rating) in [("a", 1100.0), ("b", 1000.0), ("c", 900.0)] {
            store.create_player(&Player::new(name.into(), rating)).await.unwrap();
        }
        let id = store
            .create_table(&[
                TableEntry::new("a", 10),
                TableEntry::new("b", 20),
                TableEntry::new("c", 30),
            ])
            .await
            .unwrap();
        assert_eq!(store.table(id).await.unwrap().entries().len(), 3);
        let deltas = store.apply_ratings(id).await.unwrap();
        assert_eq!(deltas.len(), 3);
        assert_eq!(rating(&store, "a").await, 950.0);
        assert_eq!(rating(&store, "b").await, 1000.0);
        assert_eq!(rating(&store, "c").await, 1050.0);
        assert!(matches!(
            store.create_player(&Player::new("a".into(), 1.0)).await,
            Err(ClubError::Conflict(_))
        ));
        assert!(matches!(
            store.apply_ratings(id + 1).await,
            Err(ClubError::NotFound(_))
        ));
    }
}
