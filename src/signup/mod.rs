//! Transient sign-up queue.
//!
//! Holds player names only; ratings are looked up again whenever the queue
//! is shown, so it always ranks by current ratings. Lives for the process
//! lifetime and is cleared on demand.
use crate::players::Player;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct Signups {
    queue: RwLock<Vec<String>>,
}

impl Signups {
    /// Appends a name unless it is already queued. Returns whether it was added.
    pub async fn join(&self, name: &str) -> bool {
        let mut queue = self.queue.write().await;
        match queue.iter().any(|n| n == name) {
            true => false,
            false => {
                queue.push(name.to_string());
                true
            }
        }
    }
    pub async fn clear(&self) {
        self.queue.write().await.clear();
    }
    /// Queued players resolved against `players`, highest rating first.
    /// Ties keep sign-up order.
    pub async fn ranked(&self, players: &[Player]) -> Vec<Player> {
        let mut ranked = self
            .queue
            .read()
            .await
            .iter()
            .filter_map(|name| players.iter().find(|p| p.name() == name))
            .cloned()
            .collect::<Vec<_>>();
        ranked.sort_by(|a, b| b.rating().total_cmp(&a.rating()));
        ranked
    }
}
