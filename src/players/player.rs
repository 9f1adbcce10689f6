use crate::DEFAULT_RATING;
use crate::Rating;

/// A club member. The name doubles as the natural key.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Player {
    name: String,
    rating: Rating,
}

impl Player {
    pub fn new(name: String, rating: Rating) -> Self {
        Self { name, rating }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn rating(&self) -> Rating {
        self.rating
    }
    pub fn rate(&mut self, rating: Rating) {
        self.rating = rating;
    }
}

impl From<String> for Player {
    fn from(name: String) -> Self {
        Self::new(name, DEFAULT_RATING)
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use crate::pg::*;

    impl Schema for Player {
        fn name() -> &'static str {
            PLAYERS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                PLAYERS,
                " (
                    id          BIGSERIAL PRIMARY KEY,
                    name        TEXT UNIQUE NOT NULL,
                    rating      DOUBLE PRECISION NOT NULL DEFAULT 1000.0
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_players_rating ON ",
                PLAYERS,
                " (rating DESC);"
            )
        }
        fn truncates() -> &'static str {
            const_format::concatcp!("TRUNCATE TABLE ", PLAYERS, " RESTART IDENTITY;")
        }
    }
}
