use std::collections::HashMap;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;
use tokio::sync::RwLock;

/// Opaque session token carried in the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token(uuid::Uuid);

impl Token {
    fn fresh() -> Self {
        Self(uuid::Uuid::now_v7())
    }
}

impl FromStr for Token {
    type Err = uuid::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s).map(Self)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Token to username table. No expiry.
#[derive(Debug, Default)]
pub struct Sessions {
    table: RwLock<HashMap<Token, String>>,
}

impl Sessions {
    pub async fn open(&self, username: &str) -> Token {
        let token = Token::fresh();
        self.table.write().await.insert(token, username.to_string());
        token
    }
    pub async fn lookup(&self, token: Token) -> Option<String> {
        self.table.read().await.get(&token).cloned()
    }
    /// Returns whether the token was live.
    pub async fn close(&self, token: Token) -> bool {
        self.table.write().await.remove(&token).is_some()
    }
}
