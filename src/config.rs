//! Command-line and environment configuration.
use crate::auth::Credentials;

/// What the binary does after start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Serve HTTP until interrupted.
    Serve,
    /// Create the schema and exit.
    Migrate,
    /// Empty every table and exit.
    Reset,
}

#[derive(Debug, Clone, clap::Parser)]
#[command(name = "club", about = "Player ratings and scoring tables for a small club")]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:8080")]
    pub bind: String,
    /// PostgreSQL connection URL.
    #[arg(long, env = "DB_URL", hide_env_values = true)]
    pub database: Option<String>,
    /// Login username.
    #[arg(long, env = "CLUB_USERNAME", default_value = "mbctennis")]
    pub username: String,
    /// Login password.
    #[arg(long, env = "CLUB_PASSWORD", default_value = "mbctennis", hide_env_values = true, hide_default_value = true)]
    pub password: String,
    /// HTTP worker threads.
    #[arg(long, env = "HTTP_WORKERS", default_value_t = 4)]
    pub workers: usize,
    /// Keep everything in memory instead of PostgreSQL.
    #[arg(long)]
    pub memory: bool,
    /// Create the schema and exit.
    #[arg(long, conflicts_with_all = ["memory", "reset"])]
    pub migrate: bool,
    /// Truncate players and tables, then exit.
    #[arg(long, conflicts_with = "memory")]
    pub reset: bool,
}

impl Config {
    pub fn mode(&self) -> Mode {
        match (self.migrate, self.reset) {
            (true, _) => Mode::Migrate,
            (_, true) => Mode::Reset,
            _ => Mode::Serve,
        }
    }
    pub fn url(&self) -> anyhow::Result<&str> {
        self.database
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("DB_URL must be set unless --memory is given"))
    }
}

impl From<&Config> for Credentials {
    fn from(config: &Config) -> Self {
        Credentials::new(config.username.clone(), config.password.clone())
    }
}
