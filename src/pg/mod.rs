//! PostgreSQL connectivity and table metadata.
//!
//! - [`db()`]: Establishes a database connection from a URL
//! - [`Schema`]: Table metadata and DDL generation
//!
//! Table name constants live here so every statement agrees on them.
mod schema;

pub use schema::*;

use tokio_postgres::Client;

/// Establishes a database connection.
///
/// Spawns the connection driver onto the current tokio runtime and
/// returns the client half. Callers decide how to share it.
pub async fn db(url: &str) -> Result<Client, PgErr> {
    log::info!("connecting to database");
    let tls = tokio_postgres::tls::NoTls;
    let (client, connection) = tokio_postgres::connect(url, tls).await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            log::error!("database connection closed: {}", e);
        }
    });
    client
        .execute("SET client_min_messages TO WARNING", &[])
        .await?;
    Ok(client)
}

/// PostgreSQL error type alias.
pub type PgErr = tokio_postgres::Error;

/// Table for club players.
#[rustfmt::skip]
pub const PLAYERS: &str = "players";
/// Table for saved score tables.
#[rustfmt::skip]
pub const TABLES:  &str = "tables";
