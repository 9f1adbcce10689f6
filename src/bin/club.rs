//! Club Server Binary
//!
//! Serves the rating and table pages, or with `--migrate` / `--reset`
//! prepares the database and exits.
use clap::Parser;
use clubrating::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    clubrating::log();
    clubrating::server::run(Config::parse()).await
}
