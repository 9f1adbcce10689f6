//! Club Server
//!
//! actix-web routes for players, tables, rating application, and the
//! sign-up list. Every route except `/`, `/login`, and `/health` needs a
//! session cookie.
mod forms;
pub mod handlers;
pub mod pages;

pub use forms::*;

use crate::auth;
use crate::auth::Credentials;
use crate::auth::Sessions;
use crate::config::Config;
use crate::config::Mode;
use crate::signup::Signups;
use crate::store::Memory;
use crate::store::Store;
use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpServer;
use actix_web::middleware::Logger;
use actix_web::web;
use std::sync::Arc;

#[rustfmt::skip]
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/",                         web::get().to(auth::login_page))
        .route("/login",                    web::post().to(auth::login))
        .route("/logout",                   web::post().to(auth::logout))
        .route("/health",                   web::get().to(handlers::health))
        .route("/landing",                  web::get().to(handlers::landing))
        .route("/add_player",               web::get().to(handlers::add_player_form))
        .route("/add_player",               web::post().to(handlers::add_player))
        .route("/sort_players",             web::get().to(handlers::sort_players_form))
        .route("/sort_players",             web::post().to(handlers::sort_players))
        .route("/new_table",                web::get().to(handlers::new_table))
        .route("/new_table_rows",           web::post().to(handlers::new_table_rows))
        .route("/save_table",               web::post().to(handlers::save_table))
        .route("/view_tables",              web::get().to(handlers::view_tables))
        .route("/apply_ratings/{table_id}", web::post().to(handlers::apply_ratings))
        .route("/signup_list",              web::get().to(handlers::signup_list))
        .route("/signup_list",              web::post().to(handlers::signup_join))
        .route("/signup_discard",           web::post().to(handlers::signup_discard));
}

/// Opens the configured store and either serves HTTP or runs a one-shot mode.
pub async fn run(config: Config) -> anyhow::Result<()> {
    match config.mode() {
        Mode::Serve => serve(&config, open(&config).await?).await?,
        Mode::Migrate => open(&config).await?.migrate().await?,
        #[cfg(feature = "database")]
        Mode::Reset => {
            let store = crate::store::Postgres::connect(config.url()?).await?;
            store.migrate().await?;
            store.truncate().await?;
            log::info!("reset complete");
        }
        #[cfg(not(feature = "database"))]
        Mode::Reset => anyhow::bail!("--reset needs the database feature"),
    }
    Ok(())
}

async fn open(config: &Config) -> anyhow::Result<Arc<dyn Store>> {
    match config.memory {
        true => {
            log::warn!("using in-memory store; nothing will be persisted");
            Ok(Arc::new(Memory::new()))
        }
        false => persistent(config).await,
    }
}

#[cfg(feature = "database")]
async fn persistent(config: &Config) -> anyhow::Result<Arc<dyn Store>> {
    let store = crate::store::Postgres::connect(config.url()?).await?;
    store.migrate().await?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "database"))]
async fn persistent(_: &Config) -> anyhow::Result<Arc<dyn Store>> {
    anyhow::bail!("built without the database feature; pass --memory")
}

#[rustfmt::skip]
async fn serve(config: &Config, store: Arc<dyn Store>) -> std::io::Result<()> {
    let store = web::Data::from(store);
    let sessions = web::Data::new(Sessions::default());
    let signups = web::Data::new(Signups::default());
    let credentials = web::Data::new(Credentials::from(config));
    log::info!("starting club server on {}", config.bind);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(store.clone())
            .app_data(sessions.clone())
            .app_data(signups.clone())
            .app_data(credentials.clone())
            .configure(routes)
    })
    .workers(config.workers)
    .bind(config.bind.as_str())?
    .run()
    .await
}

#[cfg(test)]
mod tests;
