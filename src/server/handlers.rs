use super::*;
use crate::ClubError;
use crate::DEFAULT_RATING;
use crate::TableId;
use crate::auth::Auth;
use crate::players::Player;
use crate::signup::Signups;
use crate::store::Store;
use crate::tables::Sheet;
use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web::web;
use std::collections::HashSet;

/// Largest table the forms accept.
pub const MAX_ROWS: usize = 64;

fn redirect(to: &'static str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, to))
        .finish()
}

fn rows(fields: &Fields) -> Result<usize, ClubError> {
    match fields.parsed::<usize>("n")? {
        n if n > MAX_ROWS => Err(ClubError::validation(format!(
            "at most {} rows per table",
            MAX_ROWS
        ))),
        n => Ok(n),
    }
}

pub async fn health(store: web::Data<dyn Store>) -> HttpResponse {
    match store
        .ping()
        .await
        .inspect_err(|e| log::error!("health check failed: {}", e))
    {
        Ok(_) => HttpResponse::Ok().body("ok"),
        Err(_) => HttpResponse::ServiceUnavailable().body("store unavailable"),
    }
}

pub async fn landing(auth: Auth) -> HttpResponse {
    pages::html(pages::landing(auth.username()))
}

pub async fn add_player_form(_: Auth) -> HttpResponse {
    pages::html(pages::add_player())
}

pub async fn add_player(
    _: Auth,
    store: web::Data<dyn Store>,
    body: web::Bytes,
) -> Result<HttpResponse, ClubError> {
    let fields = Fields::parse(&body)?;
    let name = fields.one("name")?.trim();
    if name.is_empty() {
        return Err(ClubError::validation("player name is empty"));
    }
    let rating = match fields.optional("rating").map(str::trim) {
        None | Some("") => DEFAULT_RATING,
        Some(_) => fields.parsed::<f64>("rating")?,
    };
    if !rating.is_finite() {
        return Err(ClubError::validation("rating must be a finite number"));
    }
    store
        .create_player(&Player::new(name.to_string(), rating))
        .await?;
    log::debug!("added player {} at {}", name, rating);
    Ok(redirect("/landing"))
}

pub async fn sort_players_form(
    _: Auth,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, ClubError> {
    Ok(pages::html(pages::select_players(&store.players().await?)))
}

pub async fn sort_players(
    _: Auth,
    store: web::Data<dyn Store>,
    body: web::Bytes,
) -> Result<HttpResponse, ClubError> {
    let selected = Fields::parse(&body)?.all("selected");
    Ok(pages::html(pages::ranking(&store.ranked(&selected).await?)))
}

pub async fn new_table(_: Auth) -> HttpResponse {
    pages::html(pages::row_count())
}

pub async fn new_table_rows(
    _: Auth,
    store: web::Data<dyn Store>,
    body: web::Bytes,
) -> Result<HttpResponse, ClubError> {
    let n = rows(&Fields::parse(&body)?)?;
    Ok(pages::html(pages::table_form(n, &store.players().await?)))
}

pub async fn save_table(
    _: Auth,
    store: web::Data<dyn Store>,
    body: web::Bytes,
) -> Result<HttpResponse, ClubError> {
    let fields = Fields::parse(&body)?;
    let sheet = Sheet::new(rows(&fields)?, fields.all("player"), fields.rounds());
    let entries = sheet.entries()?;
    let known = store
        .players()
        .await?
        .into_iter()
        .map(|p| p.name().to_string())
        .collect::<HashSet<_>>();
    if let Some(entry) = entries.iter().find(|e| !known.contains(&e.player)) {
        return Err(ClubError::validation(format!(
            "unknown player: {}",
            entry.player
        )));
    }
    let id = store.create_table(&entries).await?;
    log::debug!("saved table {} with {} rows", id, entries.len());
    Ok(redirect("/landing"))
}

pub async fn view_tables(
    _: Auth,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, ClubError> {
    Ok(pages::html(pages::tables(&store.tables().await?)))
}

pub async fn apply_ratings(
    _: Auth,
    store: web::Data<dyn Store>,
    path: web::Path<TableId>,
) -> Result<HttpResponse, ClubError> {
    let id = path.into_inner();
    let deltas = store
        .apply_ratings(id)
        .await
        .inspect_err(|e| log::warn!("table {} not applied: {}", id, e))?;
    for (name, delta) in deltas.iter() {
        log::info!("table {}: {} {:+.3}", id, name, delta);
    }
    Ok(HttpResponse::Ok().json(serde_json::json!({ "updated": deltas })))
}

async fn signup_page(store: &dyn Store, signups: &Signups) -> Result<HttpResponse, ClubError> {
    let mut players = store.players().await?;
    let queue = signups.ranked(&players).await;
    players.sort_by(|a, b| a.name().cmp(b.name()));
    Ok(pages::html(pages::signup(&players, &queue)))
}

pub async fn signup_list(
    _: Auth,
    store: web::Data<dyn Store>,
    signups: web::Data<Signups>,
) -> Result<HttpResponse, ClubError> {
    signup_page(store.get_ref(), &signups).await
}

pub async fn signup_join(
    _: Auth,
    store: web::Data<dyn Store>,
    signups: web::Data<Signups>,
    body: web::Bytes,
) -> Result<HttpResponse, ClubError> {
    let fields = Fields::parse(&body)?;
    let name = fields.one("name")?;
    if store.player(name).await?.is_some() && signups.join(name).await {
        log::debug!("{} signed up", name);
    }
    signup_page(store.get_ref(), &signups).await
}

pub async fn signup_discard(_: Auth, signups: web::Data<Signups>) -> HttpResponse {
    signups.clear().await;
    redirect("/signup_list")
}
