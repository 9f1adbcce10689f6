use super::*;
use crate::ClubError;
use crate::SESSION_COOKIE;
use crate::server::Fields;
use crate::server::pages;
use actix_web::HttpResponse;
use actix_web::cookie::Cookie;
use actix_web::http::header;
use actix_web::web;

pub async fn login_page() -> HttpResponse {
    pages::html(pages::login())
}

pub async fn login(
    credentials: web::Data<Credentials>,
    sessions: web::Data<Sessions>,
    body: web::Bytes,
) -> Result<HttpResponse, ClubError> {
    let fields = Fields::parse(&body)?;
    let username = fields.one("username")?;
    let password = fields.one("password")?;
    if !credentials.check(username, password) {
        log::warn!("rejected login for {:?}", username);
        return Err(ClubError::Forbidden);
    }
    let token = sessions.open(username).await;
    log::info!("{} logged in", username);
    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/landing"))
        .cookie(
            Cookie::build(SESSION_COOKIE, token.to_string())
                .path("/")
                .http_only(true)
                .finish(),
        )
        .finish())
}

pub async fn logout(sessions: web::Data<Sessions>, auth: Auth) -> HttpResponse {
    sessions.close(auth.token()).await;
    log::info!("{} logged out", auth.username());
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .cookie(cookie)
        .finish()
}
