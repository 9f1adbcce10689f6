use super::*;
use crate::ClubError;
use crate::SESSION_COOKIE;
use actix_web::FromRequest;
use actix_web::HttpRequest;
use actix_web::dev::Payload;
use actix_web::web;
use std::future::Future;
use std::pin::Pin;

/// Extractor for logged-in requests.
/// Reads the session cookie and checks it against the live sessions.
pub struct Auth {
    token: Token,
    username: String,
}

impl Auth {
    pub fn token(&self) -> Token {
        self.token
    }
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl FromRequest for Auth {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;
    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let sessions = req.app_data::<web::Data<Sessions>>().cloned();
        let token = req
            .cookie(SESSION_COOKIE)
            .and_then(|cookie| cookie.value().parse::<Token>().ok());
        Box::pin(async move {
            let sessions = sessions.ok_or_else(|| {
                actix_web::error::ErrorInternalServerError("sessions not configured")
            })?;
            let token = token.ok_or(ClubError::Unauthorized)?;
            let username = sessions
                .lookup(token)
                .await
                .ok_or(ClubError::Unauthorized)?;
            Ok::<_, actix_web::Error>(Auth { token, username })
        })
    }
}
