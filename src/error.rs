/// Failures surfaced by the stores, the rating engine, and the request layer.
#[derive(Debug)]
pub enum ClubError {
    /// A player with this name already exists.
    Conflict(String),
    /// No such table or player.
    NotFound(String),
    /// Missing or unknown session.
    Unauthorized,
    /// Login with the wrong credentials.
    Forbidden,
    /// Malformed or missing form input.
    Validation(String),
    /// A table references a player absent from the player store.
    UnknownPlayer(String),
    #[cfg(feature = "database")]
    Database(tokio_postgres::Error),
}

impl ClubError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }
}

impl std::fmt::Display for ClubError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conflict(name) => write!(f, "player already exists: {}", name),
            Self::NotFound(what) => write!(f, "not found: {}", what),
            Self::Unauthorized => write!(f, "not logged in"),
            Self::Forbidden => write!(f, "invalid credentials"),
            Self::Validation(reason) => write!(f, "invalid input: {}", reason),
            Self::UnknownPlayer(name) => write!(f, "unknown player: {}", name),
            #[cfg(feature = "database")]
            Self::Database(e) => write!(f, "database error: {}", e),
        }
    }
}

impl std::error::Error for ClubError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "database")]
            Self::Database(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(feature = "database")]
impl From<tokio_postgres::Error> for ClubError {
    fn from(e: tokio_postgres::Error) -> Self {
        Self::Database(e)
    }
}

#[cfg(feature = "server")]
mod response {
    use super::*;
    use actix_web::HttpResponse;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    impl ResponseError for ClubError {
        fn status_code(&self) -> StatusCode {
            match self {
                Self::Conflict(_) => StatusCode::CONFLICT,
                Self::NotFound(_) => StatusCode::NOT_FOUND,
                Self::Unauthorized => StatusCode::UNAUTHORIZED,
                Self::Forbidden => StatusCode::FORBIDDEN,
                Self::Validation(_) => StatusCode::BAD_REQUEST,
                Self::UnknownPlayer(_) => StatusCode::UNPROCESSABLE_ENTITY,
                #[cfg(feature = "database")]
                Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
        fn error_response(&self) -> HttpResponse {
            match self.status_code() {
                StatusCode::INTERNAL_SERVER_ERROR => {
                    log::error!("{}", self);
                    HttpResponse::InternalServerError().body("internal server error")
                }
                status => HttpResponse::build(status).body(self.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn messages_name_the_subject() {
        assert_eq!(
            ClubError::Conflict("ana".into()).to_string(),
            "player already exists: ana"
        );
        assert_eq!(
            ClubError::UnknownPlayer("bo".into()).to_string(),
            "unknown player: bo"
        );
    }
    #[cfg(feature = "server")]
    #[test]
    fn status_codes() {
        use actix_web::ResponseError;
        use actix_web::http::StatusCode;
        assert_eq!(ClubError::Conflict("a".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(ClubError::NotFound("t".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ClubError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ClubError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ClubError::validation("n").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ClubError::UnknownPlayer("x".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
