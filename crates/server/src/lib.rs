use api_types::user::{InvalidUser, InvalidUserReason};
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::IntoResponse,
};
use engine::EngineError;

use serde::Serialize;
pub use auth::{AuthConfig, JwtProvider, Principal};
pub use server::{ServerConfig, ServerState, router, run, run_with_listener, spawn_with_listener};

mod auth;
mod crud;
mod extract;
mod server;
mod user;

pub enum ServerError {
    Engine(EngineError),
    Auth(AuthError),
    Generic(String),
    /// A request the extractors refused, with the status they chose.
    Rejected(StatusCode, String),
    /// Logged; the client only sees `internal server error`.
    Internal(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

/// A 401 carrying the request path and the reason it was refused.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthError {
    pub path: String,
    pub reason: InvalidUserReason,
}

impl AuthError {
    pub fn new(path: impl Into<String>, reason: InvalidUserReason) -> Self {
        Self {
            path: path.into(),
            reason,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        let body = InvalidUser {
            path: self.path,
            status: StatusCode::UNAUTHORIZED.as_u16(),
            reason: self.reason,
        };
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::InvalidField(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        EngineError::Database(_)
        | EngineError::PasswordHash(_)
        | EngineError::Seed(_)
        | EngineError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::PasswordHash(_) | EngineError::Seed(_) | EngineError::Json(_) => {
            tracing::error!("engine failure: {err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Auth(err) => return err.into_response(),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
            ServerError::Rejected(status, err) => (status, err),
            ServerError::Internal(err) => {
                tracing::error!("{err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::Rejected(value.status(), value.body_text())
    }
}

impl From<PathRejection> for ServerError {
    fn from(value: PathRejection) -> Self {
        Self::Rejected(value.status(), value.body_text())
    }
}

impl From<AuthError> for ServerError {
    fn from(value: AuthError) -> Self {
        Self::Auth(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_conflict_maps_to_409() {
        let res = ServerError::from(EngineError::ExistingKey("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn engine_validation_maps_to_422() {
        let res = ServerError::from(EngineError::InvalidField("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn engine_credentials_map_to_401() {
        let res = ServerError::from(EngineError::InvalidCredentials).into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn hashing_failures_are_hidden() {
        assert_eq!(
            message_for_engine_error(EngineError::PasswordHash("salt".to_string())),
            "internal server error"
        );
    }

    #[test]
    fn auth_error_maps_to_401() {
        let res = ServerError::from(AuthError::new("/bills", InvalidUserReason::Expired))
            .into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
