//! Sign-up, login and account endpoints.

use api_types::user::{Account, AccountUpdate, InvalidUserReason, Login, SignUp, TokenResponse};
use axum::{
    Extension, Json,
    extract::State,
    http::{StatusCode, Uri},
    response::IntoResponse,
};
use engine::EngineError;

use crate::{AuthError, ServerError, auth::Principal, extract::JsonBody, server::ServerState};

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|value| value.trim().is_empty())
}

fn token_for(state: &ServerState, account: &Account) -> Result<String, ServerError> {
    state
        .jwt
        .issue(account)
        .map_err(|err| ServerError::Internal(format!("failed to sign token: {err}")))
}

/// Register a user and hand back a token for it.
pub async fn sign_up(
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<SignUp>,
) -> Result<(StatusCode, Json<TokenResponse>), ServerError> {
    if is_blank(payload.username.as_deref()) || is_blank(payload.password.as_deref()) {
        return Err(ServerError::Generic(
            "username and password are required".to_string(),
        ));
    }

    let account = state.engine.sign_up(payload).await?;
    let token = token_for(&state, &account)?;
    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

pub async fn login(
    State(state): State<ServerState>,
    uri: Uri,
    JsonBody(payload): JsonBody<Login>,
) -> Result<impl IntoResponse, ServerError> {
    let (Some(username), Some(password)) = (payload.username, payload.password) else {
        return Err(ServerError::Generic(
            "username and password are required".to_string(),
        ));
    };
    if username.trim().is_empty() || password.trim().is_empty() {
        return Err(ServerError::Generic(
            "username and password are required".to_string(),
        ));
    }

    let account = match state.engine.login(&username, &password).await {
        Ok(account) => account,
        Err(EngineError::InvalidCredentials) => {
            return Err(AuthError::new(uri.path(), InvalidUserReason::NoUserFound).into());
        }
        Err(err) => return Err(err.into()),
    };

    let token = token_for(&state, &account)?;
    tracing::debug!(username = %account.username, "user logged in");
    Ok((
        StatusCode::OK,
        [("x-auth-token", token.clone())],
        Json(TokenResponse { token }),
    ))
}

pub async fn account(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
) -> Result<Json<Account>, ServerError> {
    Ok(Json(state.engine.account(principal.uuid).await?))
}

pub async fn update(
    Extension(principal): Extension<Principal>,
    State(state): State<ServerState>,
    uri: Uri,
    JsonBody(payload): JsonBody<AccountUpdate>,
) -> Result<Json<Account>, ServerError> {
    if payload.uuid != principal.uuid {
        return Err(AuthError::new(uri.path(), InvalidUserReason::WrongUser).into());
    }

    Ok(Json(state.engine.update_account(principal.uuid, payload).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_detection() {
        assert!(is_blank(None));
        assert!(is_blank(Some("   ")));
        assert!(!is_blank(Some("link")));
    }
}
