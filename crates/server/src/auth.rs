//! Bearer-token authentication.
//!
//! Tokens are HS256 JWTs signed with the configured secret. The guard accepts
//! `Authorization: Bearer <token>`, or `?token=<token>` on `/updates`
//! websocket routes only, and inserts the caller's [`Principal`] into request
//! extensions.

use api_types::user::{Account, InvalidUserReason};
use axum::{
    extract::{Query, Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejection,
};
use engine::EngineError;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AuthError, server::ServerState};

#[derive(Clone, Debug, Deserialize)]
pub struct AuthConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub expires_in_secs: u64,
}

/// The authenticated caller.
#[derive(Clone, Debug, PartialEq)]
pub struct Principal {
    pub uuid: Uuid,
    pub username: String,
}

impl Principal {
    /// Owner key of the caller's bill-man rows.
    pub fn owner(&self) -> String {
        self.uuid.to_string()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    username: String,
    iss: String,
    aud: String,
    iat: i64,
    exp: i64,
}

#[derive(Clone)]
pub struct JwtProvider {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    ttl_secs: i64,
}

impl JwtProvider {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            ttl_secs: i64::try_from(config.expires_in_secs).unwrap_or(i64::MAX),
        }
    }

    pub fn issue(&self, account: &Account) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now().timestamp();
        self.sign(&Claims {
            sub: account.uuid.to_string(),
            username: account.username.clone(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now,
            exp: now.saturating_add(self.ttl_secs),
        })
    }

    pub fn verify(&self, token: &str) -> Result<Principal, InvalidUserReason> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|err| {
            match err.kind() {
                ErrorKind::ExpiredSignature => InvalidUserReason::Expired,
                _ => {
                    tracing::debug!("rejected token: {err}");
                    InvalidUserReason::InvalidJwt
                }
            }
        })?;

        let uuid =
            Uuid::parse_str(&data.claims.sub).map_err(|_| InvalidUserReason::InvalidUserInfo)?;
        Ok(Principal {
            uuid,
            username: data.claims.username,
        })
    }

    fn sign(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
    }
}

/// Browsers cannot set headers on a websocket upgrade.
fn accepts_query_token(path: &str) -> bool {
    path.ends_with("/updates")
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TokenQuery {
    token: Option<String>,
}

pub(crate) async fn auth(
    State(state): State<ServerState>,
    bearer: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    Query(query): Query<TokenQuery>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let path = request.uri().path().to_string();

    let token = match (&bearer, query.token.as_deref()) {
        (Ok(TypedHeader(header)), _) => header.token().to_string(),
        (Err(_), Some(token)) if !token.is_empty() && accepts_query_token(&path) => {
            token.to_string()
        }
        _ => return Err(AuthError::new(path, InvalidUserReason::General)),
    };

    let principal = state
        .jwt
        .verify(&token)
        .map_err(|reason| AuthError::new(path.as_str(), reason))?;

    match state.engine.account(principal.uuid).await {
        Ok(_) => {}
        Err(EngineError::KeyNotFound(_)) => {
            return Err(AuthError::new(path, InvalidUserReason::NoUserFound));
        }
        Err(err) => {
            tracing::error!("failed to load token user: {err}");
            return Err(AuthError::new(path, InvalidUserReason::General));
        }
    }

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> JwtProvider {
        JwtProvider::new(&AuthConfig {
            secret: "test-secret".to_string(),
            issuer: "almanac".to_string(),
            audience: "almanac-users".to_string(),
            expires_in_secs: 3600,
        })
    }

    fn account() -> Account {
        Account {
            id: 1,
            uuid: Uuid::new_v4(),
            username: "link".to_string(),
            name: None,
            email: None,
            photo_url: None,
            date_created: 0,
            date_updated: 0,
        }
    }

    #[test]
    fn query_tokens_only_on_update_feeds() {
        assert!(accepts_query_token("/images/updates"));
        assert!(!accepts_query_token("/images"));
        assert!(!accepts_query_token("/user/account"));
    }

    #[test]
    fn issued_tokens_verify() {
        let jwt = provider();
        let account = account();
        let token = jwt.issue(&account).unwrap();

        let principal = jwt.verify(&token).unwrap();
        assert_eq!(principal.uuid, account.uuid);
        assert_eq!(principal.username, "link");
    }

    #[test]
    fn expired_tokens_are_reported_as_expired() {
        let jwt = provider();
        let now = chrono::Utc::now().timestamp();
        let token = jwt
            .sign(&Claims {
                sub: Uuid::new_v4().to_string(),
                username: "link".to_string(),
                iss: "almanac".to_string(),
                aud: "almanac-users".to_string(),
                iat: now - 7200,
                exp: now - 3600,
            })
            .unwrap();

        assert_eq!(jwt.verify(&token), Err(InvalidUserReason::Expired));
    }

    #[test]
    fn foreign_signatures_and_audiences_are_rejected() {
        let account = account();
        let other = JwtProvider::new(&AuthConfig {
            secret: "other-secret".to_string(),
            issuer: "almanac".to_string(),
            audience: "almanac-users".to_string(),
            expires_in_secs: 3600,
        });
        let token = other.issue(&account).unwrap();
        assert_eq!(provider().verify(&token), Err(InvalidUserReason::InvalidJwt));

        let elsewhere = JwtProvider::new(&AuthConfig {
            secret: "test-secret".to_string(),
            issuer: "almanac".to_string(),
            audience: "someone-else".to_string(),
            expires_in_secs: 3600,
        });
        let token = elsewhere.issue(&account).unwrap();
        assert_eq!(provider().verify(&token), Err(InvalidUserReason::InvalidJwt));
        assert_eq!(provider().verify("not.a.jwt"), Err(InvalidUserReason::InvalidJwt));
    }

    #[test]
    fn subject_must_be_a_uuid() {
        let jwt = provider();
        let now = chrono::Utc::now().timestamp();
        let token = jwt
            .sign(&Claims {
                sub: "link".to_string(),
                username: "link".to_string(),
                iss: "almanac".to_string(),
                aud: "almanac-users".to_string(),
                iat: now,
                exp: now + 60,
            })
            .unwrap();

        assert_eq!(jwt.verify(&token), Err(InvalidUserReason::InvalidUserInfo));
    }
}
