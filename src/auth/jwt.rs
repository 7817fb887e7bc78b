use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, warn};

use crate::{config::JwtConfig, error::ApiError, state::AppState};

/// Signed token payload: identity plus validity window, nothing else.
/// Tokens are stateless; expiry is the only invalidation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // username
    pub uid: i64,    // numeric user id
    pub iat: usize,  // issued at (unix timestamp)
    pub exp: usize,  // expires at (unix timestamp)
}

/// Token that does not parse, carries a bad signature, or is past its
/// expiry. Callers surface this as an authentication failure.
#[derive(Debug, thiserror::Error)]
#[error("malformed or rejected token")]
pub struct MalformedToken(#[from] jsonwebtoken::errors::Error);

impl From<MalformedToken> for ApiError {
    fn from(_: MalformedToken) -> Self {
        ApiError::Unauthenticated("invalid or expired token".into())
    }
}

/// Signing and verification keys derived from the process-wide secret.
/// Built once per use from config; the secret itself is never logged.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: TimeDuration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        JwtKeys::new(&state.config.jwt)
    }
}

impl JwtKeys {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl: TimeDuration::minutes(config.ttl_minutes),
        }
    }

    /// Sign a token for the given identity, valid from now.
    pub fn sign(&self, username: &str, user_id: i64) -> anyhow::Result<String> {
        self.sign_at(username, user_id, OffsetDateTime::now_utc())
    }

    /// Sign with an explicit issue instant. The instant is a parameter so
    /// expiry behavior can be exercised without waiting out a TTL.
    pub fn sign_at(
        &self,
        username: &str,
        user_id: i64,
        now: OffsetDateTime,
    ) -> anyhow::Result<String> {
        let exp = now + self.ttl;
        let claims = Claims {
            sub: username.to_owned(),
            uid: user_id,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id, username, "token signed");
        Ok(token)
    }

    /// Parse the token, check its signature and expiry, and return the
    /// embedded claims. Fails on the first stage that rejects.
    pub fn claims(&self, token: &str) -> Result<Claims, MalformedToken> {
        let mut validation = Validation::default();
        validation.validate_aud = false; // tokens carry no aud claim
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }

    /// True only when the token is intact, unexpired, and bound to
    /// `expected_username`.
    pub fn verify(&self, token: &str, expected_username: &str) -> bool {
        self.claims(token)
            .map(|c| c.sub == expected_username)
            .unwrap_or(false)
    }

    pub fn extract_username(&self, token: &str) -> Result<String, MalformedToken> {
        Ok(self.claims(token)?.sub)
    }

    pub fn extract_user_id(&self, token: &str) -> Result<i64, MalformedToken> {
        Ok(self.claims(token)?.uid)
    }
}

pub(crate) fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

/// Verified identity extracted from the Authorization header. Using the
/// extractor in a handler signature is what enforces the authenticate-first
/// ordering on protected endpoints.
#[derive(Debug)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthenticated("missing Authorization header".into()))?;

        let token = bearer_token(header)
            .ok_or_else(|| ApiError::Unauthenticated("invalid Authorization header".into()))?;

        let claims = keys.claims(token).map_err(|e| {
            warn!("invalid or expired token");
            ApiError::from(e)
        })?;

        Ok(AuthUser {
            id: claims.uid,
            username: claims.sub,
        })
    }
}
