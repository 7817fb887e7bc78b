use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, SignupRequest},
        jwt::{AuthUser, JwtKeys},
        password::{hash_password, verify_password},
        repo::User,
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn validate_signup(payload: &SignupRequest) -> Result<(), ApiError> {
    if payload.username.len() < 3 || payload.username.len() > 50 {
        return Err(ApiError::Validation(
            "username must be between 3 and 50 characters".into(),
        ));
    }
    if !is_valid_email(&payload.email) {
        return Err(ApiError::Validation("invalid email".into()));
    }
    if payload.password.len() < 6 {
        return Err(ApiError::Validation(
            "password must be at least 6 characters".into(),
        ));
    }
    Ok(())
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(mut payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    payload.username = payload.username.trim().to_string();
    payload.email = payload.email.trim().to_lowercase();
    validate_signup(&payload)?;

    if User::find_by_username(&state.db, &payload.username)
        .await?
        .is_some()
    {
        warn!(username = %payload.username, "signup duplicate username");
        return Err(ApiError::Conflict("username already exists".into()));
    }
    if User::find_by_email(&state.db, &payload.email)
        .await?
        .is_some()
    {
        warn!(email = %payload.email, "signup duplicate email");
        return Err(ApiError::Conflict("email already exists".into()));
    }

    let hash = hash_password(&payload.password)?;
    let user = User::create(
        &state.db,
        &payload.username,
        &payload.email,
        &hash,
        payload.full_name.as_deref(),
    )
    .await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(&user.username, user.id)?;

    info!(user_id = user.id, username = %user.username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::from_user(Some(token), &user)),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let username = payload.username.trim();

    let user = match User::find_by_username(&state.db, username).await? {
        Some(u) => u,
        None => {
            warn!(username = %username, "login unknown username");
            return Err(ApiError::Unauthenticated(
                "invalid username or password".into(),
            ));
        }
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = user.id, "login invalid password");
        return Err(ApiError::Unauthenticated(
            "invalid username or password".into(),
        ));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(&user.username, user.id)?;

    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok(Json(AuthResponse::from_user(Some(token), &user)))
}

#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<AuthResponse>, ApiError> {
    let user = User::find_by_id(&state.db, user.id)
        .await?
        .ok_or_else(|| ApiError::Unauthenticated("user not found".into()))?;
    Ok(Json(AuthResponse::from_user(None, &user)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(username: &str, email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            full_name: None,
        }
    }

    #[test]
    fn accepts_a_well_formed_signup() {
        assert!(validate_signup(&payload("chef_sarah", "sarah@example.com", "password123")).is_ok());
    }

    #[test]
    fn rejects_short_or_long_usernames() {
        let err = validate_signup(&payload("ab", "a@b.com", "password123")).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        let long = "x".repeat(51);
        assert!(validate_signup(&payload(&long, "a@b.com", "password123")).is_err());
    }

    #[test]
    fn rejects_bad_emails() {
        assert!(validate_signup(&payload("chef_sarah", "not-an-email", "password123")).is_err());
        assert!(validate_signup(&payload("chef_sarah", "a b@c.com", "password123")).is_err());
    }

    #[test]
    fn rejects_short_passwords() {
        let err = validate_signup(&payload("chef_sarah", "a@b.com", "12345")).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn email_regex_basics() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("user.name@sub.example.co"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("@example.com"));
    }
}
