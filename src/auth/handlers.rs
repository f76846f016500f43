use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            GoogleSignInRequest, GoogleSignInResponse, LoginRequest, LoginResponse,
            RegisterRequest, RegisterResponse,
        },
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::User,
    },
    error::AuthError,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/google", post(google_sign_in))
}

/// Emails are compared case-insensitively; normalize once at the edge.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AuthError> {
    let email = normalize_email(&payload.email);

    if !is_valid_email(&email) {
        warn!(email = %email, "register with malformed email");
        return Err(AuthError::InvalidEmail);
    }
    if payload.password.len() < 8 {
        warn!("register with too short password");
        return Err(AuthError::PasswordTooShort);
    }

    let hash = hash_password(&payload.password)?;
    let user = User::create(&state.db, &email, &hash).await?.ok_or_else(|| {
        warn!(email = %email, "email already registered");
        AuthError::EmailExists
    })?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: user.id,
            email_verified: user.email_verified,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let email = normalize_email(&payload.email);

    // Unknown email, federated-only account and wrong password all collapse
    // into the same response so callers cannot probe which emails exist.
    let Some(user) = User::find_by_email(&state.db, &email).await? else {
        warn!(email = %email, "login with unknown email");
        return Err(AuthError::InvalidCredentials);
    };
    let Some(hash) = user.password_hash.as_deref() else {
        warn!(user_id = %user.id, "login against federated-only account");
        return Err(AuthError::InvalidCredentials);
    };
    if !verify_password(&payload.password, hash)? {
        warn!(user_id = %user.id, "login with wrong password");
        return Err(AuthError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign_session(user.id)?;
    let refresh_token = keys.sign_refresh(user.id)?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(LoginResponse {
        token,
        refresh_token,
        email_verification_required: !user.email_verified,
    }))
}

#[instrument(skip(state, payload))]
pub async fn google_sign_in(
    State(state): State<AppState>,
    Json(payload): Json<GoogleSignInRequest>,
) -> Result<Json<GoogleSignInResponse>, AuthError> {
    let claims = state
        .google
        .verify(&payload.id_token, payload.platform)
        .await?;
    let email = claims.email.ok_or_else(|| {
        warn!(sub = %claims.sub, "google token without email claim");
        AuthError::InvalidOauthToken
    })?;
    let email = normalize_email(&email);

    let user =
        User::find_or_create_google(&state.db, &claims.sub, &email, claims.email_verified).await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign_session(user.id)?;

    info!(user_id = %user.id, "google sign-in");
    Ok(Json(GoogleSignInResponse {
        token,
        provider: "google".into(),
        user_id: user.id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_normalization_lowercases_and_trims() {
        assert_eq!(normalize_email("  Person@Example.COM "), "person@example.com");
    }

    #[test]
    fn email_validation() {
        assert!(is_valid_email("person@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.org"));
        assert!(!is_valid_email("person"));
        assert!(!is_valid_email("person@"));
        assert!(!is_valid_email("person@example"));
        assert!(!is_valid_email("per son@example.com"));
    }
}
