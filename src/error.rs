use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Service error taxonomy. Every variant maps to exactly one HTTP status and
/// one stable machine-readable `error` code so callers can branch on the code.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email is not valid")]
    InvalidEmail,
    #[error("password too short")]
    PasswordTooShort,
    #[error("email already registered")]
    EmailExists,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("oauth token rejected")]
    InvalidOauthToken,
    #[error("google sign-in not configured for this platform")]
    GoogleNotConfigured,
    #[error("phone number is not a valid E.164 number")]
    InvalidPhoneNumber,
    #[error("verification challenge not found")]
    ChallengeNotFound,
    #[error("verification challenge expired")]
    ChallengeExpired,
    #[error("verification code mismatch")]
    CodeMismatch,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "invalid_email",
            Self::PasswordTooShort => "password_too_short",
            Self::EmailExists => "email_already_exists",
            Self::InvalidCredentials => "invalid_credentials",
            Self::InvalidOauthToken => "invalid_oauth_token",
            Self::GoogleNotConfigured => "google_signin_not_configured",
            Self::InvalidPhoneNumber => "invalid_phone_number",
            Self::ChallengeNotFound => "verification_not_found",
            Self::ChallengeExpired => "verification_expired",
            Self::CodeMismatch => "verification_code_mismatch",
            Self::Internal(_) => "internal_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidEmail
            | Self::PasswordTooShort
            | Self::GoogleNotConfigured
            | Self::InvalidPhoneNumber
            | Self::ChallengeExpired
            | Self::CodeMismatch => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::InvalidOauthToken => StatusCode::UNAUTHORIZED,
            Self::EmailExists => StatusCode::CONFLICT,
            Self::ChallengeNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // Internal failures stay in the logs; the wire only carries the
        // generic code.
        if let Self::Internal(e) = &self {
            error!(error = %e, "internal error");
        }
        (self.status(), Json(json!({ "error": self.code() }))).into_response()
    }
}
