use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument, warn};

use crate::{
    error::AuthError,
    phone::{
        code::{generate_code, hash_code},
        dto::{
            ConfirmVerificationRequest, ConfirmVerificationResponse, StartVerificationRequest,
            StartVerificationResponse,
        },
        number::is_valid_e164,
        repo::{ConsumeOutcome, VerificationChallenge},
    },
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/phone/verify", post(start_verification))
        .route("/auth/phone/confirm", post(confirm_verification))
}

#[instrument(skip(state, payload))]
pub async fn start_verification(
    State(state): State<AppState>,
    Json(payload): Json<StartVerificationRequest>,
) -> Result<Json<StartVerificationResponse>, AuthError> {
    let number = payload.phone_number.trim();
    if !is_valid_e164(number) {
        warn!(phone_number = %payload.phone_number, "invalid phone number");
        return Err(AuthError::InvalidPhoneNumber);
    }

    let ttl_seconds = state.config.phone.code_ttl_seconds;
    let code = generate_code();
    let challenge =
        VerificationChallenge::create(&state.db, number, &hash_code(&code), ttl_seconds).await?;
    state.sms.send_code(number, &code).await?;

    info!(verification_id = %challenge.id, "phone verification started");
    Ok(Json(StartVerificationResponse {
        verification_id: challenge.id,
        ttl_seconds,
    }))
}

#[instrument(skip(state, payload))]
pub async fn confirm_verification(
    State(state): State<AppState>,
    Json(payload): Json<ConfirmVerificationRequest>,
) -> Result<Json<ConfirmVerificationResponse>, AuthError> {
    let outcome =
        VerificationChallenge::consume(&state.db, payload.verification_id, &hash_code(&payload.code))
            .await?;

    match outcome {
        ConsumeOutcome::Confirmed => {
            info!(verification_id = %payload.verification_id, "phone verification confirmed");
            Ok(Json(ConfirmVerificationResponse { verified: true }))
        }
        ConsumeOutcome::NotFound => {
            warn!(verification_id = %payload.verification_id, "verification not found");
            Err(AuthError::ChallengeNotFound)
        }
        ConsumeOutcome::Expired => {
            warn!(verification_id = %payload.verification_id, "verification expired");
            Err(AuthError::ChallengeExpired)
        }
        ConsumeOutcome::CodeMismatch => {
            warn!(verification_id = %payload.verification_id, "verification code mismatch");
            Err(AuthError::CodeMismatch)
        }
    }
}
