use sqlx::{FromRow, PgPool};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

/// One-time phone verification challenge.
#[derive(Debug, Clone, FromRow)]
pub struct VerificationChallenge {
    pub id: Uuid,
    pub phone_number: String,
    pub code_hash: String,
    pub expires_at: OffsetDateTime,
    pub consumed_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
}

/// Result of a confirmation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumeOutcome {
    Confirmed,
    NotFound,
    Expired,
    CodeMismatch,
}

impl VerificationChallenge {
    pub async fn create(
        db: &PgPool,
        phone_number: &str,
        code_hash: &str,
        ttl_seconds: i64,
    ) -> anyhow::Result<VerificationChallenge> {
        let expires_at = OffsetDateTime::now_utc() + Duration::seconds(ttl_seconds);
        let challenge = sqlx::query_as::<_, VerificationChallenge>(
            r#"
            INSERT INTO phone_challenges (phone_number, code_hash, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, phone_number, code_hash, expires_at, consumed_at, created_at
            "#,
        )
        .bind(phone_number)
        .bind(code_hash)
        .bind(expires_at)
        .fetch_one(db)
        .await?;
        Ok(challenge)
    }

    /// Consume the challenge. The conditional update is a single statement,
    /// so at most one concurrent confirmation can win; a wrong code leaves
    /// the challenge intact.
    pub async fn consume(
        db: &PgPool,
        id: Uuid,
        code_hash: &str,
    ) -> anyhow::Result<ConsumeOutcome> {
        let consumed = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE phone_challenges
            SET consumed_at = now()
            WHERE id = $1 AND code_hash = $2 AND consumed_at IS NULL AND expires_at > now()
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(code_hash)
        .fetch_optional(db)
        .await?;
        if consumed.is_some() {
            return Ok(ConsumeOutcome::Confirmed);
        }

        // The update did not match; work out which failure to report. An
        // already-consumed challenge is indistinguishable from a missing one.
        let challenge = sqlx::query_as::<_, VerificationChallenge>(
            r#"
            SELECT id, phone_number, code_hash, expires_at, consumed_at, created_at
            FROM phone_challenges
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(match challenge {
            None => ConsumeOutcome::NotFound,
            Some(c) if c.consumed_at.is_some() => ConsumeOutcome::NotFound,
            Some(c) if c.expires_at <= OffsetDateTime::now_utc() => ConsumeOutcome::Expired,
            Some(_) => ConsumeOutcome::CodeMismatch,
        })
    }
}
