use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub google_sub: Option<String>,
    pub email_verified: bool,
    pub created_at: OffsetDateTime,
}

impl User {
    /// Find a user by normalized email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, google_sub, email_verified, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, google_sub, email_verified, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new password user. The uniqueness check and the insert are a
    /// single statement, so two racing registrations with the same email get
    /// exactly one row: the loser sees `None`.
    pub async fn create(
        db: &PgPool,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, email, password_hash, google_sub, email_verified, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Find the user bound to a Google subject, creating one on first
    /// sign-in. An existing password account with the same email is linked to
    /// the subject in the same statement.
    pub async fn find_or_create_google(
        db: &PgPool,
        sub: &str,
        email: &str,
        email_verified: bool,
    ) -> anyhow::Result<User> {
        let existing = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, google_sub, email_verified, created_at
            FROM users
            WHERE google_sub = $1
            "#,
        )
        .bind(sub)
        .fetch_optional(db)
        .await?;
        if let Some(user) = existing {
            return Ok(user);
        }

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, google_sub, email_verified)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO UPDATE
            SET google_sub = COALESCE(users.google_sub, EXCLUDED.google_sub)
            RETURNING id, email, password_hash, google_sub, email_verified, created_at
            "#,
        )
        .bind(email)
        .bind(sub)
        .bind(email_verified)
        .fetch_one(db)
        .await?;

        if user.google_sub.as_deref() != Some(sub) {
            anyhow::bail!("email already bound to a different google subject");
        }
        Ok(user)
    }

    /// Flip `email_verified`; only a verification flow outside this core may
    /// call it.
    pub async fn set_email_verified(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET email_verified = true
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(db)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Database-backed tests; run with a reachable postgres via
    // `cargo test -- --include-ignored`.

    #[sqlx::test]
    #[ignore = "needs postgres"]
    async fn duplicate_email_yields_exactly_one_row(pool: PgPool) {
        let first = User::create(&pool, "person@example.com", "hash-a")
            .await
            .unwrap();
        assert!(first.is_some());

        let second = User::create(&pool, "person@example.com", "hash-b")
            .await
            .unwrap();
        assert!(second.is_none());

        let user = User::find_by_email(&pool, "person@example.com")
            .await
            .unwrap()
            .expect("user exists");
        assert_eq!(user.password_hash.as_deref(), Some("hash-a"));
        assert!(!user.email_verified);
    }

    #[sqlx::test]
    #[ignore = "needs postgres"]
    async fn set_email_verified_flips_the_flag(pool: PgPool) {
        let user = User::create(&pool, "person@example.com", "hash")
            .await
            .unwrap()
            .expect("created");
        User::set_email_verified(&pool, user.id).await.unwrap();

        let reloaded = User::find_by_id(&pool, user.id)
            .await
            .unwrap()
            .expect("user exists");
        assert!(reloaded.email_verified);
    }

    #[sqlx::test]
    #[ignore = "needs postgres"]
    async fn google_sign_in_creates_then_reuses_the_user(pool: PgPool) {
        let created =
            User::find_or_create_google(&pool, "sub-123", "person@example.com", true)
                .await
                .unwrap();
        assert_eq!(created.google_sub.as_deref(), Some("sub-123"));
        assert!(created.password_hash.is_none());

        let again = User::find_or_create_google(&pool, "sub-123", "person@example.com", true)
            .await
            .unwrap();
        assert_eq!(again.id, created.id);
    }

    #[sqlx::test]
    #[ignore = "needs postgres"]
    async fn google_sign_in_links_an_existing_password_account(pool: PgPool) {
        let registered = User::create(&pool, "person@example.com", "hash")
            .await
            .unwrap()
            .expect("created");

        let linked = User::find_or_create_google(&pool, "sub-123", "person@example.com", true)
            .await
            .unwrap();
        assert_eq!(linked.id, registered.id);
        assert_eq!(linked.google_sub.as_deref(), Some("sub-123"));
        assert_eq!(linked.password_hash.as_deref(), Some("hash"));
    }

    #[test]
    fn password_hash_is_not_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            email: "someone@example.com".into(),
            password_hash: Some("$argon2id$v=19$secret".into()),
            google_sub: None,
            email_verified: false,
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(json.contains("someone@example.com"));
    }
}
