use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

/// Google sign-in deployment settings. A client id left unset means the
/// corresponding platform is not configured for this deployment.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    pub web_client_id: Option<String>,
    pub android_client_id: Option<String>,
    pub ios_client_id: Option<String>,
    pub jwks_url: String,
    pub jwks_ttl_seconds: u64,
    pub http_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhoneConfig {
    pub code_ttl_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub google: GoogleConfig,
    pub phone: PhoneConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "authd".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "authd-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
            refresh_ttl_minutes: std::env::var("JWT_REFRESH_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 14),
        };
        let google = GoogleConfig {
            web_client_id: std::env::var("GOOGLE_WEB_CLIENT_ID").ok(),
            android_client_id: std::env::var("GOOGLE_ANDROID_CLIENT_ID").ok(),
            ios_client_id: std::env::var("GOOGLE_IOS_CLIENT_ID").ok(),
            jwks_url: std::env::var("GOOGLE_JWKS_URL")
                .unwrap_or_else(|_| "https://www.googleapis.com/oauth2/v3/certs".into()),
            jwks_ttl_seconds: std::env::var("GOOGLE_JWKS_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(3600),
            http_timeout_seconds: std::env::var("GOOGLE_HTTP_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(10),
        };
        let phone = PhoneConfig {
            code_ttl_seconds: std::env::var("PHONE_CODE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(300),
        };
        Ok(Self {
            database_url,
            jwt,
            google,
            phone,
        })
    }
}
