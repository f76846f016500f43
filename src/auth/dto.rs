use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after registration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub email_verified: bool,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub refresh_token: String,
    pub email_verification_required: bool,
}

/// Client platform requesting Google sign-in; selects which client id the
/// token audience is checked against.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Web,
    Android,
    Ios,
}

/// Request body for Google sign-in.
#[derive(Debug, Deserialize)]
pub struct GoogleSignInRequest {
    pub id_token: String,
    #[serde(default)]
    pub platform: Option<Platform>,
}

/// Response returned after federated sign-in.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleSignInResponse {
    pub token: String,
    pub provider: String,
    pub user_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_response_uses_wire_field_names() {
        let response = RegisterResponse {
            user_id: Uuid::new_v4(),
            email_verified: false,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"userId\""));
        assert!(json.contains("\"emailVerified\":false"));
    }

    #[test]
    fn login_response_uses_wire_field_names() {
        let response = LoginResponse {
            token: "t".into(),
            refresh_token: "r".into(),
            email_verification_required: true,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"token\""));
        assert!(json.contains("\"refreshToken\""));
        assert!(json.contains("\"emailVerificationRequired\":true"));
    }

    #[test]
    fn google_request_accepts_optional_platform() {
        let with_platform: GoogleSignInRequest =
            serde_json::from_str(r#"{"id_token":"abc","platform":"web"}"#).unwrap();
        assert_eq!(with_platform.platform, Some(Platform::Web));

        let without_platform: GoogleSignInRequest =
            serde_json::from_str(r#"{"id_token":"abc"}"#).unwrap();
        assert!(without_platform.platform.is_none());
    }
}
