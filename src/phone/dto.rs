use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for starting phone verification.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartVerificationRequest {
    pub phone_number: String,
}

/// Response returned when a verification challenge was issued.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartVerificationResponse {
    pub verification_id: Uuid,
    pub ttl_seconds: i64,
}

/// Request body for confirming a verification code.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmVerificationRequest {
    pub verification_id: Uuid,
    pub code: String,
}

/// Response returned after a successful confirmation.
#[derive(Debug, Serialize)]
pub struct ConfirmVerificationResponse {
    pub verified: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_response_uses_wire_field_names() {
        let response = StartVerificationResponse {
            verification_id: Uuid::new_v4(),
            ttl_seconds: 300,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"verificationId\""));
        assert!(json.contains("\"ttlSeconds\":300"));
    }

    #[test]
    fn start_request_reads_camel_case() {
        let request: StartVerificationRequest =
            serde_json::from_str(r#"{"phoneNumber":"+15555550123"}"#).unwrap();
        assert_eq!(request.phone_number, "+15555550123");
    }

    #[test]
    fn confirm_request_reads_camel_case() {
        let id = Uuid::new_v4();
        let request: ConfirmVerificationRequest = serde_json::from_str(&format!(
            r#"{{"verificationId":"{id}","code":"123456"}}"#
        ))
        .unwrap();
        assert_eq!(request.verification_id, id);
        assert_eq!(request.code, "123456");
    }
}
