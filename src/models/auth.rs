use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct User {
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Error payload sent by the backend on non-2xx responses
#[derive(Clone, PartialEq, Deserialize, Debug, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Extract the backend message from a raw response body, if any
    pub fn message_from(body: &str) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        parsed
            .error
            .or(parsed.message)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_prefers_error_field() {
        assert_eq!(
            ErrorBody::message_from(r#"{"error":"Invalid credentials","message":"x"}"#),
            Some("Invalid credentials".to_string())
        );
        assert_eq!(
            ErrorBody::message_from(r#"{"message":"Email already registered"}"#),
            Some("Email already registered".to_string())
        );
    }

    #[test]
    fn error_body_ignores_blank_or_non_json() {
        assert_eq!(ErrorBody::message_from(r#"{"error":"  "}"#), None);
        assert_eq!(ErrorBody::message_from("<html>502</html>"), None);
    }

    #[test]
    fn login_response_tolerates_missing_name() {
        let resp: LoginResponse = serde_json::from_str(r#"{"token":"t1","user":{}}"#).unwrap();
        assert_eq!(resp.token, "t1");
        assert_eq!(resp.user.name, "");
    }
}
