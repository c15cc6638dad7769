// ============================================================================
// ERRORS - Error taxonomy shared by services and view models
// ============================================================================

use thiserror::Error;

/// Errors surfaced to the UI
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Client-side validation failure. Never reaches the network layer.
    #[error("{0}")]
    Validation(String),

    /// Login or registration rejected by the backend
    #[error("{0}")]
    Auth(String),

    /// Any other non-2xx or network failure on a PR operation
    #[error("{message}")]
    Request { status: Option<u16>, message: String },

    /// Bearer token absent or rejected (401/403)
    #[error("Your session has expired. Please log in again.")]
    Unauthorized,

    /// CSV export failure (logged, not blocking)
    #[error("Export failed: {0}")]
    Export(String),
}

impl AppError {
    pub fn network(err: impl std::fmt::Display) -> Self {
        AppError::Request {
            status: None,
            message: format!("Network error: {}", err),
        }
    }

    pub fn parse(err: impl std::fmt::Display) -> Self {
        AppError::Request {
            status: None,
            message: format!("Unexpected response from server: {}", err),
        }
    }

    /// True when the error should drop the session and return to Login
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_inner_message() {
        assert_eq!(AppError::Validation("Fill it in".into()).to_string(), "Fill it in");
        let err = AppError::Request { status: Some(500), message: "Failed to fetch Purchase Requests.".into() };
        assert_eq!(err.to_string(), "Failed to fetch Purchase Requests.");
    }

    #[test]
    fn only_unauthorized_forces_logout() {
        assert!(AppError::Unauthorized.is_unauthorized());
        assert!(!AppError::network("offline").is_unauthorized());
        assert!(!AppError::Auth("Invalid credentials".into()).is_unauthorized());
    }
}
