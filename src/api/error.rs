//! API Error Types
//!
//! Errors raised by backend clients. Controllers never propagate these to the
//! page; they log them and degrade the affected UI element instead.

use thiserror::Error;

/// Errors that can occur when talking to the CityCare backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, CORS)
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not the JSON shape we expected
    #[error("Parse error: {0}")]
    Decode(String),

    /// The request could not be built (bad URL, unserializable body)
    #[error("Request build error: {0}")]
    Build(String),
}

impl ApiError {
    /// True when the backend rejected the credentials
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Status { status: 401 | 403, .. })
    }
}

/// Result type for backend calls
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::Status {
            status: 401,
            message: "Invalid Doctor PIN.".to_string(),
        };
        assert_eq!(err.to_string(), "API error 401: Invalid Doctor PIN.");

        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn test_auth_failure_detection() {
        let unauthorized = ApiError::Status {
            status: 401,
            message: String::new(),
        };
        assert!(unauthorized.is_auth_failure());
        assert!(!ApiError::Network("refused".to_string()).is_auth_failure());
        assert!(!ApiError::Status {
            status: 500,
            message: String::new()
        }
        .is_auth_failure());
    }
}
