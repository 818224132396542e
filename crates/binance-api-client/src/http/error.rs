/*
[INPUT]:  Error sources (HTTP, API, serialization, auth, WebSocket)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Exchange error codes that mean the key, secret or signature was rejected
const AUTH_ERROR_CODES: [i64; 3] = [-1022, -2014, -2015];

/// Main error type for the Binance client
#[derive(Error, Debug)]
pub enum BinanceApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (code {code}): {message}")]
    Api { code: i64, message: String },

    /// Endpoint needs an API key/secret and none were configured
    #[error("Missing API credentials for authenticated request")]
    MissingCredentials,

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// WebSocket error
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after}s")]
    RateLimit { retry_after: u64 },

    /// Connection timeout
    #[error("Connection timeout after {duration}s")]
    Timeout { duration: u64 },

    /// Blocking client could not start its runtime
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl BinanceApiError {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BinanceApiError::Http(_)
                | BinanceApiError::RateLimit { .. }
                | BinanceApiError::Timeout { .. }
                | BinanceApiError::WebSocket(_)
                | BinanceApiError::InvalidResponse(_)
        )
    }

    /// Get retry delay in seconds (if retryable)
    pub fn retry_delay(&self) -> Option<u64> {
        match self {
            BinanceApiError::RateLimit { retry_after } => Some(*retry_after),
            BinanceApiError::Timeout { .. } => Some(1),
            _ => None,
        }
    }

    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        match self {
            BinanceApiError::MissingCredentials => true,
            BinanceApiError::Api { code, .. } => AUTH_ERROR_CODES.contains(code),
            _ => false,
        }
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        BinanceApiError::Api {
            code: i64::from(status.as_u16()),
            message: message.into(),
        }
    }
}

/// Result type alias for Binance client operations
pub type Result<T> = std::result::Result<T, BinanceApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        let timeout_err = BinanceApiError::Timeout { duration: 30 };
        assert!(timeout_err.is_retryable());
        assert_eq!(timeout_err.retry_delay(), Some(1));

        let rate_err = BinanceApiError::RateLimit { retry_after: 7 };
        assert_eq!(rate_err.retry_delay(), Some(7));

        assert!(!BinanceApiError::MissingCredentials.is_retryable());
    }

    #[test]
    fn test_error_is_auth_error() {
        assert!(BinanceApiError::MissingCredentials.is_auth_error());
        let rejected = BinanceApiError::Api {
            code: -2015,
            message: "Invalid API-key, IP, or permissions for action.".to_string(),
        };
        assert!(rejected.is_auth_error());
        let bad_symbol = BinanceApiError::Api {
            code: -1121,
            message: "Invalid symbol.".to_string(),
        };
        assert!(!bad_symbol.is_auth_error());
    }

    #[test]
    fn test_api_error_creation() {
        let err = BinanceApiError::api_error(StatusCode::BAD_REQUEST, "Invalid symbol");
        match err {
            BinanceApiError::Api { code, message } => {
                assert_eq!(code, 400);
                assert_eq!(message, "Invalid symbol");
            }
            _ => panic!("Expected Api error variant"),
        }
    }
}
