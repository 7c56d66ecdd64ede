//! Error types for the Bitable API client

use std::fmt;

/// Errors that can occur when interacting with the Feishu Bitable API
#[derive(Debug)]
pub enum BitableError {
    /// HTTP transport failure (network error, timeout, non-2xx status)
    Http(reqwest::Error),
    /// Credentials or access token rejected by the upstream
    Auth { code: i64, msg: String },
    /// Other application-level error code in an otherwise successful response
    Api { code: i64, msg: String },
}

impl fmt::Display for BitableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "Bitable HTTP error: {}", e),
            Self::Auth { code, msg } => write!(f, "Bitable auth error {}: {}", code, msg),
            Self::Api { code, msg } => write!(f, "Bitable API error {}: {}", code, msg),
        }
    }
}

impl std::error::Error for BitableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for BitableError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

/// Result type for Bitable API operations
pub type Result<T> = std::result::Result<T, BitableError>;
