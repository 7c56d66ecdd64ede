//! Error types for the wishwall service

use std::fmt;

#[derive(Debug)]
pub enum WishwallError {
    /// Upstream Bitable API error
    Bitable(bitable_api::BitableError),
    /// Configuration error
    Config(String),
}

impl fmt::Display for WishwallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bitable(e) => write!(f, "{}", e),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for WishwallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Bitable(e) => Some(e),
            Self::Config(_) => None,
        }
    }
}

impl From<bitable_api::BitableError> for WishwallError {
    fn from(e: bitable_api::BitableError) -> Self {
        Self::Bitable(e)
    }
}

impl From<tracing_subscriber::filter::ParseError> for WishwallError {
    fn from(e: tracing_subscriber::filter::ParseError) -> Self {
        Self::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WishwallError>;
