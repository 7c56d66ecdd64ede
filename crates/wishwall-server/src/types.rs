//! Data types for the wishwall service

use serde::{Deserialize, Serialize};

/// A normalized wish record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wish {
    pub content: String,
    pub author: String,
    /// RFC 3339 timestamp with timezone (UTC)
    pub created_at: String,
}

/// Statistics about the response cache
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
    pub hits: u64,
    pub misses: u64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub env_ok: bool,
    pub cached: bool,
    pub wish_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_error: Option<bool>,
    pub uptime_secs: u64,
    pub cache: CacheStats,
}

/// Response for the manual cache-clear endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wish_serialization() {
        let wish = Wish {
            content: "world peace".to_string(),
            author: "Alice".to_string(),
            created_at: "2026-01-01T10:00:00+00:00".to_string(),
        };

        let json = serde_json::to_string(&wish).unwrap();
        assert!(json.contains("world peace"));
        assert!(json.contains("created_at"));

        let back: Wish = serde_json::from_str(&json).unwrap();
        assert_eq!(back, wish);
    }

    #[test]
    fn test_health_response_omits_fetch_error_when_absent() {
        let response = HealthResponse {
            env_ok: true,
            cached: false,
            wish_count: 3,
            fetch_error: None,
            uptime_secs: 42,
            cache: CacheStats::default(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("fetch_error"));
        assert!(json.contains("\"wish_count\":3"));
    }

    #[test]
    fn test_health_response_reports_fetch_error() {
        let response = HealthResponse {
            env_ok: true,
            cached: false,
            wish_count: 0,
            fetch_error: Some(true),
            uptime_secs: 0,
            cache: CacheStats::default(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"fetch_error\":true"));
    }
}
