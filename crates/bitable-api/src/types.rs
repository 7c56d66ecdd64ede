//! Data types for Feishu Bitable API responses
//!
//! These structs mirror the Feishu open API responses. Field values inside a
//! record are heterogeneous (text, person objects, numbers), so they are kept
//! as raw `serde_json::Value`s for the caller to interpret.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Response from `POST /open-apis/auth/v3/tenant_access_token/internal`
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub tenant_access_token: Option<String>,
    /// Token lifetime in seconds
    #[serde(default)]
    pub expire: Option<i64>,
}

/// A tenant access token together with its upstream-reported lifetime
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub expire_secs: i64,
}

/// Envelope for record listing responses
#[derive(Debug, Clone, Deserialize)]
pub struct RecordsResponse {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<RecordsData>,
}

/// Payload of a record listing response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordsData {
    #[serde(default)]
    pub items: Option<Vec<BitableRecord>>,
    #[serde(default)]
    pub has_more: Option<bool>,
    #[serde(default)]
    pub page_token: Option<String>,
}

/// A single row of a Bitable table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BitableRecord {
    #[serde(default)]
    pub record_id: Option<String>,
    /// Row creation time, epoch milliseconds
    #[serde(default)]
    pub created_time: Option<i64>,
    #[serde(default)]
    pub fields: HashMap<String, Value>,
}

/// One page of records with its continuation cursor
#[derive(Debug, Clone, Default)]
pub struct RecordsPage {
    pub items: Vec<BitableRecord>,
    pub has_more: bool,
    pub page_token: Option<String>,
}
