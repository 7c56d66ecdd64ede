//! Feishu Bitable API HTTP client

use crate::error::{BitableError, Result};
use crate::types::*;
use reqwest::StatusCode;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

/// Upstream body codes that mean the access token was rejected
const INVALID_TOKEN_CODES: [i64; 2] = [99991663, 99991668];

/// Default token lifetime when the upstream omits `expire`
const DEFAULT_EXPIRE_SECS: i64 = 7200;

/// Client for the Feishu Bitable open API
///
/// Exposes the tenant access token endpoint and record listing with cursor
/// pagination. Holds no token state; callers pass a token to record methods.
pub struct BitableClient {
    http: reqwest::Client,
    base_url: String,
}

impl BitableClient {
    /// Default base URL for the Feishu open platform
    pub const DEFAULT_BASE_URL: &'static str = "https://open.feishu.cn";
    /// Records requested per page
    pub const PAGE_SIZE: u32 = 100;
    /// Hard cap on pagination, in case the upstream never reports the end
    pub const MAX_PAGES: u32 = 1000;

    const REQUEST_TIMEOUT_SECS: u64 = 10;

    /// Create a new client with default settings (10 second timeout)
    pub fn new() -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL)
    }

    /// Create a new client against a custom base URL
    pub fn with_base_url(base_url: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(Self::REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Exchange app credentials for a tenant access token
    ///
    /// # Arguments
    /// * `app_id` - Feishu application id
    /// * `app_secret` - Feishu application secret
    pub async fn tenant_access_token(&self, app_id: &str, app_secret: &str) -> Result<AccessToken> {
        let url = format!(
            "{}/open-apis/auth/v3/tenant_access_token/internal",
            self.base_url
        );

        let response = self
            .http
            .post(&url)
            .json(&json!({ "app_id": app_id, "app_secret": app_secret }))
            .send()
            .await?
            .error_for_status()?;

        let data: TokenResponse = response.json().await?;

        if data.code != 0 {
            return Err(BitableError::Auth {
                code: data.code,
                msg: data.msg.unwrap_or_default(),
            });
        }

        Ok(AccessToken {
            token: data.tenant_access_token.unwrap_or_default(),
            expire_secs: data.expire.unwrap_or(DEFAULT_EXPIRE_SECS),
        })
    }

    /// Fetch a single page of records from a table
    ///
    /// # Arguments
    /// * `token` - Tenant access token
    /// * `app_token` - Bitable base identifier
    /// * `table_id` - Table identifier within the base
    /// * `page_token` - Continuation cursor from the previous page, if any
    pub async fn list_records(
        &self,
        token: &str,
        app_token: &str,
        table_id: &str,
        page_token: Option<&str>,
    ) -> Result<RecordsPage> {
        let mut url = format!(
            "{}/open-apis/bitable/v1/apps/{}/tables/{}/records?page_size={}",
            self.base_url,
            app_token,
            table_id,
            Self::PAGE_SIZE
        );
        if let Some(cursor) = page_token {
            url.push_str(&format!("&page_token={}", urlencoding::encode(cursor)));
        }

        let response = self.http.get(&url).bearer_auth(token).send().await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(BitableError::Auth {
                code: i64::from(status.as_u16()),
                msg: format!("token rejected with status {}", status),
            });
        }
        let response = response.error_for_status()?;

        let data: RecordsResponse = response.json().await?;
        if data.code != 0 {
            let msg = data.msg.unwrap_or_default();
            if INVALID_TOKEN_CODES.contains(&data.code) {
                return Err(BitableError::Auth {
                    code: data.code,
                    msg,
                });
            }
            return Err(BitableError::Api {
                code: data.code,
                msg,
            });
        }

        let page = data.data.unwrap_or_default();
        Ok(RecordsPage {
            items: page.items.unwrap_or_default(),
            has_more: page.has_more.unwrap_or(false),
            page_token: page.page_token,
        })
    }

    /// Fetch every record of a table, following pagination cursors
    ///
    /// Accumulates pages in upstream order and stops when the upstream reports
    /// no more pages or returns no cursor. Pagination is capped at
    /// [`Self::MAX_PAGES`]; on hitting the cap the records collected so far
    /// are returned.
    ///
    /// A token rejected mid-pagination surfaces as [`BitableError::Auth`];
    /// no automatic refresh is attempted here.
    pub async fn list_all_records(
        &self,
        token: &str,
        app_token: &str,
        table_id: &str,
    ) -> Result<Vec<BitableRecord>> {
        let mut items = Vec::new();
        let mut page_token: Option<String> = None;

        for _ in 0..Self::MAX_PAGES {
            let page = self
                .list_records(token, app_token, table_id, page_token.as_deref())
                .await?;
            items.extend(page.items);

            if !page.has_more || page.page_token.is_none() {
                debug!(count = items.len(), "Fetched all records");
                return Ok(items);
            }
            page_token = page.page_token;
        }

        warn!(
            pages = Self::MAX_PAGES,
            count = items.len(),
            "Stopped paginating at the page cap"
        );
        Ok(items)
    }
}

impl Default for BitableClient {
    fn default() -> Self {
        Self::new()
    }
}
