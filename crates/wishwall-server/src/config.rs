use std::env;

use bitable_api::BitableClient;

/// Application configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub app_id: String,
    pub app_secret: String,
    pub base_id: String,
    pub table_id: String,
    pub cache_ttl_secs: u64,
    pub wish_entry_url: Option<String>,
    pub feishu_base_url: String,
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000);

        let app_id = env::var("FEISHU_APP_ID").unwrap_or_default();
        let app_secret = env::var("FEISHU_APP_SECRET").unwrap_or_default();
        let base_id = env::var("FEISHU_BASE_ID").unwrap_or_default();
        let table_id = env::var("FEISHU_TABLE_ID").unwrap_or_default();

        let cache_ttl_secs = env::var("CACHE_TTL_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);

        let wish_entry_url = env::var("WISH_ENTRY_URL").ok().filter(|s| !s.is_empty());

        let feishu_base_url = env::var("FEISHU_BASE_URL")
            .unwrap_or_else(|_| BitableClient::DEFAULT_BASE_URL.to_string());

        Self {
            port,
            app_id,
            app_secret,
            base_id,
            table_id,
            cache_ttl_secs,
            wish_entry_url,
            feishu_base_url,
        }
    }

    /// Whether all required Feishu credentials/identifiers are present.
    /// When false, handlers serve empty results without calling upstream.
    pub fn is_configured(&self) -> bool {
        !self.app_id.is_empty()
            && !self.app_secret.is_empty()
            && !self.base_id.is_empty()
            && !self.table_id.is_empty()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            app_id: String::new(),
            app_secret: String::new(),
            base_id: String::new(),
            table_id: String::new(),
            cache_ttl_secs: 60,
            wish_entry_url: None,
            feishu_base_url: BitableClient::DEFAULT_BASE_URL.to_string(),
        }
    }
}
