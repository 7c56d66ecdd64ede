//! Access layer between the web handlers and the Feishu upstream
//!
//! Owns the cached tenant credential and the response cache, and runs the
//! fetch -> normalize -> filter pipeline on cache misses.

use std::time::Duration as StdDuration;

use bitable_api::BitableClient;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::cache::WishCache;
use crate::config::Config;
use crate::error::Result;
use crate::types::{CacheStats, Wish};
use crate::wish::{filter_recent, normalize_wishes, RECENT_WINDOW_DAYS};

/// Refresh the token this many seconds before its reported expiry
const TOKEN_REFRESH_MARGIN_SECS: i64 = 300;

struct Credential {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Fetches, normalizes, and caches the wish list
pub struct WishStore {
    api: BitableClient,
    app_id: String,
    app_secret: String,
    base_id: String,
    table_id: String,
    token: RwLock<Option<Credential>>,
    cache: WishCache,
    /// Serializes the fetch-on-miss path so concurrent misses hit upstream once
    refresh_lock: Mutex<()>,
}

impl WishStore {
    pub fn new(config: &Config) -> Self {
        Self {
            api: BitableClient::with_base_url(&config.feishu_base_url),
            app_id: config.app_id.clone(),
            app_secret: config.app_secret.clone(),
            base_id: config.base_id.clone(),
            table_id: config.table_id.clone(),
            token: RwLock::new(None),
            cache: WishCache::new(StdDuration::from_secs(config.cache_ttl_secs)),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Get a valid tenant access token, refreshing if missing or near expiry.
    /// The slot is last-writer-wins; every writer fetches the same credential.
    pub async fn access_token(&self) -> Result<String> {
        {
            let slot = self.token.read().await;
            if let Some(credential) = slot.as_ref() {
                if Utc::now() < credential.expires_at {
                    debug!("Using cached token");
                    return Ok(credential.token.clone());
                }
            }
        }

        let fetched = self
            .api
            .tenant_access_token(&self.app_id, &self.app_secret)
            .await?;
        let expires_at =
            Utc::now() + Duration::seconds(fetched.expire_secs - TOKEN_REFRESH_MARGIN_SECS);

        let mut slot = self.token.write().await;
        *slot = Some(Credential {
            token: fetched.token.clone(),
            expires_at,
        });
        info!("Token refreshed and cached");

        Ok(fetched.token)
    }

    /// Run the uncached pipeline: token -> fetch all pages -> normalize -> filter
    pub async fn fetch_live(&self) -> Result<Vec<Wish>> {
        let token = self.access_token().await?;
        let records = self
            .api
            .list_all_records(&token, &self.base_id, &self.table_id)
            .await?;
        info!(count = records.len(), "Fetched records from Feishu");

        Ok(filter_recent(normalize_wishes(records), RECENT_WINDOW_DAYS))
    }

    /// Cached wish list, refetched when the slot is stale or empty
    pub async fn recent_wishes(&self) -> Result<Vec<Wish>> {
        if let Some(wishes) = self.cache.get().await {
            debug!(count = wishes.len(), "Serving cached wishes");
            return Ok(wishes);
        }

        let _guard = self.refresh_lock.lock().await;
        // Another request may have refilled the slot while we waited
        if let Some(wishes) = self.cache.get().await {
            return Ok(wishes);
        }

        let wishes = self.fetch_live().await?;
        self.cache.set(wishes.clone()).await;
        Ok(wishes)
    }

    /// Whether a fresh wish list is currently cached
    pub async fn cached(&self) -> bool {
        self.cache.is_fresh().await
    }

    /// Drop the cached wish list (manual refresh)
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    #[cfg(test)]
    async fn seed_token(&self, token: &str, expires_at: DateTime<Utc>) {
        let mut slot = self.token.write().await;
        *slot = Some(Credential {
            token: token.to_string(),
            expires_at,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(base_url: &str) -> Config {
        Config {
            app_id: "cli_app".to_string(),
            app_secret: "secret".to_string(),
            base_id: "bascn".to_string(),
            table_id: "tbl".to_string(),
            feishu_base_url: base_url.to_string(),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_valid_cached_token_skips_network() {
        // Nothing listens on this address; a network attempt would error
        let store = WishStore::new(&test_config("http://127.0.0.1:1"));
        store
            .seed_token("t-seeded", Utc::now() + Duration::hours(1))
            .await;

        let token = store.access_token().await.unwrap();
        assert_eq!(token, "t-seeded");
    }

    #[tokio::test]
    async fn test_expired_token_triggers_refresh() {
        let store = WishStore::new(&test_config("http://127.0.0.1:1"));
        store
            .seed_token("t-stale", Utc::now() - Duration::seconds(1))
            .await;

        // Refresh is attempted and fails against the dead endpoint
        assert!(store.access_token().await.is_err());
    }

    #[tokio::test]
    async fn test_clear_cache_forces_miss() {
        let store = WishStore::new(&test_config("http://127.0.0.1:1"));
        store.cache.set(vec![Wish {
            content: "cached".to_string(),
            author: String::new(),
            created_at: Utc::now().to_rfc3339(),
        }]).await;

        assert!(store.cached().await);
        store.clear_cache().await;
        assert!(!store.cached().await);
    }

    #[tokio::test]
    async fn test_recent_wishes_serves_cache_without_upstream() {
        let store = WishStore::new(&test_config("http://127.0.0.1:1"));
        let wish = Wish {
            content: "cached".to_string(),
            author: String::new(),
            created_at: Utc::now().to_rfc3339(),
        };
        store.cache.set(vec![wish.clone()]).await;

        let wishes = store.recent_wishes().await.unwrap();
        assert_eq!(wishes, vec![wish]);
    }
}
