//! Single-slot TTL cache for the filtered wish list
//!
//! The whole wish list is one cache slot shared by every request handler.
//! A stored empty list counts as a miss so handlers keep retrying upstream.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::types::{CacheStats, Wish};

struct CacheEntry {
    wishes: Vec<Wish>,
    stored_at: Instant,
}

/// Whole-list cache with TTL expiry
pub struct WishCache {
    ttl: Duration,
    slot: RwLock<Option<CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl WishCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Return the cached list, or `None` if never set, expired, or empty
    pub async fn get(&self) -> Option<Vec<Wish>> {
        {
            let slot = self.slot.read().await;
            if let Some(entry) = slot.as_ref() {
                if entry.stored_at.elapsed() <= self.ttl && !entry.wishes.is_empty() {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Some(entry.wishes.clone());
                }
            }
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Whether a fresh, non-empty list is currently stored.
    /// Unlike [`Self::get`] this does not touch the hit/miss counters.
    pub async fn is_fresh(&self) -> bool {
        let slot = self.slot.read().await;
        slot.as_ref()
            .map(|entry| entry.stored_at.elapsed() <= self.ttl && !entry.wishes.is_empty())
            .unwrap_or(false)
    }

    /// Overwrite the slot with a new list
    pub async fn set(&self, wishes: Vec<Wish>) {
        let mut slot = self.slot.write().await;
        *slot = Some(CacheEntry {
            wishes,
            stored_at: Instant::now(),
        });
    }

    /// Reset to the never-set state
    pub async fn clear(&self) {
        let mut slot = self.slot.write().await;
        *slot = None;
    }

    pub async fn stats(&self) -> CacheStats {
        let entries = if self.slot.read().await.is_some() { 1 } else { 0 };
        CacheStats {
            entries,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wish(content: &str) -> Wish {
        Wish {
            content: content.to_string(),
            author: "tester".to_string(),
            created_at: "2026-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_before_set_is_none() {
        let cache = WishCache::new(Duration::from_secs(60));
        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn test_set_then_get_within_ttl() {
        let cache = WishCache::new(Duration::from_secs(60));
        cache.set(vec![wish("a"), wish("b")]).await;

        let cached = cache.get().await.unwrap();
        assert_eq!(cached.len(), 2);
        assert_eq!(cached[0].content, "a");
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_after_ttl_is_none() {
        let cache = WishCache::new(Duration::from_secs(60));
        cache.set(vec![wish("a")]).await;

        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(cache.get().await.is_none());
        assert!(!cache.is_fresh().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_just_inside_ttl_is_some() {
        let cache = WishCache::new(Duration::from_secs(60));
        cache.set(vec![wish("a")]).await;

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(cache.get().await.is_some());
    }

    #[tokio::test]
    async fn test_clear_resets_slot() {
        let cache = WishCache::new(Duration::from_secs(60));
        cache.set(vec![wish("a")]).await;
        cache.clear().await;

        assert!(cache.get().await.is_none());
        assert_eq!(cache.stats().await.entries, 0);
    }

    #[tokio::test]
    async fn test_empty_list_counts_as_miss() {
        let cache = WishCache::new(Duration::from_secs(60));
        cache.set(vec![]).await;

        assert!(cache.get().await.is_none());
        assert!(!cache.is_fresh().await);
        // The slot itself is occupied even though it reads as a miss
        assert_eq!(cache.stats().await.entries, 1);
    }

    #[tokio::test]
    async fn test_stats_count_hits_and_misses() {
        let cache = WishCache::new(Duration::from_secs(60));
        cache.get().await;
        cache.set(vec![wish("a")]).await;
        cache.get().await;
        cache.get().await;

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
    }
}
