/*!
 * Translation result caching.
 *
 * A bounded mapping from a normalized request key to a previously computed
 * result. Entries are evicted strictly by insertion order once the cache is
 * full; nothing ever expires by time, so stale results can persist for the
 * process lifetime. That trade-off is deliberate: the cache exists to avoid
 * redundant network calls, not to be fresh.
 */

use log::debug;
use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use crate::gateway::service::TranslationResult;

/// Default maximum number of cached results
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// Number of leading characters of the trimmed text used in the cache key
pub const CACHE_KEY_PREFIX_CHARS: usize = 100;

/// Compute the cache key for a request.
///
/// Only the first 100 characters of the trimmed text participate, so texts
/// differing solely beyond that prefix share a key. This bounds key size
/// and must be preserved as-is: changing it changes observable caching
/// behavior.
pub fn cache_key(text: &str, source_lang: &str, target_lang: &str) -> String {
    let prefix: String = text.trim().chars().take(CACHE_KEY_PREFIX_CHARS).collect();
    format!("{}_{}_{}", source_lang, target_lang, prefix)
}

/// Bounded storage with insertion-order tracking
struct CacheStore {
    entries: HashMap<String, TranslationResult>,
    /// Keys in insertion order; the front is always the oldest surviving key
    order: VecDeque<String>,
    capacity: usize,
}

/// Translation cache shared between the gateway fast path and the drain loop
pub struct TranslationCache {
    store: Arc<RwLock<CacheStore>>,
    hits: Arc<RwLock<usize>>,
    misses: Arc<RwLock<usize>>,
}

impl TranslationCache {
    /// Create a cache holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore {
                entries: HashMap::new(),
                order: VecDeque::new(),
                capacity: capacity.max(1),
            })),
            hits: Arc::new(RwLock::new(0)),
            misses: Arc::new(RwLock::new(0)),
        }
    }

    /// Look up a cached result
    pub fn get(&self, key: &str) -> Option<TranslationResult> {
        let store = self.store.read();
        match store.entries.get(key) {
            Some(result) => {
                *self.hits.write() += 1;
                debug!("cache hit for '{}'", truncate_text(key, 40));
                Some(result.clone())
            }
            None => {
                *self.misses.write() += 1;
                debug!("cache miss for '{}'", truncate_text(key, 40));
                None
            }
        }
    }

    /// Store a result, evicting the oldest surviving entry when full.
    ///
    /// Re-inserting an existing key updates the value in place and keeps
    /// its original position in the eviction order.
    pub fn store(&self, key: &str, result: TranslationResult) {
        let mut store = self.store.write();

        if store.entries.contains_key(key) {
            store.entries.insert(key.to_string(), result);
            return;
        }

        if store.entries.len() >= store.capacity {
            if let Some(oldest) = store.order.pop_front() {
                debug!("cache full, evicting oldest entry '{}'", truncate_text(&oldest, 40));
                store.entries.remove(&oldest);
            }
        }

        store.order.push_back(key.to_string());
        store.entries.insert(key.to_string(), result);
    }

    /// Get cache statistics as (hits, misses, hit rate)
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = *self.hits.read();
        let misses = *self.misses.read();
        let total = hits + misses;

        let hit_rate = if total > 0 { hits as f64 / total as f64 } else { 0.0 };

        (hits, misses, hit_rate)
    }

    /// Clear the cache and its counters
    pub fn clear(&self) {
        let mut store = self.store.write();
        store.entries.clear();
        store.order.clear();

        *self.hits.write() = 0;
        *self.misses.write() = 0;

        debug!("translation cache cleared");
    }

    /// Get the number of entries in the cache
    pub fn len(&self) -> usize {
        self.store.read().entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.store.read().entries.is_empty()
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl Clone for TranslationCache {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            hits: self.hits.clone(),
            misses: self.misses.clone(),
        }
    }
}

/// Truncate text to a maximum length with ellipsis
fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    }
}
