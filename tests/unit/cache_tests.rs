/*!
 * Tests for the bounded translation cache
 */

use lingway::gateway::cache::{TranslationCache, cache_key};
use lingway::gateway::service::TranslationResult;

fn result(text: &str) -> TranslationResult {
    TranslationResult::translated(text.to_string(), "Mock".to_string(), None)
}

#[test]
fn test_cache_get_withStoredKey_shouldReturnResult() {
    let cache = TranslationCache::new(10);
    cache.store("en_fr_hello", result("bonjour"));

    let cached = cache.get("en_fr_hello").unwrap();
    assert_eq!(cached.text, "bonjour");
    assert!(cached.success);
}

#[test]
fn test_cache_get_withMissingKey_shouldReturnNone() {
    let cache = TranslationCache::new(10);
    assert!(cache.get("en_fr_nonexistent").is_none());
}

#[test]
fn test_cache_store_atCapacity_shouldEvictOldestKey() {
    let cache = TranslationCache::new(3);
    cache.store("k1", result("one"));
    cache.store("k2", result("two"));
    cache.store("k3", result("three"));
    assert_eq!(cache.len(), 3);

    cache.store("k4", result("four"));
    assert_eq!(cache.len(), 3);
    assert!(cache.get("k1").is_none());
    assert!(cache.get("k2").is_some());
    assert!(cache.get("k3").is_some());
    assert!(cache.get("k4").is_some());
}

#[test]
fn test_cache_store_sequentialInserts_shouldEvictInInsertionOrder() {
    let cache = TranslationCache::new(2);
    cache.store("k1", result("one"));
    cache.store("k2", result("two"));
    cache.store("k3", result("three"));
    assert!(cache.get("k1").is_none());

    cache.store("k4", result("four"));
    assert!(cache.get("k2").is_none());
    assert!(cache.get("k3").is_some());
    assert!(cache.get("k4").is_some());
}

#[test]
fn test_cache_store_withExistingKey_shouldUpdateWithoutEviction() {
    let cache = TranslationCache::new(3);
    cache.store("k1", result("one"));
    cache.store("k2", result("two"));
    cache.store("k3", result("three"));

    cache.store("k1", result("uno"));
    assert_eq!(cache.len(), 3);
    assert_eq!(cache.get("k1").unwrap().text, "uno");

    // k1 keeps its original insertion position, so it is still evicted first
    cache.store("k4", result("four"));
    assert!(cache.get("k1").is_none());
    assert!(cache.get("k2").is_some());
}

#[test]
fn test_cache_clone_shouldShareStorage() {
    let cache1 = TranslationCache::new(10);
    let cache2 = cache1.clone();

    cache1.store("en_fr_hello", result("bonjour"));
    assert_eq!(cache2.get("en_fr_hello").unwrap().text, "bonjour");
}

#[test]
fn test_cache_stats_shouldCountHitsAndMisses() {
    let cache = TranslationCache::new(10);
    cache.store("k1", result("one"));

    cache.get("k1");
    cache.get("k1");
    cache.get("missing");

    let (hits, misses, hit_rate) = cache.stats();
    assert_eq!(hits, 2);
    assert_eq!(misses, 1);
    assert!((hit_rate - 2.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_cache_clear_shouldRemoveEntriesAndCounters() {
    let cache = TranslationCache::new(10);
    cache.store("k1", result("one"));
    cache.get("k1");

    cache.clear();
    assert!(cache.is_empty());
    let (hits, misses, _) = cache.stats();
    assert_eq!(hits, 0);
    assert_eq!(misses, 0);
}

#[test]
fn test_cacheKey_withTextsSharingLongPrefix_shouldCollide() {
    let prefix = "x".repeat(100);
    let key_a = cache_key(&format!("{}AAA", prefix), "en", "fr");
    let key_b = cache_key(&format!("{}BBB", prefix), "en", "fr");
    assert_eq!(key_a, key_b);
}

#[test]
fn test_cacheKey_withDifferentLanguages_shouldDiffer() {
    assert_ne!(cache_key("hello", "en", "fr"), cache_key("hello", "en", "es"));
    assert_ne!(cache_key("hello", "auto", "fr"), cache_key("hello", "en", "fr"));
}
