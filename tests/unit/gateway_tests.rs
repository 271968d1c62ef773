/*!
 * Tests for the gateway dispatcher
 */

use lingway::errors::GatewayError;
use lingway::providers::mock::MockProvider;

use crate::common::gateway_with;

#[tokio::test(start_paused = true)]
async fn test_translate_withEmptyText_shouldFailBeforeQueueAndCache() {
    let provider = MockProvider::working("Primary");
    let tracker = provider.tracker();
    let gateway = gateway_with(vec![Box::new(provider)]);

    let result = gateway.translate("   ", "auto", "en").await;
    assert!(matches!(result, Err(GatewayError::EmptyInput)));

    assert_eq!(tracker.lock().calls, 0);
    // The cache was never even consulted
    let (hits, misses, _) = gateway.cache().stats();
    assert_eq!((hits, misses), (0, 0));
}

#[tokio::test(start_paused = true)]
async fn test_translate_withWorkingProvider_shouldReturnSuccessResult() {
    let gateway = gateway_with(vec![Box::new(MockProvider::working("Primary"))]);

    let result = gateway.translate("hello", "auto", "ru").await.unwrap();
    assert!(result.success);
    assert_eq!(result.service, "Primary");
    assert!(result.text.contains("hello"));
    assert!(result.error.is_none());
    assert_eq!(gateway.cache().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_translate_withRepeatedText_shouldServeFromCacheWithoutNetwork() {
    let provider = MockProvider::working("Primary");
    let tracker = provider.tracker();
    let gateway = gateway_with(vec![Box::new(provider)]);

    let first = gateway.translate("hello", "auto", "ru").await.unwrap();
    let second = gateway.translate("hello", "auto", "ru").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(tracker.lock().calls, 1);
}

#[tokio::test(start_paused = true)]
async fn test_translate_withUntrimmedText_shouldShareCacheEntryWithTrimmed() {
    let provider = MockProvider::working("Primary");
    let tracker = provider.tracker();
    let gateway = gateway_with(vec![Box::new(provider)]);

    gateway.translate("hello", "auto", "ru").await.unwrap();
    gateway.translate("  hello  ", "auto", "ru").await.unwrap();

    assert_eq!(tracker.lock().calls, 1);
}

#[tokio::test(start_paused = true)]
async fn test_translate_withAllProvidersFailing_shouldResolveFailureResult() {
    let gateway = gateway_with(vec![Box::new(MockProvider::failing("Primary"))]);

    let result = gateway.translate("hello", "auto", "ru").await.unwrap();
    assert!(!result.success);
    assert!(result.text.is_empty());
    let message = result.error.unwrap();
    assert!(message.contains("All translation providers failed"));
    assert!(message.contains("Simulated provider failure"));
}

#[tokio::test(start_paused = true)]
async fn test_translate_withFailure_shouldNotPopulateCache() {
    let gateway = gateway_with(vec![Box::new(MockProvider::failing("Primary"))]);

    let result = gateway.translate("hello", "auto", "ru").await.unwrap();
    assert!(!result.success);
    assert_eq!(gateway.cache().len(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_translate_afterRateLimit_shouldReportCooldownWithElapsedTime() {
    let provider = MockProvider::rate_limited("Primary");
    let tracker = provider.tracker();
    let gateway = gateway_with(vec![Box::new(provider)]);

    // First request reaches the provider and trips the cooldown
    let first = gateway.translate("one", "auto", "ru").await.unwrap();
    assert!(!first.success);
    assert!(first.error.unwrap().contains("Rate limit exceeded"));
    assert_eq!(tracker.lock().calls, 1);

    tokio::time::advance(std::time::Duration::from_secs(10)).await;

    // Ten seconds in, admission is still refused and the message reflects
    // the time already elapsed
    let second = gateway.translate("two", "auto", "ru").await.unwrap();
    assert!(!second.success);
    let message = second.error.unwrap();
    assert!(message.contains("cooldown"), "unexpected message: {}", message);
    assert!(message.contains("50 seconds"), "unexpected message: {}", message);
    assert_eq!(tracker.lock().calls, 1);

    tokio::time::advance(std::time::Duration::from_secs(51)).await;

    // Cooldown has expired; the provider is consulted again
    let third = gateway.translate("three", "auto", "ru").await.unwrap();
    assert!(!third.success);
    assert_eq!(tracker.lock().calls, 2);
}
