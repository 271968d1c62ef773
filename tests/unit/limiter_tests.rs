/*!
 * Tests for the rate limiter state machine.
 *
 * All timing tests run with the tokio clock paused, so sleeps advance
 * virtual time deterministically instead of wall time.
 */

use std::time::Duration;
use tokio::time::Instant;

use lingway::errors::GatewayError;
use lingway::gateway::limiter::{
    MAX_BACKOFF_MS, MAX_REQUEST_DELAY_MS, MIN_REQUEST_DELAY_MS, RateLimiter,
};

#[tokio::test(start_paused = true)]
async fn test_admit_withFreshLimiter_shouldNotDelay() {
    let mut limiter = RateLimiter::new();
    let before = Instant::now();
    limiter.admit().await.unwrap();
    assert_eq!(Instant::now().duration_since(before), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_admit_withRecentRequest_shouldDelayWithinBaseWindow() {
    let mut limiter = RateLimiter::new();
    limiter.admit().await.unwrap();

    let before = Instant::now();
    limiter.admit().await.unwrap();
    let waited = Instant::now().duration_since(before);

    assert!(waited >= Duration::from_millis(MIN_REQUEST_DELAY_MS));
    assert!(waited <= Duration::from_millis(MAX_REQUEST_DELAY_MS));
}

#[tokio::test(start_paused = true)]
async fn test_admit_withConsecutiveErrors_shouldEscalateDelay() {
    let mut limiter = RateLimiter::new();
    limiter.admit().await.unwrap();

    limiter.record_failure(false);
    limiter.record_failure(false);
    limiter.record_failure(false);

    // 2^3 multiplier pushes the minimum base to 8 s, capped at 10 s
    let before = Instant::now();
    limiter.admit().await.unwrap();
    let waited = Instant::now().duration_since(before);

    assert!(waited >= Duration::from_millis(8 * MIN_REQUEST_DELAY_MS));
    assert!(waited <= Duration::from_millis(MAX_BACKOFF_MS));
}

#[tokio::test(start_paused = true)]
async fn test_admit_afterRecordSuccess_shouldReturnToBaseline() {
    let mut limiter = RateLimiter::new();
    limiter.admit().await.unwrap();

    limiter.record_failure(false);
    limiter.record_failure(false);
    limiter.record_success();
    assert_eq!(limiter.consecutive_errors(), 0);

    let before = Instant::now();
    limiter.admit().await.unwrap();
    let waited = Instant::now().duration_since(before);

    assert!(waited <= Duration::from_millis(MAX_REQUEST_DELAY_MS));
}

#[tokio::test(start_paused = true)]
async fn test_admit_withActiveCooldown_shouldRejectWithRemainingSeconds() {
    let mut limiter = RateLimiter::new();
    limiter.record_failure(true);
    assert!(limiter.in_cooldown());

    match limiter.admit().await {
        Err(GatewayError::CooldownActive { remaining_secs }) => {
            assert_eq!(remaining_secs, 60);
        }
        other => panic!("expected CooldownActive, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_admit_withElapsedCooldownTime_shouldReportReducedRemaining() {
    let mut limiter = RateLimiter::new();
    limiter.record_failure(true);

    tokio::time::advance(Duration::from_secs(10)).await;

    match limiter.admit().await {
        Err(GatewayError::CooldownActive { remaining_secs }) => {
            assert_eq!(remaining_secs, 50);
        }
        other => panic!("expected CooldownActive, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_admit_afterCooldownExpiry_shouldAdmitNormally() {
    let mut limiter = RateLimiter::new();
    limiter.record_failure(true);

    tokio::time::advance(Duration::from_secs(61)).await;

    assert!(limiter.admit().await.is_ok());
    assert!(!limiter.in_cooldown());
}

#[tokio::test(start_paused = true)]
async fn test_recordFailure_withoutRateLimitSignal_shouldNotOpenCooldown() {
    let mut limiter = RateLimiter::new();
    limiter.record_failure(false);
    assert!(!limiter.in_cooldown());
    assert_eq!(limiter.consecutive_errors(), 1);
    assert!(limiter.admit().await.is_ok());
}
