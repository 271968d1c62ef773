/*!
 * Rate limiter for outbound provider calls.
 *
 * A single process-wide instance (owned by the provider chain, which is in
 * turn owned by the queue's drain task) tracks the last request time, the
 * consecutive-error count, and an active cooldown deadline. Every provider
 * call must pass `admit()` first, which enforces a jittered inter-request
 * delay with exponential backoff and refuses admission outright while a
 * rate-limit cooldown is active.
 */

use log::{debug, warn};
use rand::Rng;
use tokio::time::{Duration, Instant, sleep};

use crate::errors::GatewayError;

/// Lower bound of the jittered base delay between requests
pub const MIN_REQUEST_DELAY_MS: u64 = 1000;
/// Upper bound of the jittered base delay between requests
pub const MAX_REQUEST_DELAY_MS: u64 = 3000;
/// Backoff ceiling once consecutive errors start escalating the delay
pub const MAX_BACKOFF_MS: u64 = 10_000;
/// Length of the cooldown imposed after a rate-limit signal
pub const COOLDOWN_MS: u64 = 60_000;

/// Admission controller for all outbound provider traffic
#[derive(Debug)]
pub struct RateLimiter {
    /// When the last admitted request was stamped
    last_request_at: Option<Instant>,
    /// Failures since the last success
    consecutive_errors: u32,
    /// Deadline before which all admission is refused
    cooldown_until: Option<Instant>,
    /// Lower bound of the base delay, in milliseconds
    min_delay_ms: u64,
    /// Upper bound of the base delay, in milliseconds
    max_delay_ms: u64,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiter {
    /// Create a limiter with the standard delay window
    pub fn new() -> Self {
        Self::with_delay_window(MIN_REQUEST_DELAY_MS, MAX_REQUEST_DELAY_MS)
    }

    /// Create a limiter with a custom base-delay window
    pub fn with_delay_window(min_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            last_request_at: None,
            consecutive_errors: 0,
            cooldown_until: None,
            min_delay_ms,
            max_delay_ms,
        }
    }

    /// Admit one outbound request, suspending the caller until it is due.
    ///
    /// Fails with `CooldownActive` (remaining seconds, rounded up) while a
    /// rate-limit cooldown has not elapsed; no network attempt may be made
    /// in that case.
    pub async fn admit(&mut self) -> Result<(), GatewayError> {
        let now = Instant::now();

        if let Some(until) = self.cooldown_until {
            if now < until {
                let remaining = until.saturating_duration_since(now);
                let remaining_secs = remaining.as_secs_f64().ceil() as u64;
                return Err(GatewayError::CooldownActive { remaining_secs });
            }
            self.cooldown_until = None;
        }

        let base_ms = rand::rng().random_range(self.min_delay_ms..=self.max_delay_ms);
        let delay = backoff_delay(base_ms, self.consecutive_errors);

        if let Some(last) = self.last_request_at {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < delay {
                let wait = delay - elapsed;
                debug!("rate limiter holding request for {} ms", wait.as_millis());
                sleep(wait).await;
            }
        }

        self.last_request_at = Some(Instant::now());
        Ok(())
    }

    /// Record a successful provider call, resetting the backoff
    pub fn record_success(&mut self) {
        self.consecutive_errors = 0;
    }

    /// Record a failed provider call.
    ///
    /// A rate-limit-classified failure additionally opens the cooldown
    /// window, during which every `admit()` is refused.
    pub fn record_failure(&mut self, rate_limited: bool) {
        self.consecutive_errors = self.consecutive_errors.saturating_add(1);
        if rate_limited {
            warn!("rate limit signal received, suspending requests for {} s", COOLDOWN_MS / 1000);
            self.cooldown_until = Some(Instant::now() + Duration::from_millis(COOLDOWN_MS));
        }
    }

    /// Failures recorded since the last success
    pub fn consecutive_errors(&self) -> u32 {
        self.consecutive_errors
    }

    /// Whether a cooldown deadline is currently in the future
    pub fn in_cooldown(&self) -> bool {
        self.cooldown_until.is_some_and(|until| Instant::now() < until)
    }
}

/// Compute the target inter-request delay for a given base and error count.
///
/// With no errors the base is used as-is; otherwise it doubles per
/// consecutive error, capped at `MAX_BACKOFF_MS`. The shift is clamped so
/// pathological error counts cannot overflow.
fn backoff_delay(base_ms: u64, consecutive_errors: u32) -> Duration {
    if consecutive_errors == 0 {
        return Duration::from_millis(base_ms);
    }
    let factor = 1u64 << consecutive_errors.min(16);
    Duration::from_millis(base_ms.saturating_mul(factor).min(MAX_BACKOFF_MS))
}
