/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockProvider::working(..)` - Always succeeds with translated text
 * - `MockProvider::failing(..)` - Always fails with a server error
 * - `MockProvider::rate_limited(..)` - Always fails with a 429-style error
 * - `MockProvider::slow(..)` - Succeeds after a delay (timeout/pacing tests)
 * - `MockProvider::unavailable(..)` - Reports itself not ready
 *
 * Every call is recorded in a shared tracker so tests can assert call
 * counts, submission order, and the single-flight guarantee.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::time::Instant;

use crate::errors::ProviderError;
use crate::providers::{Provider, ProviderResponse};

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a canned translation
    Working,
    /// Always fails with a server error
    Failing,
    /// Always fails with a rate-limit error
    RateLimited,
    /// Succeeds after sleeping (for timeout and overlap testing)
    Slow { delay_ms: u64 },
    /// Reports itself unavailable; the chain should skip it
    Unavailable,
}

/// Shared record of every call made against a mock provider
#[derive(Debug, Default)]
pub struct CallTracker {
    /// Total attempts observed
    pub calls: usize,
    /// Attempts currently executing
    in_flight: usize,
    /// Highest number of simultaneously executing attempts ever observed
    pub max_in_flight: usize,
    /// Start instant of each attempt, in arrival order
    pub started_at: Vec<Instant>,
    /// Text of each attempt, in arrival order
    pub texts: Vec<String>,
}

/// Mock provider for exercising chain, queue, and gateway behavior
#[derive(Debug)]
pub struct MockProvider {
    name: &'static str,
    behavior: MockBehavior,
    tracker: Arc<Mutex<CallTracker>>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(name: &'static str, behavior: MockBehavior) -> Self {
        Self {
            name,
            behavior,
            tracker: Arc::new(Mutex::new(CallTracker::default())),
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working(name: &'static str) -> Self {
        Self::new(name, MockBehavior::Working)
    }

    /// Create a failing mock provider that always errors
    pub fn failing(name: &'static str) -> Self {
        Self::new(name, MockBehavior::Failing)
    }

    /// Create a mock provider that always reports a rate limit
    pub fn rate_limited(name: &'static str) -> Self {
        Self::new(name, MockBehavior::RateLimited)
    }

    /// Create a mock provider that succeeds after a delay
    pub fn slow(name: &'static str, delay_ms: u64) -> Self {
        Self::new(name, MockBehavior::Slow { delay_ms })
    }

    /// Create a mock provider the chain should skip
    pub fn unavailable(name: &'static str) -> Self {
        Self::new(name, MockBehavior::Unavailable)
    }

    /// Get a handle on the call tracker
    pub fn tracker(&self) -> Arc<Mutex<CallTracker>> {
        Arc::clone(&self.tracker)
    }

    fn respond(&self, text: &str, target_lang: &str) -> Result<ProviderResponse, ProviderError> {
        match self.behavior {
            MockBehavior::Working | MockBehavior::Slow { .. } => Ok(ProviderResponse {
                text: format!("[{} to {}] {}", self.name, target_lang, text),
                detected_lang: None,
            }),
            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            }),
            MockBehavior::RateLimited => {
                Err(ProviderError::RateLimitExceeded("Too Many Requests".to_string()))
            }
            MockBehavior::Unavailable => {
                Err(ProviderError::Unavailable("mock provider is offline".to_string()))
            }
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_available(&self) -> bool {
        self.behavior != MockBehavior::Unavailable
    }

    async fn attempt(
        &mut self,
        text: &str,
        _source_lang: &str,
        target_lang: &str,
    ) -> Result<ProviderResponse, ProviderError> {
        {
            let mut tracker = self.tracker.lock();
            tracker.calls += 1;
            tracker.in_flight += 1;
            tracker.max_in_flight = tracker.max_in_flight.max(tracker.in_flight);
            tracker.started_at.push(Instant::now());
            tracker.texts.push(text.to_string());
        }

        if let MockBehavior::Slow { delay_ms } = self.behavior {
            tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
        }

        let result = self.respond(text, target_lang);
        self.tracker.lock().in_flight -= 1;
        result
    }
}
