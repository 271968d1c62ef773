/*!
 * Ordered provider fallback chain.
 *
 * Providers are tried in fixed priority order until one succeeds. Every
 * attempt passes the rate limiter first; failures feed the limiter's
 * backoff and cooldown state, and an inter-provider delay (longer after a
 * rate-limit signal) separates consecutive attempts within one request.
 */

use log::{debug, info, warn};
use tokio::time::{Duration, sleep};

use crate::errors::GatewayError;
use crate::gateway::limiter::RateLimiter;
use crate::providers::{Provider, is_rate_limit_error};

/// Delay before trying the next provider after an ordinary failure
pub const PROVIDER_RETRY_DELAY_MS: u64 = 1000;
/// Delay before trying the next provider after a rate-limit-classified failure
pub const RATE_LIMITED_RETRY_DELAY_MS: u64 = 5000;

/// A successful chain translation with the winning provider attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainTranslation {
    /// The translated text
    pub text: String,
    /// Name of the provider that produced it
    pub service: String,
    /// Source language the provider detected, if any
    pub detected_lang: Option<String>,
}

/// Fixed-priority fallback chain over the configured providers
pub struct ProviderChain {
    providers: Vec<Box<dyn Provider>>,
    limiter: RateLimiter,
}

impl ProviderChain {
    /// Create a chain over the given providers, in priority order
    pub fn new(providers: Vec<Box<dyn Provider>>) -> Self {
        Self::with_limiter(providers, RateLimiter::new())
    }

    /// Create a chain with a custom rate limiter
    pub fn with_limiter(providers: Vec<Box<dyn Provider>>, limiter: RateLimiter) -> Self {
        Self { providers, limiter }
    }

    /// Read access to the limiter state, for introspection
    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Try each provider in order until one succeeds.
    ///
    /// Unavailable providers are skipped without counting as a failed
    /// attempt. An active cooldown aborts the whole chain immediately,
    /// since the limiter is shared by every provider.
    pub async fn translate(
        &mut self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<ChainTranslation, GatewayError> {
        let count = self.providers.len();
        let mut last_error = None;

        for index in 0..count {
            let name = self.providers[index].name();

            if !self.providers[index].is_available() {
                debug!("skipping provider {}: not ready", name);
                continue;
            }

            self.limiter.admit().await?;

            match self.providers[index].attempt(text, source_lang, target_lang).await {
                Ok(response) => {
                    self.limiter.record_success();
                    info!("provider {} translated {} chars", name, text.chars().count());
                    return Ok(ChainTranslation {
                        text: response.text,
                        service: name.to_string(),
                        detected_lang: response.detected_lang,
                    });
                }
                Err(error) => {
                    let rate_limited = is_rate_limit_error(&error);
                    self.limiter.record_failure(rate_limited);
                    warn!("provider {} failed: {}", name, error);
                    last_error = Some(error);

                    if index + 1 < count {
                        let delay_ms = if rate_limited {
                            RATE_LIMITED_RETRY_DELAY_MS
                        } else {
                            PROVIDER_RETRY_DELAY_MS
                        };
                        sleep(Duration::from_millis(delay_ms)).await;
                    }
                }
            }
        }

        Err(GatewayError::AllProvidersFailed(
            last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no providers were available".to_string()),
        ))
    }
}
