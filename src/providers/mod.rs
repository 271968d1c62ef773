/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for the translation backends
 * the gateway falls through, in chain priority order:
 * - Lingva: community-hosted Lingva Translate instances (multiple endpoints)
 * - MyMemory: the MyMemory translation memory API
 * - Google web: the free Google web endpoint, loaded lazily at startup
 *
 * A mock provider is also shipped for exercising the gateway in tests.
 */

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use std::fmt::Debug;
use std::time::Duration;

use crate::errors::ProviderError;

/// Browser-like user agent sent with every outbound request
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                              (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Per-call timeout applied to every provider request
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Build the shared HTTP client used by all HTTP-backed providers
pub fn build_http_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_default()
}

static RATE_LIMIT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)too many requests|rate limit|\b429\b").expect("rate limit pattern is valid")
});

/// Check whether a provider error message indicates a rate-limit ban
pub fn is_rate_limit_message(message: &str) -> bool {
    RATE_LIMIT_PATTERN.is_match(message)
}

/// Classify a provider error as a rate-limit signal.
///
/// HTTP adapters map a 429 status to `RateLimitExceeded` directly; the
/// message scan covers in-band quota errors (MyMemory) and the fallback
/// module, whose failures only carry text.
pub fn is_rate_limit_error(error: &ProviderError) -> bool {
    matches!(error, ProviderError::RateLimitExceeded(_)) || is_rate_limit_message(&error.to_string())
}

/// A single successful provider translation, before the chain attaches the provider name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderResponse {
    /// The translated text
    pub text: String,
    /// Source language the provider detected, if it reported one
    pub detected_lang: Option<String>,
}

/// Common trait for all translation providers
///
/// This trait defines the interface every provider adapter must follow,
/// allowing the chain to try them interchangeably in fixed priority order.
#[async_trait]
pub trait Provider: Send + Debug {
    /// Human-readable provider name attached to successful results
    fn name(&self) -> &'static str;

    /// Whether the provider can currently serve requests.
    ///
    /// The chain skips unavailable providers without counting a failure.
    fn is_available(&self) -> bool {
        true
    }

    /// Attempt a single translation
    ///
    /// # Arguments
    /// * `text` - The text to translate
    /// * `source_lang` - Source language code, or "auto"
    /// * `target_lang` - Target language code
    ///
    /// # Returns
    /// * `Result<ProviderResponse, ProviderError>` - The translation or an error
    async fn attempt(
        &mut self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<ProviderResponse, ProviderError>;
}

pub mod google_web;
pub mod lingva;
pub mod mock;
pub mod mymemory;
