/*!
 * The gateway dispatcher: the public entry point composing cache lookup,
 * queue admission, and provider-chain execution into one `translate`
 * operation.
 *
 * All mutable gateway state (cache, limiter, queue, endpoint rotation) is
 * encapsulated in one `Gateway` instance constructed once at process
 * start, so tests get clean isolation from fresh instances.
 */

use chrono::{DateTime, Utc};
use log::debug;

use crate::app_config::Config;
use crate::errors::GatewayError;
use crate::gateway::cache::{TranslationCache, cache_key};
use crate::gateway::chain::ProviderChain;
use crate::gateway::queue::RequestQueue;
use crate::providers::Provider;
use crate::providers::google_web::GoogleWebClient;
use crate::providers::lingva::LingvaClient;
use crate::providers::mymemory::MyMemoryClient;

/// One translation request, owned by the queue from enqueue to resolution
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    /// Trimmed, non-empty text to translate
    pub text: String,
    /// Source language code, or "auto"
    pub source_lang: String,
    /// Target language code
    pub target_lang: String,
    /// When the request entered the gateway
    pub submitted_at: DateTime<Utc>,
}

impl TranslationRequest {
    /// Create a request stamped with the current time
    pub fn new(text: impl Into<String>, source_lang: impl Into<String>, target_lang: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            submitted_at: Utc::now(),
        }
    }
}

/// The outcome of a translation, successful or not
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    /// Whether a provider produced a translation
    pub success: bool,
    /// The translated text; empty on failure
    pub text: String,
    /// Name of the provider that answered; empty on failure
    pub service: String,
    /// Source language the provider detected, if it reported one
    pub detected_lang: Option<String>,
    /// Human-readable failure message; `None` on success
    pub error: Option<String>,
}

impl TranslationResult {
    /// Build a successful result
    pub fn translated(text: String, service: String, detected_lang: Option<String>) -> Self {
        Self {
            success: true,
            text,
            service,
            detected_lang,
            error: None,
        }
    }

    /// Build a failure result carrying a message
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            text: String::new(),
            service: String::new(),
            detected_lang: None,
            error: Some(message.into()),
        }
    }
}

/// The translation gateway: cache fast path plus serialized provider work
pub struct Gateway {
    cache: TranslationCache,
    queue: RequestQueue,
}

impl Gateway {
    /// Build a gateway with the real provider chain from configuration.
    ///
    /// Must be called from within a tokio runtime: construction spawns the
    /// queue's drain task and the fallback module's background load.
    pub fn new(config: &Config) -> Self {
        let providers: Vec<Box<dyn Provider>> = vec![
            Box::new(LingvaClient::new(config.providers.lingva_endpoints.clone())),
            Box::new(MyMemoryClient::new(config.providers.mymemory_endpoint.clone())),
            Box::new(GoogleWebClient::new(config.providers.google_web_endpoint.clone())),
        ];
        Self::with_providers(config, providers)
    }

    /// Build a gateway over an explicit provider list.
    ///
    /// This is the seam tests use to substitute mock providers.
    pub fn with_providers(config: &Config, providers: Vec<Box<dyn Provider>>) -> Self {
        let cache = TranslationCache::new(config.gateway.cache_capacity);
        let chain = ProviderChain::new(providers);
        let queue = RequestQueue::spawn(chain, cache.clone());
        Self { cache, queue }
    }

    /// Translate a text, consulting the cache before the network.
    ///
    /// Returns `Err` only for empty input; every post-admission failure
    /// (provider exhaustion, active cooldown) resolves to a
    /// `TranslationResult` with `success == false` and a message.
    pub async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<TranslationResult, GatewayError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(GatewayError::EmptyInput);
        }

        let key = cache_key(trimmed, source_lang, target_lang);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }

        debug!("enqueueing translation of {} chars ({} -> {})", trimmed.chars().count(), source_lang, target_lang);
        let request = TranslationRequest::new(trimmed, source_lang, target_lang);
        Ok(self.queue.enqueue(request).await)
    }

    /// Read access to the cache, for statistics and tests
    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }
}
