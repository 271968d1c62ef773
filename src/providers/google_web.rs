use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::errors::ProviderError;
use crate::providers::{Provider, ProviderResponse, build_http_client};

/// Last-resort adapter over the free Google web endpoint.
///
/// The web module is initialized asynchronously at startup: a background
/// task builds the client and probes the endpoint once. Until that finishes
/// the adapter reports itself unavailable and the chain skips it without
/// recording a failure.
#[derive(Debug)]
pub struct GoogleWebClient {
    module: Arc<OnceCell<WebModule>>,
}

/// The loaded web translation module
#[derive(Debug)]
struct WebModule {
    base_url: String,
    client: Client,
}

impl GoogleWebClient {
    /// Create the adapter and start loading the web module in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(base_url: String) -> Self {
        let module = Arc::new(OnceCell::new());
        let cell = Arc::clone(&module);
        tokio::spawn(async move {
            match WebModule::load(base_url).await {
                Ok(loaded) => {
                    debug!("Google web module loaded");
                    // A lost race here only means another load won; drop ours
                    let _ = cell.set(loaded);
                }
                Err(e) => warn!("Google web module failed to load: {}", e),
            }
        });
        Self { module }
    }

    /// Create the adapter with the module already loaded, skipping the probe
    pub fn preloaded(base_url: String) -> Self {
        let module = Arc::new(OnceCell::new());
        let _ = module.set(WebModule {
            base_url,
            client: build_http_client(),
        });
        Self { module }
    }

    /// Parse the nested-array body of the free endpoint.
    ///
    /// The payload is a bare JSON array: element 0 holds the translated
    /// segments (each itself an array whose first item is the text), and
    /// element 2 is the detected source language.
    pub fn parse_body(body: &str) -> Result<ProviderResponse, ProviderError> {
        let value: serde_json::Value = serde_json::from_str(body)
            .map_err(|e| ProviderError::ParseError(format!("Google web response: {}", e)))?;

        let segments = value
            .get(0)
            .and_then(|s| s.as_array())
            .ok_or_else(|| ProviderError::ParseError("Google web response is missing segments".to_string()))?;

        let mut text = String::new();
        for segment in segments {
            if let Some(part) = segment.get(0).and_then(|p| p.as_str()) {
                text.push_str(part);
            }
        }

        if text.is_empty() {
            return Err(ProviderError::ParseError("Google web returned an empty translation".to_string()));
        }

        let detected_lang = value.get(2).and_then(|d| d.as_str()).map(|s| s.to_string());

        Ok(ProviderResponse { text, detected_lang })
    }
}

impl WebModule {
    /// Build the client and probe the endpoint once to establish reachability
    async fn load(base_url: String) -> Result<Self, ProviderError> {
        let client = build_http_client();
        client
            .get(&base_url)
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("probe of {} failed: {}", base_url, e)))?;
        Ok(Self { base_url, client })
    }

    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<ProviderResponse, ProviderError> {
        let response = self
            .client
            .get(format!("{}/translate_a/single", self.base_url))
            .query(&[
                ("client", "gtx"),
                ("sl", source_lang),
                ("tl", target_lang),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::RequestFailed("Google web request timed out".to_string())
                } else {
                    ProviderError::RequestFailed(format!("Google web request failed: {}", e))
                }
            })?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(ProviderError::RateLimitExceeded("Google web returned 429 Too Many Requests".to_string()));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to read Google web response: {}", e)))?;

        GoogleWebClient::parse_body(&body)
    }
}

#[async_trait]
impl Provider for GoogleWebClient {
    fn name(&self) -> &'static str {
        "Google"
    }

    fn is_available(&self) -> bool {
        self.module.get().is_some()
    }

    async fn attempt(
        &mut self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<ProviderResponse, ProviderError> {
        match self.module.get() {
            Some(module) => module.translate(text, source_lang, target_lang).await,
            None => Err(ProviderError::Unavailable("translation module is still loading".to_string())),
        }
    }
}
