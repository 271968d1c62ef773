use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::errors::ProviderError;
use crate::providers::{Provider, ProviderResponse, build_http_client};

/// Client for Lingva Translate instances.
///
/// Lingva is community-mirrored, so the client carries an ordered list of
/// instance endpoints and fails over across them within a single attempt.
/// The rotation is sticky: a successful endpoint becomes the starting point
/// for the next request, so dead mirrors are not re-probed on every call.
#[derive(Debug)]
pub struct LingvaClient {
    /// Instance base URLs, in preference order
    endpoints: Vec<String>,
    /// Index of the endpoint the next request starts from
    current_endpoint: usize,
    /// HTTP client for making requests
    client: Client,
}

/// Translation response from a Lingva instance
#[derive(Debug, Deserialize)]
pub struct LingvaResponse {
    /// Translated text
    pub translation: String,
    /// Optional extra info block
    #[serde(default)]
    pub info: Option<LingvaInfo>,
}

/// Extra info block of a Lingva response
#[derive(Debug, Deserialize)]
pub struct LingvaInfo {
    /// Source language the instance detected when asked to auto-detect
    #[serde(rename = "detectedSource")]
    pub detected_source: Option<String>,
}

impl LingvaClient {
    /// Create a new client over the given instance endpoints
    pub fn new(endpoints: Vec<String>) -> Self {
        Self {
            endpoints,
            current_endpoint: 0,
            client: build_http_client(),
        }
    }

    /// Endpoint index the next request will start from
    pub fn current_endpoint(&self) -> usize {
        self.current_endpoint
    }

    /// Build the request URL for one instance.
    ///
    /// The text travels as a path segment, so it is percent-encoded through
    /// the Url segment API rather than pasted into a format string.
    pub fn request_url(base: &str, source: &str, target: &str, text: &str) -> Result<Url, ProviderError> {
        let mut url = Url::parse(base)
            .map_err(|e| ProviderError::RequestFailed(format!("invalid Lingva endpoint {}: {}", base, e)))?;
        url.path_segments_mut()
            .map_err(|_| ProviderError::RequestFailed(format!("Lingva endpoint cannot be a base URL: {}", base)))?
            .extend(["api", "v1", source, target, text]);
        Ok(url)
    }

    /// Parse a Lingva response body, requiring a non-empty translation
    pub fn parse_body(body: &str) -> Result<ProviderResponse, ProviderError> {
        let response: LingvaResponse = serde_json::from_str(body)
            .map_err(|e| ProviderError::ParseError(format!("Lingva response: {}", e)))?;

        if response.translation.is_empty() {
            return Err(ProviderError::ParseError("Lingva returned an empty translation".to_string()));
        }

        Ok(ProviderResponse {
            text: response.translation,
            detected_lang: response.info.and_then(|i| i.detected_source),
        })
    }

    /// Issue one request against a single instance
    async fn request_endpoint(
        &self,
        base: &str,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<ProviderResponse, ProviderError> {
        let url = Self::request_url(base, source_lang, target_lang, text)?;

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::RequestFailed(format!("Lingva request to {} timed out", base))
            } else {
                ProviderError::RequestFailed(format!("Lingva request to {} failed: {}", base, e))
            }
        })?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(ProviderError::RateLimitExceeded(format!(
                "Lingva instance {} returned 429 Too Many Requests",
                base
            )));
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
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to read Lingva response: {}", e)))?;

        Self::parse_body(&body)
    }
}

#[async_trait]
impl Provider for LingvaClient {
    fn name(&self) -> &'static str {
        "Lingva"
    }

    async fn attempt(
        &mut self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<ProviderResponse, ProviderError> {
        let count = self.endpoints.len();
        if count == 0 {
            return Err(ProviderError::Unavailable("no Lingva endpoints configured".to_string()));
        }

        let mut last_error = None;
        for offset in 0..count {
            let index = (self.current_endpoint + offset) % count;
            let endpoint = self.endpoints[index].clone();

            match self.request_endpoint(&endpoint, text, source_lang, target_lang).await {
                Ok(response) => {
                    debug!("Lingva instance {} answered", endpoint);
                    self.current_endpoint = index;
                    return Ok(response);
                }
                Err(e) => {
                    warn!("Lingva instance {} failed: {}", endpoint, e);
                    last_error = Some(e);
                }
            }
        }

        // All endpoints failed; propagate the last error
        Err(last_error.unwrap_or_else(|| ProviderError::Unavailable("no Lingva endpoints configured".to_string())))
    }
}
