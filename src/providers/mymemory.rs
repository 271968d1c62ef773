use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::errors::ProviderError;
use crate::language_utils::{guess_language_by_script, is_auto};
use crate::providers::{Provider, ProviderResponse, build_http_client, is_rate_limit_message};

/// Client for the MyMemory translation API.
///
/// MyMemory rejects "auto" language pairs, so the adapter substitutes a
/// guessed source (script-range heuristic) when the caller asks for
/// auto-detection or supplies a source equal to the target. When the
/// effective source still equals the target there is nothing to translate
/// and the adapter short-circuits with the input text unchanged.
#[derive(Debug)]
pub struct MyMemoryClient {
    /// API endpoint URL
    endpoint: String,
    /// HTTP client for making requests
    client: Client,
}

impl MyMemoryClient {
    /// Create a new client against the given endpoint
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            client: build_http_client(),
        }
    }

    /// Resolve the source language MyMemory will actually be asked for.
    ///
    /// Returns the effective source and whether it was guessed rather than
    /// supplied by the caller.
    pub fn effective_source(text: &str, source_lang: &str, target_lang: &str) -> (String, bool) {
        if is_auto(source_lang) || source_lang == target_lang {
            (guess_language_by_script(text).to_string(), true)
        } else {
            (source_lang.to_string(), false)
        }
    }

    /// Parse a MyMemory response body.
    ///
    /// `responseStatus` arrives as a number on the happy path but as a
    /// quoted string on some error paths, so the body is walked as a JSON
    /// value instead of a rigid struct.
    pub fn parse_body(body: &str) -> Result<ProviderResponse, ProviderError> {
        let value: serde_json::Value = serde_json::from_str(body)
            .map_err(|e| ProviderError::ParseError(format!("MyMemory response: {}", e)))?;

        let status = match value.get("responseStatus") {
            Some(s) => s
                .as_i64()
                .or_else(|| s.as_str().and_then(|t| t.parse().ok()))
                .unwrap_or(0),
            None => 0,
        };

        if status != 200 {
            let details = value
                .get("responseDetails")
                .and_then(|d| d.as_str())
                .unwrap_or("unknown error")
                .to_string();
            // MyMemory reports quota exhaustion in-band rather than via HTTP status
            if status == 429 || is_rate_limit_message(&details) {
                return Err(ProviderError::RateLimitExceeded(details));
            }
            return Err(ProviderError::ApiError {
                status_code: status.clamp(0, u16::MAX as i64) as u16,
                message: details,
            });
        }

        let translated = value
            .get("responseData")
            .and_then(|d| d.get("translatedText"))
            .and_then(|t| t.as_str())
            .unwrap_or("");

        if translated.is_empty() {
            return Err(ProviderError::ParseError("MyMemory returned an empty translation".to_string()));
        }

        Ok(ProviderResponse {
            text: translated.to_string(),
            detected_lang: None,
        })
    }
}

#[async_trait]
impl Provider for MyMemoryClient {
    fn name(&self) -> &'static str {
        "MyMemory"
    }

    async fn attempt(
        &mut self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<ProviderResponse, ProviderError> {
        let (source, guessed) = Self::effective_source(text, source_lang, target_lang);

        if source == target_lang {
            // Same-language no-op: nothing to translate, return the input as-is
            debug!("MyMemory short-circuit: source and target are both '{}'", source);
            return Ok(ProviderResponse {
                text: text.to_string(),
                detected_lang: Some(source),
            });
        }

        let langpair = format!("{}|{}", source, target_lang);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::RequestFailed("MyMemory request timed out".to_string())
                } else {
                    ProviderError::RequestFailed(format!("MyMemory request failed: {}", e))
                }
            })?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(ProviderError::RateLimitExceeded(
                "MyMemory returned 429 Too Many Requests".to_string(),
            ));
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
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to read MyMemory response: {}", e)))?;

        let mut parsed = Self::parse_body(&body)?;
        if guessed {
            parsed.detected_lang = Some(source);
        }
        Ok(parsed)
    }
}
