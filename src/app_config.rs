use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::gateway::cache::DEFAULT_CACHE_CAPACITY;
use crate::language_utils::{is_auto, validate_language_code};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO), or "auto" to let the chain decide
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Gateway tuning
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Provider endpoints
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Gateway tuning knobs
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    /// Maximum number of cached translation results
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

/// Endpoints of the translation providers, in chain priority order
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProvidersConfig {
    /// Lingva instance base URLs, tried with sticky rotation
    #[serde(default = "default_lingva_endpoints")]
    pub lingva_endpoints: Vec<String>,

    /// MyMemory API endpoint
    #[serde(default = "default_mymemory_endpoint")]
    pub mymemory_endpoint: String,

    /// Base URL of the free Google web endpoint used by the fallback module
    #[serde(default = "default_google_web_endpoint")]
    pub google_web_endpoint: String,
}

/// Log level configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_source_language() -> String {
    "auto".to_string()
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

fn default_lingva_endpoints() -> Vec<String> {
    vec![
        "https://lingva.ml".to_string(),
        "https://lingva.lunar.icu".to_string(),
        "https://translate.plausibility.cloud".to_string(),
    ]
}

fn default_mymemory_endpoint() -> String {
    "https://api.mymemory.translated.net/get".to_string()
}

fn default_google_web_endpoint() -> String {
    "https://translate.googleapis.com".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            lingva_endpoints: default_lingva_endpoints(),
            mymemory_endpoint: default_mymemory_endpoint(),
            google_web_endpoint: default_google_web_endpoint(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
            target_language: default_target_language(),
            gateway: GatewayConfig::default(),
            providers: ProvidersConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to open config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Write configuration to a JSON file, pretty-printed
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;
        std::fs::write(path, content)
            .context(format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.target_language.trim().is_empty() {
            return Err(anyhow!("Target language cannot be empty"));
        }
        if is_auto(&self.target_language) {
            return Err(anyhow!("Target language cannot be 'auto'"));
        }
        validate_language_code(&self.target_language)?;

        if !is_auto(&self.source_language) {
            validate_language_code(&self.source_language)?;
        }

        if self.gateway.cache_capacity == 0 {
            return Err(anyhow!("Cache capacity must be at least 1"));
        }

        if self.providers.lingva_endpoints.is_empty() {
            return Err(anyhow!("At least one Lingva endpoint is required"));
        }
        for endpoint in &self.providers.lingva_endpoints {
            Url::parse(endpoint).map_err(|e| anyhow!("Invalid Lingva endpoint {}: {}", endpoint, e))?;
        }
        Url::parse(&self.providers.mymemory_endpoint)
            .map_err(|e| anyhow!("Invalid MyMemory endpoint: {}", e))?;
        Url::parse(&self.providers.google_web_endpoint)
            .map_err(|e| anyhow!("Invalid Google web endpoint: {}", e))?;

        Ok(())
    }
}

/// Default config file location: `conf.json` next to the process, falling
/// back to the platform config directory
pub fn default_config_path() -> PathBuf {
    let local = PathBuf::from("conf.json");
    if local.exists() {
        return local;
    }
    dirs::config_dir()
        .map(|dir| dir.join("lingway").join("conf.json"))
        .unwrap_or(local)
}
