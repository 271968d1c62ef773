/*!
 * Error types for the lingway application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to a single translation provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// The provider exists but cannot serve requests right now
    #[error("Provider unavailable: {0}")]
    Unavailable(String),
}

/// Errors produced by the gateway itself, surfaced to callers
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The trimmed input text was empty; rejected before any queue or network work
    #[error("Nothing to translate: input text is empty")]
    EmptyInput,

    /// A prior rate-limit cooldown has not elapsed yet
    #[error("Rate limit cooldown active, try again in {remaining_secs} seconds")]
    CooldownActive {
        /// Whole seconds left until the cooldown expires, rounded up
        remaining_secs: u64,
    },

    /// Every provider in the chain failed; carries the last underlying error
    #[error("All translation providers failed: {0}")]
    AllProvidersFailed(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error loading or validating configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the gateway
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
