/*!
 * Tests for error types and conversions
 */

use lingway::errors::{AppError, GatewayError, ProviderError};

#[test]
fn test_providerError_requestFailed_shouldDisplayCorrectly() {
    let error = ProviderError::RequestFailed("Connection timeout".to_string());
    let display = format!("{}", error);
    assert!(display.contains("API request failed"));
    assert!(display.contains("Connection timeout"));
}

#[test]
fn test_providerError_parseError_shouldDisplayCorrectly() {
    let error = ProviderError::ParseError("Invalid JSON".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Failed to parse API response"));
    assert!(display.contains("Invalid JSON"));
}

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 503,
        message: "Service unavailable".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("503"));
    assert!(display.contains("Service unavailable"));
}

#[test]
fn test_providerError_rateLimitExceeded_shouldDisplayCorrectly() {
    let error = ProviderError::RateLimitExceeded("Too Many Requests".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Rate limit exceeded"));
    assert!(display.contains("Too Many Requests"));
}

#[test]
fn test_gatewayError_emptyInput_shouldDisplayCorrectly() {
    let display = format!("{}", GatewayError::EmptyInput);
    assert!(display.contains("input text is empty"));
}

#[test]
fn test_gatewayError_cooldownActive_shouldIncludeRemainingSeconds() {
    let error = GatewayError::CooldownActive { remaining_secs: 42 };
    let display = format!("{}", error);
    assert!(display.contains("cooldown"));
    assert!(display.contains("42 seconds"));
}

#[test]
fn test_gatewayError_allProvidersFailed_shouldCarryLastError() {
    let error = GatewayError::AllProvidersFailed("API request failed: timeout".to_string());
    let display = format!("{}", error);
    assert!(display.contains("All translation providers failed"));
    assert!(display.contains("timeout"));
}

#[test]
fn test_gatewayError_fromProviderError_shouldWrapCorrectly() {
    let provider_error = ProviderError::RequestFailed("Test error".to_string());
    let gateway_error: GatewayError = provider_error.into();
    let display = format!("{}", gateway_error);
    assert!(display.contains("Provider error"));
}

#[test]
fn test_appError_fromGatewayError_shouldWrapCorrectly() {
    let gateway_error = GatewayError::EmptyInput;
    let app_error: AppError = gateway_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Gateway error"));
}

#[test]
fn test_appError_fromIoError_shouldWrapAsFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
    let app_error: AppError = io_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("File error"));
    assert!(display.contains("File not found"));
}

#[test]
fn test_appError_fromAnyhowError_shouldWrapAsUnknown() {
    let anyhow_error = anyhow::anyhow!("something odd");
    let app_error: AppError = anyhow_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Unknown error"));
    assert!(display.contains("something odd"));
}
