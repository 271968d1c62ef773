/*!
 * # lingway - a resilient translation gateway
 *
 * A Rust library that translates text by falling through a fixed priority
 * chain of free third-party providers, while protecting those providers
 * (and the caller's network identity) from rate-limit bans.
 *
 * ## Features
 *
 * - Ordered provider fallback chain (Lingva instances, MyMemory, a
 *   lazily-loaded Google web fallback module)
 * - Per-provider multi-endpoint failover with sticky rotation
 * - Process-wide rate limiter: jittered inter-request delay, exponential
 *   backoff on consecutive errors, 60-second cooldown on rate-limit signals
 * - Single-flight FIFO request queue - at most one provider call in flight
 * - Bounded result cache with FIFO eviction
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `gateway`: The gateway core:
 *   - `gateway::service`: The public `Gateway` dispatcher
 *   - `gateway::queue`: Single-flight request serialization
 *   - `gateway::chain`: The provider fallback chain
 *   - `gateway::limiter`: Rate limiting, backoff, and cooldown
 *   - `gateway::cache`: Bounded result caching
 * - `providers`: Client implementations for the translation backends:
 *   - `providers::lingva`: Lingva instance client with endpoint rotation
 *   - `providers::mymemory`: MyMemory API client
 *   - `providers::google_web`: Free Google web endpoint fallback
 *   - `providers::mock`: Scripted providers for tests
 * - `language_utils`: ISO language code helpers and the script heuristic
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod gateway;
pub mod language_utils;
pub mod providers;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, GatewayError, ProviderError};
pub use gateway::{Gateway, TranslationRequest, TranslationResult};
pub use language_utils::guess_language_by_script;
