/*!
 * The resilient translation gateway core.
 *
 * This module composes the pieces that make the gateway safe to point at
 * free third-party services:
 * - `limiter`: admission control with jittered delay, exponential backoff,
 *   and rate-limit cooldown suspension
 * - `chain`: the fixed-priority provider fallback chain
 * - `cache`: a bounded FIFO-eviction result cache
 * - `queue`: the single-flight FIFO request serializer
 * - `service`: the public `Gateway` dispatcher tying them together
 */

pub mod cache;
pub mod chain;
pub mod limiter;
pub mod queue;
pub mod service;

pub use cache::{TranslationCache, cache_key};
pub use chain::{ChainTranslation, ProviderChain};
pub use limiter::RateLimiter;
pub use queue::RequestQueue;
pub use service::{Gateway, TranslationRequest, TranslationResult};
