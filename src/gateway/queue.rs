/*!
 * Single-flight translation request queue.
 *
 * Callers enqueue a request and await its result through a oneshot channel
 * fulfilled by one drain task. The drain task is spawned exactly once, so
 * at most one provider call is in flight process-wide, requests resolve in
 * strict FIFO submission order, and a fixed pacing delay separates
 * consecutive items. Because all provider work happens on this one task,
 * the chain, limiter, and endpoint-rotation state need no extra locking.
 */

use chrono::Utc;
use log::debug;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{Duration, sleep};

use crate::gateway::cache::{TranslationCache, cache_key};
use crate::gateway::chain::ProviderChain;
use crate::gateway::service::{TranslationRequest, TranslationResult};

/// Pause between consecutive queue items, applied after each completes
pub const QUEUE_PACING_MS: u64 = 200;

/// A queued request paired with the channel that resolves its caller
struct PendingRequest {
    request: TranslationRequest,
    respond_to: oneshot::Sender<TranslationResult>,
}

/// Handle for submitting requests to the drain task
pub struct RequestQueue {
    tx: mpsc::UnboundedSender<PendingRequest>,
}

impl RequestQueue {
    /// Spawn the drain task and return the submission handle.
    ///
    /// The task owns the provider chain outright; successful results are
    /// written to the cache before the caller is resolved. Must be called
    /// from within a tokio runtime.
    pub fn spawn(mut chain: ProviderChain, cache: TranslationCache) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<PendingRequest>();

        tokio::spawn(async move {
            while let Some(PendingRequest { request, respond_to }) = rx.recv().await {
                let queued_ms = Utc::now()
                    .signed_duration_since(request.submitted_at)
                    .num_milliseconds();
                debug!("draining request queued for {} ms", queued_ms);

                let result = match chain
                    .translate(&request.text, &request.source_lang, &request.target_lang)
                    .await
                {
                    Ok(translation) => {
                        let result = TranslationResult::translated(
                            translation.text,
                            translation.service,
                            translation.detected_lang,
                        );
                        let key = cache_key(&request.text, &request.source_lang, &request.target_lang);
                        cache.store(&key, result.clone());
                        result
                    }
                    // Exhaustion and cooldown become ordinary failure results;
                    // the caller's await must always resolve
                    Err(error) => TranslationResult::failure(error.to_string()),
                };

                if respond_to.send(result).is_err() {
                    debug!("caller went away before its result was ready");
                }

                sleep(Duration::from_millis(QUEUE_PACING_MS)).await;
            }

            debug!("request queue closed, drain loop exiting");
        });

        Self { tx }
    }

    /// Enqueue a request and await its resolution.
    ///
    /// Never leaves the caller hanging: a dead drain task is converted
    /// into a failure result.
    pub async fn enqueue(&self, request: TranslationRequest) -> TranslationResult {
        let (respond_to, response) = oneshot::channel();

        if self.tx.send(PendingRequest { request, respond_to }).is_err() {
            return TranslationResult::failure("translation queue is no longer running");
        }

        match response.await {
            Ok(result) => result,
            Err(_) => TranslationResult::failure("translation queue dropped the request"),
        }
    }
}
