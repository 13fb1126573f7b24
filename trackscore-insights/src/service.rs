//! Async Ask AI service.
//!
//! An ask waits out the simulated latency, then answers from the matcher.
//! The wait races a `CancellationToken`, so a caller that goes away (a new
//! question, or leaving the page) never receives a stale answer.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::cancel::CancellationToken;
use crate::error::{InsightError, InsightResult};
use crate::matcher;
use crate::response::AiResponse;

/// Simulated thinking time before an answer appears.
pub const DEFAULT_LATENCY: Duration = Duration::from_secs(2);

pub struct AskService {
    latency: Duration,
    rng: Mutex<StdRng>,
    next_id: AtomicU64,
}

impl AskService {
    /// Service with the default latency and an entropy-seeded RNG.
    pub fn new() -> Self {
        Self::with_latency(DEFAULT_LATENCY)
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self::with_rng(latency, StdRng::from_entropy())
    }

    /// Reproducible answers for tests and demos.
    pub fn seeded(latency: Duration, seed: u64) -> Self {
        Self::with_rng(latency, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(latency: Duration, rng: StdRng) -> Self {
        Self {
            latency,
            rng: Mutex::new(rng),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Answer `query` after the latency unless `cancel` fires first.
    pub async fn ask(&self, query: &str, cancel: &CancellationToken) -> InsightResult<AiResponse> {
        if query.trim().is_empty() {
            return Err(InsightError::EmptyQuery);
        }
        let request_id = format!("ask-{}", self.next_id.fetch_add(1, Ordering::Relaxed));
        if cancel.is_cancelled() {
            log::debug!("request_id={} cancelled before start", request_id);
            return Err(InsightError::Cancelled);
        }

        log::info!("request_id={} asking: {}", request_id, query.trim());
        tokio::select! {
            _ = cancel.cancelled() => {
                log::info!("request_id={} cancelled", request_id);
                return Err(InsightError::Cancelled);
            }
            _ = tokio::time::sleep(self.latency) => {}
        }

        let answer = {
            let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            matcher::respond(query, &mut *rng)?
        };
        log::info!(
            "request_id={} answered id={} kind={:?}",
            request_id,
            answer.id,
            answer.kind
        );
        Ok(answer)
    }
}

impl Default for AskService {
    fn default() -> Self {
        Self::new()
    }
}

/// One Ask AI page: at most one ask in flight.
///
/// Submitting a question cancels the one before it; `close` cancels
/// whatever is pending.
pub struct AskSession {
    service: Arc<AskService>,
    pending: Mutex<Option<CancellationToken>>,
}

impl AskSession {
    pub fn new(service: Arc<AskService>) -> Self {
        Self {
            service,
            pending: Mutex::new(None),
        }
    }

    pub fn has_pending(&self) -> bool {
        self.lock_pending().is_some()
    }

    pub async fn submit(&self, query: &str) -> InsightResult<AiResponse> {
        if query.trim().is_empty() {
            return Err(InsightError::EmptyQuery);
        }
        let token = CancellationToken::new();
        if let Some(previous) = self.lock_pending().replace(token.clone()) {
            previous.cancel();
        }

        let result = self.service.ask(query, &token).await;

        let mut pending = self.lock_pending();
        if pending.as_ref().is_some_and(|t| t.same_as(&token)) {
            *pending = None;
        }
        result
    }

    /// Cancel the pending ask, if any.
    pub fn close(&self) {
        if let Some(token) = self.lock_pending().take() {
            token.cancel();
        }
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Option<CancellationToken>> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for AskSession {
    fn drop(&mut self) {
        self.close();
    }
}
