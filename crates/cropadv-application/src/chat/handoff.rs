//! Deferred delivery of chat recommendations.

use std::time::Duration;

use cropadv_core::chat::CropRecommendation;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Delivers final recommendations after a fixed pause.
///
/// Every scheduled delivery holds a child of the scheduler's lifetime token.
/// Dropping the scheduler (the chat view going away) cancels all deliveries
/// that have not fired yet.
#[derive(Debug)]
pub struct HandoffScheduler {
    delay: Duration,
    lifetime: CancellationToken,
}

impl HandoffScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            lifetime: CancellationToken::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Spawns a task that calls `deliver` once the delay has elapsed.
    ///
    /// Must be called from within a tokio runtime. The task resolves to
    /// `true` when the recommendation was delivered and `false` when it was
    /// cancelled first.
    pub fn schedule<F>(&self, recommendation: CropRecommendation, deliver: F) -> JoinHandle<bool>
    where
        F: FnOnce(CropRecommendation) + Send + 'static,
    {
        let token = self.lifetime.child_token();
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!("[Chat] Hand-off cancelled before delivery");
                    false
                }
                _ = tokio::time::sleep(delay) => {
                    deliver(recommendation);
                    true
                }
            }
        })
    }

    /// Cancels every delivery scheduled so far. Later schedules still fire.
    pub fn cancel_pending(&mut self) {
        self.lifetime.cancel();
        self.lifetime = CancellationToken::new();
    }
}

impl Drop for HandoffScheduler {
    fn drop(&mut self) {
        self.lifetime.cancel();
    }
}
