//! The advisory API contract.
//!
//! Interaction models only talk to the service through [`AdvisoryApi`], so
//! they can be driven by the HTTP client in production and by a recording
//! double in tests.

use async_trait::async_trait;

use crate::chat::{ChatReply, ChatTurnRequest};
use crate::error::Result;
use crate::prediction::{PredictionRequest, PredictionResult};
use crate::reference::HealthStatus;

/// Fallback message when a prediction fails without a server detail.
pub const PREDICTION_FAILED: &str = "Prediction failed";
/// Fallback message when a chat turn fails without a server detail.
pub const CHAT_FAILED: &str = "Chat failed";
pub const FETCH_STATES_FAILED: &str = "Failed to fetch states";
pub const FETCH_DISTRICTS_FAILED: &str = "Failed to fetch districts";
pub const FETCH_MONTHS_FAILED: &str = "Failed to fetch months";

/// Remote crop advisory service.
///
/// Every operation is a single request/response exchange. Implementations
/// must not retry, and every failure except the health check is reported as
/// [`crate::AdvisoryError::Api`] carrying a displayable message.
#[async_trait]
pub trait AdvisoryApi: Send + Sync {
    /// Ranks crops for a form submission.
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult>;

    /// Sends one chat turn and returns the assistant's reply.
    async fn chat_turn(&self, request: &ChatTurnRequest) -> Result<ChatReply>;

    async fn list_states(&self) -> Result<Vec<String>>;

    async fn list_districts(&self, state: &str) -> Result<Vec<String>>;

    async fn list_months(&self) -> Result<Vec<String>>;

    /// Probes the service. Never fails; `None` means unreachable or unhealthy.
    async fn health_check(&self) -> Option<HealthStatus>;
}
