//! Recording [`AdvisoryApi`] double for interaction-model tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{
    AdvisoryApi, CHAT_FAILED, FETCH_DISTRICTS_FAILED, FETCH_MONTHS_FAILED, FETCH_STATES_FAILED,
    PREDICTION_FAILED,
};
use crate::chat::{ChatReply, ChatTurnRequest};
use crate::error::{AdvisoryError, Result};
use crate::prediction::{PredictionRequest, PredictionResult};
use crate::reference::HealthStatus;

/// One call received by [`RecordingApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Predict(PredictionRequest),
    Chat(ChatTurnRequest),
    States,
    Districts(String),
    Months,
    Health,
}

/// Scripted API: replies are queued per operation and every call is recorded.
///
/// Unscripted calls fail with the operation's fallback message.
#[derive(Default)]
pub struct RecordingApi {
    calls: Mutex<Vec<ApiCall>>,
    predictions: Mutex<VecDeque<Result<PredictionResult>>>,
    chat_replies: Mutex<VecDeque<Result<ChatReply>>>,
    states: Mutex<Option<Result<Vec<String>>>>,
    months: Mutex<Option<Result<Vec<String>>>>,
    districts: Mutex<HashMap<String, Result<Vec<String>>>>,
    health: Mutex<Option<HealthStatus>>,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_prediction(&self, reply: Result<PredictionResult>) {
        self.predictions.lock().unwrap().push_back(reply);
    }

    pub fn push_chat_reply(&self, reply: Result<ChatReply>) {
        self.chat_replies.lock().unwrap().push_back(reply);
    }

    pub fn set_states(&self, reply: Result<Vec<String>>) {
        *self.states.lock().unwrap() = Some(reply);
    }

    pub fn set_months(&self, reply: Result<Vec<String>>) {
        *self.months.lock().unwrap() = Some(reply);
    }

    pub fn set_districts(&self, state: &str, reply: Result<Vec<String>>) {
        self.districts
            .lock()
            .unwrap()
            .insert(state.to_string(), reply);
    }

    pub fn set_health(&self, health: Option<HealthStatus>) {
        *self.health.lock().unwrap() = health;
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn chat_calls(&self) -> Vec<ChatTurnRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ApiCall::Chat(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    pub fn prediction_calls(&self) -> Vec<PredictionRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ApiCall::Predict(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl AdvisoryApi for RecordingApi {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult> {
        self.record(ApiCall::Predict(request.clone()));
        self.predictions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AdvisoryError::api(PREDICTION_FAILED)))
    }

    async fn chat_turn(&self, request: &ChatTurnRequest) -> Result<ChatReply> {
        self.record(ApiCall::Chat(request.clone()));
        self.chat_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AdvisoryError::api(CHAT_FAILED)))
    }

    async fn list_states(&self) -> Result<Vec<String>> {
        self.record(ApiCall::States);
        self.states
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(AdvisoryError::api(FETCH_STATES_FAILED)))
    }

    async fn list_districts(&self, state: &str) -> Result<Vec<String>> {
        self.record(ApiCall::Districts(state.to_string()));
        self.districts
            .lock()
            .unwrap()
            .get(state)
            .cloned()
            .unwrap_or_else(|| Err(AdvisoryError::api(FETCH_DISTRICTS_FAILED)))
    }

    async fn list_months(&self) -> Result<Vec<String>> {
        self.record(ApiCall::Months);
        self.months
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(AdvisoryError::api(FETCH_MONTHS_FAILED)))
    }

    async fn health_check(&self) -> Option<HealthStatus> {
        self.record(ApiCall::Health);
        self.health.lock().unwrap().clone()
    }
}
