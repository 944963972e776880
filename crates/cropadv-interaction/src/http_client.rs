//! HttpAdvisoryClient - REST implementation of the advisory API.
//!
//! Each operation is exactly one HTTP exchange. No retry, no timeout and no
//! backoff are configured; a hanging request suspends its caller until the
//! server answers or the connection drops.

use async_trait::async_trait;
use cropadv_core::api::{
    AdvisoryApi, CHAT_FAILED, FETCH_DISTRICTS_FAILED, FETCH_MONTHS_FAILED, FETCH_STATES_FAILED,
    PREDICTION_FAILED,
};
use cropadv_core::chat::{ChatReply, ChatTurnRequest};
use cropadv_core::prediction::{PredictionRequest, PredictionResult};
use cropadv_core::reference::{DistrictsResponse, HealthStatus, MonthsResponse, StatesResponse};
use cropadv_core::{AdvisoryError, Result};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Client for the crop advisory REST API.
#[derive(Clone, Debug)]
pub struct HttpAdvisoryClient {
    client: Client,
    base_url: Url,
}

impl HttpAdvisoryClient {
    /// Creates a client for the service rooted at `base_url`.
    ///
    /// The base may carry a path prefix (`http://host/api`); a trailing slash
    /// is optional.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates a client reusing an existing `reqwest` client.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url.trim()).map_err(|err| {
            AdvisoryError::config(format!("Invalid API base URL '{base_url}': {err}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AdvisoryError::config(format!(
                "API base URL '{base_url}' cannot carry a path"
            )));
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins path segments onto the base URL. Segments are percent-encoded,
    /// so state names with spaces stay a single segment.
    fn endpoint(&self, segments: &[&str], trailing_slash: bool) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
            if trailing_slash {
                path.push("");
            }
        }
        url
    }

    async fn post_json<B, T>(&self, url: Url, body: &B, fallback: &'static str) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| transport_error(fallback, err))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            let err = map_http_error(status, &body_text, fallback);
            tracing::error!("{} ({}): {}", fallback, status, err);
            return Err(err);
        }

        response.json::<T>().await.map_err(|err| {
            tracing::error!("{}: unreadable response body: {}", fallback, err);
            AdvisoryError::api_status(status.as_u16(), fallback)
        })
    }

    async fn get_json<T>(&self, url: Url, fallback: &'static str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| transport_error(fallback, err))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("{} ({})", fallback, status);
            return Err(AdvisoryError::api_status(status.as_u16(), fallback));
        }

        response.json::<T>().await.map_err(|err| {
            tracing::error!("{}: unreadable response body: {}", fallback, err);
            AdvisoryError::api_status(status.as_u16(), fallback)
        })
    }
}

#[async_trait]
impl AdvisoryApi for HttpAdvisoryClient {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult> {
        let url = self.endpoint(&["predict"], true);
        self.post_json(url, request, PREDICTION_FAILED).await
    }

    async fn chat_turn(&self, request: &ChatTurnRequest) -> Result<ChatReply> {
        let url = self.endpoint(&["chatbot"], true);
        self.post_json(url, request, CHAT_FAILED).await
    }

    async fn list_states(&self) -> Result<Vec<String>> {
        let url = self.endpoint(&["states"], true);
        let body: StatesResponse = self.get_json(url, FETCH_STATES_FAILED).await?;
        Ok(body.states)
    }

    async fn list_districts(&self, state: &str) -> Result<Vec<String>> {
        let url = self.endpoint(&["districts", state], false);
        let body: DistrictsResponse = self.get_json(url, FETCH_DISTRICTS_FAILED).await?;
        Ok(body.districts)
    }

    async fn list_months(&self) -> Result<Vec<String>> {
        let url = self.endpoint(&["months"], true);
        let body: MonthsResponse = self.get_json(url, FETCH_MONTHS_FAILED).await?;
        Ok(body.months)
    }

    async fn health_check(&self) -> Option<HealthStatus> {
        let url = self.endpoint(&["health"], false);
        match self.get_json::<HealthStatus>(url, "Health check failed").await {
            Ok(status) => Some(status),
            Err(err) => {
                tracing::warn!("Health check failed: {}", err);
                None
            }
        }
    }
}

#[derive(Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Maps a non-success response to the client error kind.
///
/// Uses the server's `detail` string when the body is `{ "detail": "..." }`;
/// any other body (validation error lists, HTML, empty) yields `fallback`.
fn map_http_error(status: StatusCode, body: &str, fallback: &str) -> AdvisoryError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|wrapper| wrapper.detail)
        .and_then(|detail| detail.as_str().map(str::to_string))
        .filter(|detail| !detail.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());

    AdvisoryError::api_status(status.as_u16(), message)
}

fn transport_error(fallback: &str, err: reqwest::Error) -> AdvisoryError {
    tracing::error!("{}: request failed: {}", fallback, err);
    AdvisoryError::api(fallback)
}
