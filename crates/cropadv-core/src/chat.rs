//! Chat turn request and reply types (`POST /chatbot/`).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::language::Language;
use crate::session::ChatSession;

/// Body of one chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatTurnRequest {
    pub message: String,
    pub session_id: String,
    pub language: Language,
}

impl ChatTurnRequest {
    /// Builds a turn for `session` using its current language.
    pub fn new(session: &ChatSession, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            session_id: session.id().to_string(),
            language: session.language(),
        }
    }
}

/// Reply to a chat turn.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatReply {
    pub message: String,
    /// Server hint that the dialogue is not finished yet.
    #[serde(default, deserialize_with = "deserialize_input_hint")]
    pub requires_input: bool,
    #[serde(default)]
    pub next_step: Option<String>,
    #[serde(default)]
    pub crop_recommendation: Option<CropRecommendation>,
}

/// Final recommendation attached to a chat reply.
///
/// The payload is opaque; `crop` and `confidence` are read when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CropRecommendation(Value);

impl CropRecommendation {
    pub fn new(payload: Value) -> Self {
        Self(payload)
    }

    pub fn crop(&self) -> Option<&str> {
        self.0.get("crop").and_then(Value::as_str)
    }

    pub fn confidence(&self) -> Option<f64> {
        self.0.get("confidence").and_then(Value::as_f64)
    }

    pub fn payload(&self) -> &Value {
        &self.0
    }
}

// The service has sent this hint as a bool, as null, and as a list of the
// fields it still needs.
fn deserialize_input_hint<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(flag) => flag,
        Value::Array(items) => !items.is_empty(),
        Value::String(text) => !text.is_empty(),
        _ => false,
    })
}
