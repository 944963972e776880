//! Conversation transcript entries.

use serde::{Deserialize, Serialize};

use crate::chat::ChatReply;

/// Who a transcript entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// Message typed by the user.
    User,
    /// Message from the advisory assistant (or a local fallback).
    Assistant,
}

/// A single entry of the visible transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub text: String,
    /// Advisory hint from the server that the dialogue is not complete.
    pub awaiting_further_input: bool,
    /// Optional follow-up prompt the server attached to its reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_step: Option<String>,
    /// Timestamp when the message was created (ISO 8601 format).
    pub timestamp: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Speaker::User, text.into(), false, None)
    }

    /// A locally generated assistant message (fallbacks).
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Speaker::Assistant, text.into(), false, None)
    }

    pub fn from_reply(reply: &ChatReply) -> Self {
        Self::new(
            Speaker::Assistant,
            reply.message.clone(),
            reply.requires_input,
            reply.next_step.clone(),
        )
    }

    fn new(speaker: Speaker, text: String, awaiting: bool, next_step: Option<String>) -> Self {
        Self {
            speaker,
            text,
            awaiting_further_input: awaiting,
            next_step,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.speaker == Speaker::User
    }
}
