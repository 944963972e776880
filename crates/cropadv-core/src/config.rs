//! Client configuration schema.
//!
//! Loading lives in `cropadv-infrastructure`; this module only defines the
//! shape of `config.toml` and its defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::language::Language;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_GREETING: &str = "hello";
pub const DEFAULT_HANDOFF_DELAY_MS: u64 = 1000;

/// Root of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RootConfig {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub chat: ChatSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

/// Where the advisory API lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Chat behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSettings {
    /// Turn sent automatically when a chat session starts.
    #[serde(default = "default_greeting")]
    pub greeting: String,
    /// Pause between showing a final recommendation and switching views.
    #[serde(default = "default_handoff_delay_ms")]
    pub handoff_delay_ms: u64,
}

impl ChatSettings {
    pub fn handoff_delay(&self) -> Duration {
        Duration::from_millis(self.handoff_delay_ms)
    }
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            greeting: default_greeting(),
            handoff_delay_ms: default_handoff_delay_ms(),
        }
    }
}

/// Presentation defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiSettings {
    #[serde(default)]
    pub default_language: Language,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_greeting() -> String {
    DEFAULT_GREETING.to_string()
}

fn default_handoff_delay_ms() -> u64 {
    DEFAULT_HANDOFF_DELAY_MS
}
