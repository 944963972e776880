//! Chat session identity.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::language::Language;

/// Opaque identifier of one chat conversation (UUID format).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generates a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One chat conversation as seen by the client.
///
/// The id is fixed at construction and never regenerated; the language can be
/// switched at any time and applies to subsequent turns only. Nothing about a
/// session is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSession {
    id: SessionId,
    language: Language,
}

impl ChatSession {
    pub fn new(language: Language) -> Self {
        Self {
            id: SessionId::generate(),
            language,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }
}
