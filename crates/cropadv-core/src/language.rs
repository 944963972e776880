//! Supported interface and conversation languages.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// A language the advisory service can answer in.
///
/// Serialized as its lowercase tag (`en`, `hi`, `mr`), which is also the value
/// sent to the API with every prediction and chat turn.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Language {
    #[default]
    En,
    Hi,
    Mr,
}

impl Language {
    /// The wire tag for this language.
    pub fn tag(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Mr => "mr",
        }
    }

    /// Name of the language written in that language, for the selector.
    pub fn native_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "हिंदी",
            Language::Mr => "मराठी",
        }
    }

    /// Parses a tag, falling back to English when it is not recognized.
    pub fn from_tag_or_default(tag: &str) -> Self {
        tag.trim().parse().unwrap_or_default()
    }

    /// All supported languages in selector order.
    pub fn all() -> impl Iterator<Item = Language> {
        Language::iter()
    }
}
