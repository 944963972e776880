//! Domain model of the Smart Crop Advisory client.
//!
//! Wire types for the advisory API, the [`api::AdvisoryApi`] contract, chat
//! session and transcript types, form input and validation, localized labels
//! and the configuration schema. Nothing in this crate performs IO.

pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod form;
pub mod labels;
pub mod language;
pub mod prediction;
pub mod reference;
pub mod session;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

// Re-export common types
pub use api::AdvisoryApi;
pub use error::{AdvisoryError, Result};
pub use language::Language;
