//! Chat session domain module.
//!
//! # Module Structure
//!
//! - `model`: Session identity and language (`ChatSession`, `SessionId`)
//! - `message`: Transcript entries (`Speaker`, `ChatMessage`)

mod message;
mod model;

// Re-export public API
pub use message::{ChatMessage, Speaker};
pub use model::{ChatSession, SessionId};
