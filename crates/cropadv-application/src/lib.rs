//! Interaction models and composition layer of the crop advisory client.
//!
//! - [`chat`]: session-scoped conversation with the advisory assistant
//! - [`form`]: crop recommendation form and its submission lifecycle
//! - [`shell`]: tab selection, error banner, language, visible panels
//! - [`result_view`]: localized rendering of prediction results
//!
//! The models are plain state machines: each user action returns a ticket
//! describing the request to make, and the response is fed back with that
//! ticket. Async helpers are provided for callers that simply await the API.

pub mod chat;
pub mod form;
pub mod result_view;
pub mod shell;

pub use chat::{ChatInteractionModel, ChatPhase, HandoffScheduler, PendingTurn, TurnOutcome};
pub use form::{DistrictFetch, FormEvent, FormInteractionModel, PendingPrediction, SubmitRejection};
pub use shell::{Panel, ShellEvent, ShellState, Tab};
