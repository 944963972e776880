//! Chat interaction model.
//!
//! # Module Structure
//!
//! - `state`: Conversation phases (`ChatPhase`)
//! - `model`: The state machine (`ChatInteractionModel`, `PendingTurn`, `TurnOutcome`)
//! - `handoff`: Deferred delivery of final recommendations (`HandoffScheduler`)

mod handoff;
mod model;
mod state;

pub use handoff::HandoffScheduler;
pub use model::{
    CONNECT_FALLBACK, ChatInteractionModel, PendingTurn, TURN_FALLBACK, TurnOutcome,
};
pub use state::ChatPhase;
