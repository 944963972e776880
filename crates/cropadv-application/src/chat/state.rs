//! Conversation phases.

/// Where a chat conversation stands.
///
/// `Uninitialized → Initializing → Idle ⇄ AwaitingResponse`. There is no
/// closing phase; the conversation ends when the model is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatPhase {
    /// Created, greeting not sent yet.
    Uninitialized,
    /// Greeting turn outstanding.
    Initializing,
    /// Ready for user input.
    Idle,
    /// A user turn is outstanding; input is disabled.
    AwaitingResponse,
}

impl ChatPhase {
    /// Whether a request is outstanding (the typing indicator is shown).
    pub fn is_loading(self) -> bool {
        matches!(self, ChatPhase::Initializing | ChatPhase::AwaitingResponse)
    }
}
