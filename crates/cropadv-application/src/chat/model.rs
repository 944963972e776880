//! Chat interaction state machine.

use cropadv_core::chat::{ChatReply, ChatTurnRequest, CropRecommendation};
use cropadv_core::config::ChatSettings;
use cropadv_core::session::{ChatMessage, ChatSession, SessionId};
use cropadv_core::{AdvisoryApi, Language, Result};
use tokio::task::JoinHandle;

use super::handoff::HandoffScheduler;
use super::state::ChatPhase;

/// Transcript entry used when the greeting turn fails.
pub const CONNECT_FALLBACK: &str = "Sorry, I'm having trouble connecting. Please try again.";
/// Transcript entry used when a user turn fails.
pub const TURN_FALLBACK: &str = "Sorry, something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TurnKind {
    Greeting,
    User,
}

/// Ticket for one outstanding chat turn.
///
/// Returned when a turn is started and handed back with the reply, so the
/// model can tell a current reply from a stale one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
    session_id: SessionId,
    seq: u64,
    kind: TurnKind,
    request: ChatTurnRequest,
}

impl PendingTurn {
    /// The request to send to the advisory API.
    pub fn request(&self) -> &ChatTurnRequest {
        &self.request
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn is_greeting(&self) -> bool {
        self.kind == TurnKind::Greeting
    }
}

/// What applying a reply (or attempting a turn) did.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Nothing was sent: empty input, or the model was not ready.
    Rejected,
    /// The reply did not belong to the outstanding turn and was ignored.
    Discarded,
    /// The transcript was updated. Carries the hand-off payload, if any.
    Completed {
        handoff: Option<CropRecommendation>,
    },
}

impl TurnOutcome {
    pub fn handoff(&self) -> Option<&CropRecommendation> {
        match self {
            TurnOutcome::Completed { handoff } => handoff.as_ref(),
            _ => None,
        }
    }
}

/// One mounted chat conversation.
///
/// Owns the session identity for its whole lifetime, the append-only
/// transcript, the input buffer and the conversation phase. At most one turn
/// is outstanding at a time. Dropping the model tears the session down and
/// cancels any hand-off that has not been delivered yet.
#[derive(Debug)]
pub struct ChatInteractionModel {
    session: ChatSession,
    phase: ChatPhase,
    transcript: Vec<ChatMessage>,
    input: String,
    greeting: String,
    next_seq: u64,
    outstanding: Option<u64>,
    handoffs: HandoffScheduler,
}

impl ChatInteractionModel {
    /// Mounts a new conversation with a fresh session id.
    pub fn new(language: Language, settings: &ChatSettings) -> Self {
        let session = ChatSession::new(language);
        tracing::info!("[Chat] Session {} created ({})", session.id(), language);
        Self {
            session,
            phase: ChatPhase::Uninitialized,
            transcript: Vec::new(),
            input: String::new(),
            greeting: settings.greeting.clone(),
            next_seq: 0,
            outstanding: None,
            handoffs: HandoffScheduler::new(settings.handoff_delay()),
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn phase(&self) -> ChatPhase {
        self.phase
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn is_loading(&self) -> bool {
        self.phase.is_loading()
    }

    /// Whether the send action is enabled.
    pub fn can_submit(&self) -> bool {
        self.phase == ChatPhase::Idle && !self.input.trim().is_empty()
    }

    /// Switches the language used for subsequent turns.
    pub fn set_language(&mut self, language: Language) {
        if self.session.language() != language {
            tracing::debug!("[Chat] Session {} language -> {}", self.session.id(), language);
            self.session.set_language(language);
        }
    }

    /// Starts the greeting turn. Only the first call does anything.
    pub fn begin_initialization(&mut self) -> Option<PendingTurn> {
        if self.phase != ChatPhase::Uninitialized {
            return None;
        }
        self.phase = ChatPhase::Initializing;
        let greeting = self.greeting.clone();
        Some(self.issue(TurnKind::Greeting, greeting))
    }

    /// Submits the current input buffer.
    ///
    /// Whitespace-only input and submissions outside `Idle` are rejected
    /// without touching the transcript. Otherwise the user's message is
    /// appended right away, the buffer is cleared and input is disabled until
    /// the reply is applied.
    pub fn submit_input(&mut self) -> Option<PendingTurn> {
        if !self.can_submit() {
            return None;
        }
        let text = std::mem::take(&mut self.input);
        self.transcript.push(ChatMessage::user(text.clone()));
        self.phase = ChatPhase::AwaitingResponse;
        Some(self.issue(TurnKind::User, text))
    }

    /// Replaces the input buffer with `text` and submits it.
    pub fn submit(&mut self, text: &str) -> Option<PendingTurn> {
        if self.phase != ChatPhase::Idle || text.trim().is_empty() {
            return None;
        }
        self.input = text.to_string();
        self.submit_input()
    }

    /// Applies the outcome of `turn`.
    ///
    /// Success appends the assistant's message; failure appends a fixed
    /// fallback and is never surfaced further. Replies for turns that are not
    /// outstanding are discarded.
    pub fn apply_reply(&mut self, turn: &PendingTurn, reply: Result<ChatReply>) -> TurnOutcome {
        if turn.session_id != *self.session.id() || self.outstanding != Some(turn.seq) {
            tracing::warn!(
                "[Chat] Discarding stale reply for session {} turn {}",
                turn.session_id,
                turn.seq
            );
            return TurnOutcome::Discarded;
        }
        self.outstanding = None;
        self.phase = ChatPhase::Idle;

        match reply {
            Ok(reply) => {
                self.transcript.push(ChatMessage::from_reply(&reply));
                if let Some(recommendation) = &reply.crop_recommendation {
                    tracing::info!(
                        "[Chat] Session {} produced a recommendation ({:?})",
                        self.session.id(),
                        recommendation.crop()
                    );
                }
                TurnOutcome::Completed {
                    handoff: reply.crop_recommendation,
                }
            }
            Err(err) => {
                tracing::error!("[Chat] Turn failed for session {}: {}", self.session.id(), err);
                let fallback = match turn.kind {
                    TurnKind::Greeting => CONNECT_FALLBACK,
                    TurnKind::User => TURN_FALLBACK,
                };
                self.transcript.push(ChatMessage::assistant(fallback));
                TurnOutcome::Completed { handoff: None }
            }
        }
    }

    /// Delivers `recommendation` through `deliver` after the hand-off delay,
    /// unless this model is dropped first.
    pub fn schedule_handoff<F>(&self, recommendation: CropRecommendation, deliver: F) -> JoinHandle<bool>
    where
        F: FnOnce(CropRecommendation) + Send + 'static,
    {
        self.handoffs.schedule(recommendation, deliver)
    }

    /// Sends the greeting and applies the reply.
    pub async fn initialize(&mut self, api: &dyn AdvisoryApi) -> TurnOutcome {
        let Some(turn) = self.begin_initialization() else {
            return TurnOutcome::Rejected;
        };
        let reply = api.chat_turn(turn.request()).await;
        self.apply_reply(&turn, reply)
    }

    /// Sends one user message and applies the reply.
    pub async fn send(&mut self, api: &dyn AdvisoryApi, text: &str) -> TurnOutcome {
        let Some(turn) = self.submit(text) else {
            return TurnOutcome::Rejected;
        };
        let reply = api.chat_turn(turn.request()).await;
        self.apply_reply(&turn, reply)
    }

    fn issue(&mut self, kind: TurnKind, message: String) -> PendingTurn {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.outstanding = Some(seq);
        tracing::debug!("[Chat] Session {} turn {} ({:?})", self.session.id(), seq, kind);
        PendingTurn {
            session_id: self.session.id().clone(),
            seq,
            kind,
            request: ChatTurnRequest::new(&self.session, message),
        }
    }
}

impl Drop for ChatInteractionModel {
    fn drop(&mut self) {
        tracing::info!("[Chat] Session {} torn down", self.session.id());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cropadv_core::AdvisoryError;
    use cropadv_core::session::Speaker;
    use cropadv_core::test_support::RecordingApi;
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn reply(value: serde_json::Value) -> Result<ChatReply> {
        Ok(serde_json::from_value(value).unwrap())
    }

    fn model() -> ChatInteractionModel {
        ChatInteractionModel::new(Language::En, &ChatSettings::default())
    }

    async fn ready_model(api: &RecordingApi) -> ChatInteractionModel {
        api.push_chat_reply(reply(json!({"message": "Hi, tell me your state", "requires_input": true})));
        let mut chat = model();
        chat.initialize(api).await;
        chat
    }

    #[tokio::test]
    async fn greeting_seeds_exactly_one_assistant_message() {
        let api = RecordingApi::new();
        api.push_chat_reply(reply(json!({"message": "Hi, tell me your state", "requires_input": true})));
        let mut chat = model();

        let outcome = chat.initialize(&api).await;

        assert_eq!(outcome, TurnOutcome::Completed { handoff: None });
        assert_eq!(chat.phase(), ChatPhase::Idle);
        assert_eq!(chat.transcript().len(), 1);
        assert_eq!(chat.transcript()[0].speaker, Speaker::Assistant);
        assert_eq!(chat.transcript()[0].text, "Hi, tell me your state");
        assert!(chat.transcript()[0].awaiting_further_input);

        let sent = api.chat_calls();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].message, "hello");
        assert_eq!(sent[0].session_id, chat.session().id().to_string());
        assert_eq!(sent[0].language, Language::En);
    }

    #[tokio::test]
    async fn initialization_is_idempotent() {
        let api = RecordingApi::new();
        let mut chat = ready_model(&api).await;

        assert!(chat.begin_initialization().is_none());
        assert_eq!(chat.initialize(&api).await, TurnOutcome::Rejected);
        assert_eq!(api.chat_calls().len(), 1);
        assert_eq!(chat.transcript().len(), 1);
    }

    #[test]
    fn initialization_guard_holds_while_greeting_is_outstanding() {
        let mut chat = model();
        let first = chat.begin_initialization();
        assert!(first.is_some());
        assert!(first.unwrap().is_greeting());
        assert!(chat.begin_initialization().is_none());
        assert_eq!(chat.phase(), ChatPhase::Initializing);
        assert!(chat.is_loading());
    }

    #[tokio::test]
    async fn failed_greeting_uses_connection_fallback() {
        let api = RecordingApi::new();
        api.push_chat_reply(Err(AdvisoryError::api("Chat failed")));
        let mut chat = model();

        chat.initialize(&api).await;

        assert_eq!(chat.phase(), ChatPhase::Idle);
        assert_eq!(chat.transcript().len(), 1);
        assert_eq!(chat.transcript()[0].text, CONNECT_FALLBACK);
    }

    #[tokio::test]
    async fn whitespace_input_changes_nothing() {
        let api = RecordingApi::new();
        let mut chat = ready_model(&api).await;

        assert_eq!(chat.send(&api, "   \t ").await, TurnOutcome::Rejected);
        chat.set_input("  ");
        assert!(!chat.can_submit());
        assert!(chat.submit_input().is_none());

        assert_eq!(chat.transcript().len(), 1);
        assert_eq!(api.chat_calls().len(), 1);
        assert_eq!(chat.phase(), ChatPhase::Idle);
    }

    #[tokio::test]
    async fn user_message_is_appended_before_the_reply() {
        let api = RecordingApi::new();
        let mut chat = ready_model(&api).await;
        chat.set_input("Pune");

        let turn = chat.submit_input().unwrap();

        assert_eq!(chat.input(), "");
        assert_eq!(chat.phase(), ChatPhase::AwaitingResponse);
        assert!(!chat.can_submit());
        assert_eq!(chat.transcript().len(), 2);
        assert!(chat.transcript()[1].is_user());
        assert_eq!(chat.transcript()[1].text, "Pune");
        assert_eq!(turn.request().message, "Pune");

        // A second submission while waiting is refused.
        assert!(chat.submit("Maharashtra").is_none());

        let outcome = chat.apply_reply(&turn, reply(json!({"message": "Which month?"})));
        assert_eq!(outcome, TurnOutcome::Completed { handoff: None });
        assert_eq!(chat.transcript().len(), 3);
        assert_eq!(chat.transcript()[2].text, "Which month?");
        assert_eq!(chat.phase(), ChatPhase::Idle);
    }

    #[tokio::test]
    async fn failed_turn_appends_fallback_and_keeps_session() {
        let api = RecordingApi::new();
        let mut chat = ready_model(&api).await;
        let id = chat.session().id().clone();
        api.push_chat_reply(Err(AdvisoryError::api_status(500, "Chatbot error: boom")));

        chat.send(&api, "June").await;

        assert_eq!(chat.transcript().len(), 3);
        assert_eq!(chat.transcript()[2].text, TURN_FALLBACK);
        assert_eq!(chat.session().id(), &id);

        api.push_chat_reply(reply(json!({"message": "Let's try again"})));
        chat.send(&api, "June").await;
        let sent = api.chat_calls();
        assert!(sent.iter().all(|request| request.session_id == id.to_string()));
    }

    #[tokio::test]
    async fn language_change_applies_to_next_turn_only() {
        let api = RecordingApi::new();
        let mut chat = ready_model(&api).await;

        chat.set_language(Language::Hi);
        api.push_chat_reply(reply(json!({"message": "ठीक है"})));
        chat.send(&api, "namaste").await;

        let sent = api.chat_calls();
        assert_eq!(sent[0].language, Language::En);
        assert_eq!(sent[1].language, Language::Hi);
    }

    #[tokio::test]
    async fn stale_reply_is_discarded() {
        let api = RecordingApi::new();
        let mut chat = ready_model(&api).await;
        let turn = chat.submit("Rice?").unwrap();

        let outcome = chat.apply_reply(&turn, reply(json!({"message": "first"})));
        assert!(matches!(outcome, TurnOutcome::Completed { .. }));

        // Same ticket again: no longer outstanding.
        let again = chat.apply_reply(&turn, reply(json!({"message": "duplicate"})));
        assert_eq!(again, TurnOutcome::Discarded);
        assert_eq!(chat.transcript().len(), 3);

        // Ticket from another session.
        let mut other = model();
        let foreign = other.begin_initialization().unwrap();
        assert_eq!(chat.apply_reply(&foreign, reply(json!({"message": "x"}))), TurnOutcome::Discarded);
    }

    #[tokio::test(start_paused = true)]
    async fn recommendation_is_handed_off_once_after_delay() {
        let api = RecordingApi::new();
        let mut chat = ready_model(&api).await;
        api.push_chat_reply(reply(json!({
            "message": "For Pune in June, I recommend Rice.",
            "requires_input": false,
            "crop_recommendation": {"crop": "Rice", "confidence": 87}
        })));

        let outcome = chat.send(&api, "June").await;
        let recommendation = outcome.handoff().cloned().unwrap();
        assert_eq!(chat.transcript().last().unwrap().text, "For Pune in June, I recommend Rice.");

        let delivered = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&delivered);
        let handle = chat.schedule_handoff(recommendation, move |rec| {
            sink.lock().unwrap().push(rec);
        });

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(delivered.lock().unwrap().is_empty());

        assert!(handle.await.unwrap());
        let delivered = delivered.lock().unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].payload(), &json!({"crop": "Rice", "confidence": 87}));
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_cancels_pending_handoff() {
        let api = RecordingApi::new();
        let chat = ready_model(&api).await;
        let fired = Arc::new(Mutex::new(false));
        let flag = Arc::clone(&fired);

        let handle = chat.schedule_handoff(
            CropRecommendation::new(json!({"crop": "Maize"})),
            move |_| *flag.lock().unwrap() = true,
        );
        drop(chat);

        assert!(!handle.await.unwrap());
        assert!(!*fired.lock().unwrap());
    }
}
