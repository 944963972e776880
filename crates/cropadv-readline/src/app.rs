//! REPL event loop.
//!
//! All model state lives in [`App`] and is only touched from [`App::run`].
//! Input lines and API completions arrive on one channel and are handled one
//! at a time; API calls run as spawned tasks that report back on it.

use std::sync::Arc;

use anyhow::Result;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use tokio::sync::mpsc;

use cropadv_application::{
    ChatInteractionModel, DistrictFetch, FormEvent, FormInteractionModel, PendingPrediction,
    PendingTurn, ShellEvent, ShellState, SubmitRejection, Tab, TurnOutcome,
};
use cropadv_core::chat::{ChatReply, CropRecommendation};
use cropadv_core::config::RootConfig;
use cropadv_core::form::{FormField, SoilMode};
use cropadv_core::prediction::PredictionResult;
use cropadv_core::reference::HealthStatus;
use cropadv_core::{AdvisoryApi, Language};

use crate::commands::{self, Command};
use crate::helper::CliHelper;
use crate::render;

/// Everything the event loop reacts to.
enum AppEvent {
    Line(String),
    Interrupted,
    Eof,
    InputFailed(String),
    ReferenceLoaded {
        states: cropadv_core::Result<Vec<String>>,
        months: cropadv_core::Result<Vec<String>>,
    },
    Districts {
        fetch: DistrictFetch,
        result: cropadv_core::Result<Vec<String>>,
    },
    Prediction {
        pending: PendingPrediction,
        result: cropadv_core::Result<PredictionResult>,
    },
    ChatReply {
        turn: PendingTurn,
        reply: cropadv_core::Result<ChatReply>,
    },
    Handoff(CropRecommendation),
    Health(Option<HealthStatus>),
}

/// Whether the loop keeps going after an event.
enum Flow {
    Continue,
    Prompt,
    Exit,
}

pub struct App {
    api: Arc<dyn AdvisoryApi>,
    config: RootConfig,
    shell: ShellState,
    form: FormInteractionModel,
    chat: Option<ChatInteractionModel>,
    events: mpsc::UnboundedSender<AppEvent>,
    inbox: mpsc::UnboundedReceiver<AppEvent>,
}

impl App {
    pub fn new(api: Arc<dyn AdvisoryApi>, config: RootConfig) -> Self {
        let (events, inbox) = mpsc::unbounded_channel();
        Self {
            api,
            shell: ShellState::new(config.ui.default_language),
            config,
            form: FormInteractionModel::new(),
            chat: None,
            events,
            inbox,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let (prompt_tx, prompt_rx) = mpsc::unbounded_channel::<String>();
        let input = tokio::task::spawn_blocking({
            let events = self.events.clone();
            move || read_lines(prompt_rx, events)
        });

        render::banner(self.shell.labels());
        self.load_reference_data();
        render::panels(&self.shell, &self.form, &[]);
        let _ = prompt_tx.send(self.prompt());

        while let Some(event) = self.inbox.recv().await {
            match self.handle(event) {
                Flow::Continue => {}
                Flow::Prompt => {
                    if prompt_tx.send(self.prompt()).is_err() {
                        break;
                    }
                }
                Flow::Exit => break,
            }
        }

        drop(prompt_tx);
        // Tears down the chat session and any pending hand-off.
        self.chat = None;
        let _ = input.await;
        tracing::info!("[Bootstrap] REPL stopped");
        Ok(())
    }

    fn prompt(&self) -> String {
        format!("[{}] >> ", self.shell.tab())
    }

    fn handle(&mut self, event: AppEvent) -> Flow {
        match event {
            AppEvent::Line(line) => self.handle_line(&line),
            AppEvent::Interrupted => {
                render::warning("CTRL-C detected. Type 'quit' to exit.");
                Flow::Prompt
            }
            AppEvent::Eof => {
                render::info("CTRL-D detected. Exiting...");
                Flow::Exit
            }
            AppEvent::InputFailed(message) => {
                tracing::error!("[REPL] Input error: {}", message);
                render::warning(&format!("Error: {message}"));
                Flow::Exit
            }
            AppEvent::ReferenceLoaded { states, months } => {
                if let Some(event) = self.form.apply_reference_data(states, months) {
                    self.on_form_event(event);
                }
                Flow::Continue
            }
            AppEvent::Districts { fetch, result } => {
                if self.form.apply_districts(&fetch, result) && !self.form.districts().is_empty() {
                    render::info(&format!(
                        "{}: {}",
                        self.shell.labels().form.district,
                        self.form.districts().join(", ")
                    ));
                }
                Flow::Continue
            }
            AppEvent::Prediction { pending, result } => {
                if let Some(event) = self.form.apply_prediction(&pending, result) {
                    self.on_form_event(event);
                }
                Flow::Continue
            }
            AppEvent::ChatReply { turn, reply } => {
                self.on_chat_reply(&turn, reply);
                Flow::Continue
            }
            AppEvent::Handoff(recommendation) => {
                self.apply_shell(ShellEvent::ChatHandoff(recommendation));
                Flow::Continue
            }
            AppEvent::Health(status) => {
                render::health(status.as_ref());
                Flow::Continue
            }
        }
    }

    fn handle_line(&mut self, line: &str) -> Flow {
        let command = match commands::parse(line, self.shell.tab()) {
            Ok(command) => command,
            Err(err) => {
                render::warning(&err.to_string());
                return Flow::Prompt;
            }
        };

        match command {
            Command::Empty => {}
            Command::Quit => {
                render::info("Goodbye!");
                return Flow::Exit;
            }
            Command::Help => render::help(self.shell.tab()),
            Command::SwitchTab(tab) => self.apply_shell(ShellEvent::TabSelected(tab)),
            Command::Language(language) => self.select_language(language),
            Command::Dismiss => {
                self.shell.apply(ShellEvent::ErrorDismissed);
            }
            Command::Health => self.check_health(),
            Command::Show => self.show(),
            Command::SetField(field, value) => self.set_field(field, &value),
            Command::Soil(mode) => {
                self.form.set_soil_mode(mode);
                render::form_panel(&self.form, self.shell.labels());
            }
            Command::Submit => self.submit_form(),
            Command::Chat(text) => self.send_chat(&text),
        }
        Flow::Prompt
    }

    fn show(&self) {
        let transcript = self.chat.as_ref().map(|chat| chat.transcript()).unwrap_or(&[]);
        render::panels(&self.shell, &self.form, transcript);
    }

    fn apply_shell(&mut self, event: ShellEvent) {
        let shows_error = matches!(event, ShellEvent::FormFailed(_));
        if !self.shell.apply(event) {
            if shows_error {
                if let Some(error) = self.shell.error() {
                    render::error_banner(error);
                }
            }
            return;
        }

        if self.shell.tab() == Tab::Chatbot {
            self.mount_chat();
        } else if self.chat.take().is_some() {
            tracing::debug!("[REPL] Chat view closed");
        }
        self.show();
    }

    fn select_language(&mut self, language: Language) {
        self.shell.apply(ShellEvent::LanguageSelected(language));
        if let Some(chat) = self.chat.as_mut() {
            chat.set_language(language);
        }
        render::language(language);
    }

    fn on_form_event(&mut self, event: FormEvent) {
        self.apply_shell(ShellEvent::from(event));
    }

    // ===== Form =====

    fn load_reference_data(&self) {
        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        tokio::spawn(async move {
            let (states, months) = tokio::join!(api.list_states(), api.list_months());
            let _ = events.send(AppEvent::ReferenceLoaded { states, months });
        });
    }

    fn set_field(&mut self, field: FormField, value: &str) {
        let value = match field {
            FormField::State => commands::resolve_option(self.form.states(), value),
            FormField::District => {
                if !self.form.district_enabled() {
                    render::warning(self.shell.labels().form.select_state);
                    return;
                }
                commands::resolve_option(self.form.districts(), value)
            }
            FormField::Month => commands::resolve_option(self.form.months(), value),
            _ => {
                if self.form.soil_mode() == SoilMode::Auto {
                    render::info("Soil values are auto-detected; 'soil manual' to enter your own.");
                }
                value.trim().to_string()
            }
        };

        if let Some(fetch) = self.form.set_field(field, value) {
            let api = Arc::clone(&self.api);
            let events = self.events.clone();
            tokio::spawn(async move {
                let result = api.list_districts(fetch.state()).await;
                let _ = events.send(AppEvent::Districts { fetch, result });
            });
        }
    }

    fn submit_form(&mut self) {
        let pending = match self.form.submit(self.shell.language()) {
            Ok(pending) => pending,
            Err(SubmitRejection::Busy) => {
                render::info(self.shell.labels().chrome.processing);
                return;
            }
            Err(rejection) => {
                render::form_panel(&self.form, self.shell.labels());
                if let Some(event) = rejection.into_event() {
                    self.on_form_event(event);
                }
                return;
            }
        };

        render::info(self.shell.labels().chrome.processing);
        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = api.predict(pending.request()).await;
            let _ = events.send(AppEvent::Prediction { pending, result });
        });
    }

    // ===== Chat =====

    fn mount_chat(&mut self) {
        if self.chat.is_some() {
            return;
        }
        let mut chat = ChatInteractionModel::new(self.shell.language(), &self.config.chat);
        if let Some(turn) = chat.begin_initialization() {
            self.dispatch_turn(turn);
        }
        self.chat = Some(chat);
    }

    fn send_chat(&mut self, text: &str) {
        let Some(chat) = self.chat.as_mut() else {
            return;
        };
        if chat.is_loading() {
            render::info(self.shell.labels().chrome.processing);
            return;
        }
        let Some(turn) = chat.submit(text) else {
            return;
        };
        if let Some(message) = chat.transcript().last() {
            render::chat_message(message);
        }
        self.dispatch_turn(turn);
    }

    fn dispatch_turn(&self, turn: PendingTurn) {
        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        tokio::spawn(async move {
            let reply = api.chat_turn(turn.request()).await;
            let _ = events.send(AppEvent::ChatReply { turn, reply });
        });
    }

    fn on_chat_reply(&mut self, turn: &PendingTurn, reply: cropadv_core::Result<ChatReply>) {
        let Some(chat) = self.chat.as_mut() else {
            tracing::warn!("[REPL] Chat reply for closed session {}", turn.session_id());
            return;
        };
        let outcome = chat.apply_reply(turn, reply);
        if let TurnOutcome::Completed { handoff } = outcome {
            if let Some(message) = chat.transcript().last() {
                render::chat_message(message);
            }
            if let Some(recommendation) = handoff {
                let events = self.events.clone();
                chat.schedule_handoff(recommendation, move |recommendation| {
                    let _ = events.send(AppEvent::Handoff(recommendation));
                });
            }
        }
    }

    fn check_health(&self) {
        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        tokio::spawn(async move {
            let status = api.health_check().await;
            let _ = events.send(AppEvent::Health(status));
        });
    }
}

/// Reads lines on a blocking thread, one prompt at a time.
fn read_lines(mut prompts: mpsc::UnboundedReceiver<String>, events: mpsc::UnboundedSender<AppEvent>) {
    let mut editor: Editor<CliHelper, DefaultHistory> = match Editor::new() {
        Ok(editor) => editor,
        Err(err) => {
            let _ = events.send(AppEvent::InputFailed(err.to_string()));
            return;
        }
    };
    editor.set_helper(Some(CliHelper::new()));

    while let Some(prompt) = prompts.blocking_recv() {
        let event = match editor.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                AppEvent::Line(line)
            }
            Err(ReadlineError::Interrupted) => AppEvent::Interrupted,
            Err(ReadlineError::Eof) => AppEvent::Eof,
            Err(err) => AppEvent::InputFailed(err.to_string()),
        };
        let done = matches!(event, AppEvent::Eof | AppEvent::InputFailed(_));
        if events.send(event).is_err() || done {
            break;
        }
    }
}
