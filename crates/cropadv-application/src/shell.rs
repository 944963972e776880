//! Composition layer: which tab is open, what is shown on it, and the
//! single error banner shared by every view.

use cropadv_core::Language;
use cropadv_core::chat::CropRecommendation;
use cropadv_core::labels::{Labels, labels_for};
use cropadv_core::prediction::PredictionResult;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::form::FormEvent;

/// Top-level view selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Tab {
    #[default]
    Form,
    #[strum(to_string = "chatbot", serialize = "chat")]
    Chatbot,
    Result,
}

impl Tab {
    pub fn all() -> impl Iterator<Item = Tab> {
        Tab::iter()
    }

    pub fn label(self, labels: &Labels) -> &'static str {
        match self {
            Tab::Form => labels.chrome.form_tab,
            Tab::Chatbot => labels.chrome.chatbot_tab,
            Tab::Result => labels.chrome.result_tab,
        }
    }
}

/// Something the active tab displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Form,
    Chat,
    /// The last prediction's result card.
    Result,
    /// Summary of the recommendation handed over by the chat.
    Recommendation,
}

/// Input to [`ShellState::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    PredictionSucceeded(PredictionResult),
    FormFailed(String),
    ChatHandoff(CropRecommendation),
    ErrorDismissed,
    TabSelected(Tab),
    LanguageSelected(Language),
}

impl From<FormEvent> for ShellEvent {
    fn from(event: FormEvent) -> Self {
        match event {
            FormEvent::Succeeded(result) => ShellEvent::PredictionSucceeded(result),
            FormEvent::Failed(message) => ShellEvent::FormFailed(message),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShellState {
    tab: Tab,
    language: Language,
    error: Option<String>,
    prediction: Option<PredictionResult>,
    handoff: Option<CropRecommendation>,
}

impl ShellState {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn prediction(&self) -> Option<&PredictionResult> {
        self.prediction.as_ref()
    }

    pub fn handoff(&self) -> Option<&CropRecommendation> {
        self.handoff.as_ref()
    }

    pub fn labels(&self) -> &'static Labels {
        labels_for(self.language)
    }

    /// Applies an event. Returns `true` when the selected tab changed.
    pub fn apply(&mut self, event: ShellEvent) -> bool {
        let before = self.tab;
        match event {
            ShellEvent::PredictionSucceeded(result) => {
                self.prediction = Some(result);
                self.error = None;
                self.tab = Tab::Result;
            }
            ShellEvent::FormFailed(message) => {
                self.error = Some(message);
                self.prediction = None;
            }
            ShellEvent::ChatHandoff(recommendation) => {
                tracing::info!("[Shell] Chat recommendation received: {:?}", recommendation.crop());
                self.handoff = Some(recommendation);
                self.tab = Tab::Result;
            }
            ShellEvent::ErrorDismissed => self.error = None,
            ShellEvent::TabSelected(tab) => self.tab = tab,
            ShellEvent::LanguageSelected(language) => self.language = language,
        }
        if self.tab != before {
            tracing::debug!("[Shell] Tab {} -> {}", before, self.tab);
        }
        self.tab != before
    }

    /// Panels shown on the current tab, top to bottom.
    pub fn visible_panels(&self) -> Vec<Panel> {
        match self.tab {
            Tab::Form => {
                let mut panels = vec![Panel::Form];
                if self.prediction.is_some() {
                    panels.push(Panel::Result);
                }
                panels
            }
            Tab::Chatbot => vec![Panel::Chat],
            Tab::Result => match (&self.prediction, &self.handoff) {
                (Some(_), _) => vec![Panel::Result],
                (None, Some(_)) => vec![Panel::Recommendation],
                (None, None) => Vec::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result() -> PredictionResult {
        serde_json::from_value(json!({
            "top_predictions": [{"crop": "Wheat", "confidence": 64.0}],
            "risk_level": "Medium Risk",
            "advisory_message": "Sow early"
        }))
        .unwrap()
    }

    #[test]
    fn tabs_parse_from_commands() {
        assert_eq!("chat".parse::<Tab>().unwrap(), Tab::Chatbot);
        assert_eq!("Chatbot".parse::<Tab>().unwrap(), Tab::Chatbot);
        assert_eq!("result".parse::<Tab>().unwrap(), Tab::Result);
        assert_eq!(Tab::Chatbot.to_string(), "chatbot");
    }

    #[test]
    fn prediction_success_switches_to_result_and_clears_error() {
        let mut shell = ShellState::new(Language::En);
        shell.apply(ShellEvent::FormFailed("Prediction failed".into()));
        assert_eq!(shell.error(), Some("Prediction failed"));

        let changed = shell.apply(ShellEvent::PredictionSucceeded(result()));

        assert!(changed);
        assert_eq!(shell.tab(), Tab::Result);
        assert_eq!(shell.error(), None);
        assert_eq!(shell.visible_panels(), vec![Panel::Result]);
    }

    #[test]
    fn form_error_clears_last_prediction() {
        let mut shell = ShellState::default();
        shell.apply(ShellEvent::PredictionSucceeded(result()));
        shell.apply(ShellEvent::TabSelected(Tab::Form));
        assert_eq!(shell.visible_panels(), vec![Panel::Form, Panel::Result]);

        shell.apply(ShellEvent::FormFailed("Please fill all required fields correctly".into()));

        assert!(shell.prediction().is_none());
        assert_eq!(shell.visible_panels(), vec![Panel::Form]);
        assert_eq!(shell.tab(), Tab::Form);
    }

    #[test]
    fn handoff_shows_summary_when_no_prediction_exists() {
        let mut shell = ShellState::default();
        shell.apply(ShellEvent::TabSelected(Tab::Chatbot));
        assert_eq!(shell.visible_panels(), vec![Panel::Chat]);

        shell.apply(ShellEvent::ChatHandoff(CropRecommendation::new(json!({"crop": "Rice"}))));

        assert_eq!(shell.tab(), Tab::Result);
        assert_eq!(shell.visible_panels(), vec![Panel::Recommendation]);
        assert_eq!(shell.handoff().and_then(|rec| rec.crop()), Some("Rice"));
    }

    #[test]
    fn prediction_card_wins_over_handoff_summary() {
        let mut shell = ShellState::default();
        shell.apply(ShellEvent::ChatHandoff(CropRecommendation::new(json!({"crop": "Rice"}))));
        shell.apply(ShellEvent::PredictionSucceeded(result()));
        assert_eq!(shell.visible_panels(), vec![Panel::Result]);
    }

    #[test]
    fn empty_result_tab_shows_nothing() {
        let mut shell = ShellState::default();
        shell.apply(ShellEvent::TabSelected(Tab::Result));
        assert!(shell.visible_panels().is_empty());
    }

    #[test]
    fn dismissing_error_keeps_everything_else() {
        let mut shell = ShellState::default();
        shell.apply(ShellEvent::FormFailed("Failed to load data".into()));

        let changed = shell.apply(ShellEvent::ErrorDismissed);

        assert!(!changed);
        assert_eq!(shell.error(), None);
        assert_eq!(shell.tab(), Tab::Form);
    }

    #[test]
    fn language_selection_switches_labels() {
        let mut shell = ShellState::default();
        shell.apply(ShellEvent::LanguageSelected(Language::Mr));
        assert_eq!(shell.language(), Language::Mr);
        assert_eq!(Tab::Result.label(shell.labels()), "निकाल");
    }

    #[test]
    fn form_events_convert_to_shell_events() {
        assert_eq!(
            ShellEvent::from(FormEvent::Failed("x".into())),
            ShellEvent::FormFailed("x".into())
        );
    }
}
