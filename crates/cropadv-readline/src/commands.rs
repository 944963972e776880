//! Line parsing for the REPL.
//!
//! Slash commands work everywhere. Other lines are read as form edits on the
//! form tab and as chat messages on the chatbot tab.

use cropadv_application::Tab;
use cropadv_core::Language;
use cropadv_core::form::{FormField, SoilMode};
use thiserror::Error;

/// Slash commands offered by completion and hints.
pub const SLASH_COMMANDS: &[&str] = &[
    "/form", "/chat", "/result", "/lang", "/dismiss", "/health", "/help",
];

/// Form verbs offered by completion on the form tab.
pub const FORM_VERBS: &[&str] = &[
    "state", "district", "month", "soil", "n", "p", "k", "ph", "submit", "show",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Quit,
    Help,
    SwitchTab(Tab),
    Language(Language),
    Dismiss,
    Health,
    Show,
    SetField(FormField, String),
    Soil(SoilMode),
    Submit,
    Chat(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Unsupported language '{0}' (use en, hi or mr)")]
    UnknownLanguage(String),
}

/// Parses one input line in the context of the selected tab.
pub fn parse(line: &str, tab: Tab) -> Result<Command, CommandError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(Command::Empty);
    }
    if trimmed == "quit" || trimmed == "exit" {
        return Ok(Command::Quit);
    }

    let (verb, rest) = split_verb(trimmed);
    if verb.starts_with('/') {
        return parse_slash(verb, rest);
    }

    match tab {
        Tab::Chatbot => Ok(Command::Chat(line.to_string())),
        Tab::Form => parse_form(verb, rest),
        Tab::Result => match verb {
            "show" => Ok(Command::Show),
            _ => Err(CommandError::Unknown(verb.to_string())),
        },
    }
}

fn split_verb(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    }
}

fn parse_slash(verb: &str, rest: &str) -> Result<Command, CommandError> {
    match verb {
        "/form" => Ok(Command::SwitchTab(Tab::Form)),
        "/chat" | "/chatbot" => Ok(Command::SwitchTab(Tab::Chatbot)),
        "/result" | "/results" => Ok(Command::SwitchTab(Tab::Result)),
        "/lang" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("/lang <en|hi|mr>"));
            }
            rest.parse::<Language>()
                .map(Command::Language)
                .map_err(|_| CommandError::UnknownLanguage(rest.to_string()))
        }
        "/dismiss" => Ok(Command::Dismiss),
        "/health" => Ok(Command::Health),
        "/help" => Ok(Command::Help),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn parse_form(verb: &str, rest: &str) -> Result<Command, CommandError> {
    match verb.to_ascii_lowercase().as_str() {
        "submit" => return Ok(Command::Submit),
        "show" => return Ok(Command::Show),
        "soil" => {
            return match rest.to_ascii_lowercase().as_str() {
                "auto" => Ok(Command::Soil(SoilMode::Auto)),
                "manual" | "own" | "explicit" => Ok(Command::Soil(SoilMode::Explicit)),
                _ => Err(CommandError::Usage("soil auto|manual")),
            };
        }
        _ => {}
    }
    verb.parse::<FormField>()
        .map(|field| Command::SetField(field, rest.to_string()))
        .map_err(|_| CommandError::Unknown(verb.to_string()))
}

/// Matches typed text against a list of options, ignoring case.
///
/// Returns the option's own spelling when one matches, otherwise the text
/// unchanged.
pub fn resolve_option(options: &[String], typed: &str) -> String {
    let typed = typed.trim();
    options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(typed))
        .cloned()
        .unwrap_or_else(|| typed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_commands_work_on_every_tab() {
        for tab in Tab::all() {
            assert_eq!(parse("/chat", tab), Ok(Command::SwitchTab(Tab::Chatbot)));
            assert_eq!(parse("  /help ", tab), Ok(Command::Help));
            assert_eq!(parse("/lang MR", tab), Ok(Command::Language(Language::Mr)));
            assert_eq!(parse("quit", tab), Ok(Command::Quit));
        }
    }

    #[test]
    fn lang_requires_a_known_tag() {
        assert_eq!(parse("/lang", Tab::Form), Err(CommandError::Usage("/lang <en|hi|mr>")));
        assert_eq!(
            parse("/lang ta", Tab::Form),
            Err(CommandError::UnknownLanguage("ta".into()))
        );
    }

    #[test]
    fn form_lines_edit_fields() {
        assert_eq!(
            parse("state Tamil Nadu", Tab::Form),
            Ok(Command::SetField(FormField::State, "Tamil Nadu".into()))
        );
        assert_eq!(
            parse("N 90", Tab::Form),
            Ok(Command::SetField(FormField::Nitrogen, "90".into()))
        );
        assert_eq!(
            parse("ph", Tab::Form),
            Ok(Command::SetField(FormField::Ph, String::new()))
        );
        assert_eq!(parse("soil manual", Tab::Form), Ok(Command::Soil(SoilMode::Explicit)));
        assert_eq!(parse("soil", Tab::Form), Err(CommandError::Usage("soil auto|manual")));
        assert_eq!(parse("submit", Tab::Form), Ok(Command::Submit));
        assert_eq!(parse("plant rice", Tab::Form), Err(CommandError::Unknown("plant".into())));
    }

    #[test]
    fn chat_tab_sends_everything_else_verbatim() {
        assert_eq!(
            parse("state is Maharashtra", Tab::Chatbot),
            Ok(Command::Chat("state is Maharashtra".into()))
        );
        assert_eq!(parse("   ", Tab::Chatbot), Ok(Command::Empty));
    }

    #[test]
    fn result_tab_only_shows() {
        assert_eq!(parse("show", Tab::Result), Ok(Command::Show));
        assert!(parse("submit", Tab::Result).is_err());
    }

    #[test]
    fn options_resolve_case_insensitively() {
        let options = vec!["MAHARASHTRA".to_string(), "PUNJAB".to_string()];
        assert_eq!(resolve_option(&options, "punjab"), "PUNJAB");
        assert_eq!(resolve_option(&options, " Goa "), "Goa");
        assert_eq!(resolve_option(&[], "Pune"), "Pune");
    }
}
