//! Coloured terminal output.

use colored::Colorize;
use cropadv_application::result_view::{ResultCard, recommendation_summary};
use cropadv_application::{FormInteractionModel, Panel, ShellState, Tab};
use cropadv_core::Language;
use cropadv_core::chat::CropRecommendation;
use cropadv_core::form::{FormField, SoilMode};
use cropadv_core::labels::Labels;
use cropadv_core::prediction::{PredictionResult, RiskLevel};
use cropadv_core::reference::HealthStatus;
use cropadv_core::session::ChatMessage;

pub fn banner(labels: &Labels) {
    println!("{}", format!("=== {} ===", labels.chrome.title).bright_magenta().bold());
    println!("{}", labels.chrome.subtitle.bright_black());
    println!(
        "{}",
        "Type '/help' for commands, '/form' '/chat' '/result' to switch tabs, or 'quit' to exit."
            .bright_black()
    );
    println!();
}

pub fn help(tab: Tab) {
    println!("{}", "Commands:".bright_yellow());
    let global = [
        ("/form | /chat | /result", "switch tab"),
        ("/lang <en|hi|mr>", "change language"),
        ("/dismiss", "hide the error banner"),
        ("/health", "check the advisory service"),
        ("quit | exit", "leave"),
    ];
    for (usage, what) in global {
        println!("  {:<26}{}", usage.cyan(), what.bright_black());
    }
    match tab {
        Tab::Form => {
            let form = [
                ("state <name>", "select state (loads districts)"),
                ("district <name>", "select district"),
                ("month <name>", "select month"),
                ("soil auto|manual", "auto-detect or enter soil values"),
                ("n|p|k|ph <value>", "soil values (manual mode)"),
                ("submit", "get recommendation"),
                ("show", "show the form"),
            ];
            for (usage, what) in form {
                println!("  {:<26}{}", usage.cyan(), what.bright_black());
            }
        }
        Tab::Chatbot => println!("  {}", "Anything else is sent to the chatbot.".bright_black()),
        Tab::Result => println!("  {:<26}{}", "show".cyan(), "show results again".bright_black()),
    }
}

pub fn tabs(shell: &ShellState) {
    let labels = shell.labels();
    let line = Tab::all()
        .map(|tab| {
            let label = tab.label(labels);
            if tab == shell.tab() {
                format!("[{label}]").bright_green().bold().to_string()
            } else {
                label.bright_black().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    println!("{line}");
}

pub fn error_banner(message: &str) {
    println!("{} {}", format!("! {message}").red().bold(), "(/dismiss)".bright_black());
}

pub fn warning(message: &str) {
    println!("{}", message.yellow());
}

pub fn info(message: &str) {
    println!("{}", message.bright_black());
}

pub fn language(language: Language) {
    println!("{}", format!("Language: {}", language.native_name()).bright_green());
}

/// Everything the current tab shows.
pub fn panels(shell: &ShellState, form: &FormInteractionModel, transcript: &[ChatMessage]) {
    tabs(shell);
    if let Some(error) = shell.error() {
        error_banner(error);
    }
    let labels = shell.labels();
    for panel in shell.visible_panels() {
        match panel {
            Panel::Form => form_panel(form, labels),
            Panel::Result => {
                if let Some(result) = shell.prediction() {
                    result_card(result, labels);
                }
            }
            Panel::Recommendation => {
                if let Some(recommendation) = shell.handoff() {
                    recommendation_panel(recommendation, labels);
                }
            }
            Panel::Chat => {
                println!("{}", labels.chrome.chat_title.bright_magenta().bold());
                println!("{}", labels.chrome.chat_subtitle.bright_black());
                for message in transcript {
                    chat_message(message);
                }
            }
        }
    }
}

pub fn form_panel(form: &FormInteractionModel, labels: &Labels) {
    let text = &labels.form;
    let input = form.input();
    let errors = form.errors();

    let row = |label: &str, value: &str, placeholder: &str, field: FormField, enabled: bool| {
        let shown = if value.is_empty() {
            placeholder.bright_black().to_string()
        } else {
            value.bright_white().to_string()
        };
        let shown = if enabled { shown } else { shown.dimmed().to_string() };
        match errors.get(field) {
            Some(message) => println!("  {label:<20}{shown}  {}", message.red()),
            None => println!("  {label:<20}{shown}"),
        }
    };

    row(text.state, &input.state, text.select_state, FormField::State, true);
    row(
        text.district,
        &input.district,
        text.select_district,
        FormField::District,
        form.district_enabled(),
    );
    row(text.month, &input.month, text.select_month, FormField::Month, true);

    match form.soil_mode() {
        SoilMode::Auto => println!("  {}", text.auto_detect.cyan()),
        SoilMode::Explicit => {
            println!("  {}", text.use_soil_values.cyan());
            for (label, field) in [
                (text.nitrogen, FormField::Nitrogen),
                (text.phosphorous, FormField::Phosphorous),
                (text.potassium, FormField::Potassium),
                (text.ph, FormField::Ph),
            ] {
                let range = field.placeholder_range().unwrap_or_default();
                row(label, input.get(field), range, field, true);
            }
        }
    }

    let options = |name: &str, values: &[String]| {
        if !values.is_empty() {
            println!("  {} {}", format!("{name}:").bright_black(), values.join(", ").bright_black());
        }
    };
    options(text.state, form.states());
    options(text.district, form.districts());
    options(text.month, form.months());

    if form.is_submitting() {
        println!("  {}", labels.chrome.processing.yellow());
    } else {
        println!("  {}", format!("submit: {}", text.submit).bright_black());
    }
}

pub fn result_card(result: &PredictionResult, labels: &Labels) {
    let card = ResultCard::build(result, labels);

    println!("{}", card.rankings_title.bright_magenta().bold());
    for ranked in &card.rankings {
        let line = if ranked.rank == 1 {
            ranked.line.bright_green().bold().to_string()
        } else {
            ranked.line.normal().to_string()
        };
        println!("  {line}");
        println!("     {}", ranked.bar.green());
    }

    let risk = match card.risk {
        RiskLevel::Low => card.risk_label.green(),
        RiskLevel::Medium => card.risk_label.yellow(),
        RiskLevel::High => card.risk_label.red(),
    };
    println!("{} {}", format!("{}:", card.risk_title).bright_magenta().bold(), risk.bold());

    println!("{}", card.weather_title.bright_magenta().bold());
    for reading in &card.weather {
        println!("  {:<20}{}", reading.label, reading.value);
    }
    println!("{}", card.soil_title.bright_magenta().bold());
    for reading in &card.soil {
        println!("  {:<20}{}", reading.label, reading.value);
    }
    println!("{}", card.advisory_title.bright_magenta().bold());
    for line in card.advisory.lines() {
        println!("  {}", line.bright_blue());
    }
}

pub fn recommendation_panel(recommendation: &CropRecommendation, labels: &Labels) {
    let mut lines = recommendation_summary(recommendation, labels).into_iter();
    if let Some(title) = lines.next() {
        println!("{}", title.bright_magenta().bold());
    }
    for line in lines {
        println!("  {}", line.bright_green());
    }
}

pub fn chat_message(message: &ChatMessage) {
    if message.is_user() {
        println!("{}", format!("> {}", message.text).green());
        return;
    }
    for line in message.text.lines() {
        println!("{}", line.bright_blue());
    }
    if let Some(next) = &message.next_step {
        println!("{}", format!("  ({next})").bright_black());
    }
}

pub fn health(status: Option<&HealthStatus>) {
    match status {
        Some(status) if status.is_healthy() => println!("{}", "Advisory service is healthy".bright_green()),
        Some(status) => println!(
            "{}",
            format!("Advisory service status: {}", status.status().unwrap_or("unknown")).yellow()
        ),
        None => println!("{}", "Advisory service is unreachable".red()),
    }
}
