//! Localized text rendering of prediction results.
//!
//! Produces plain strings grouped by section; colouring is left to the
//! front-end.

use cropadv_core::chat::CropRecommendation;
use cropadv_core::labels::Labels;
use cropadv_core::prediction::{CropPrediction, PredictionResult, RiskLevel};

/// Placeholder for values the server did not report.
pub const MISSING: &str = "-";

const BAR_WIDTH: usize = 20;

/// One line of the ranking section.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCrop {
    pub rank: usize,
    pub crop: String,
    pub confidence: f64,
    /// e.g. `1. Rice - Confidence: 87.5%`
    pub line: String,
    pub bar: String,
}

/// A labelled value, e.g. `Humidity` / `72%`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    pub label: &'static str,
    pub value: String,
}

/// Everything the result card shows, already localized.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultCard {
    pub rankings_title: &'static str,
    pub rankings: Vec<RankedCrop>,
    pub risk_title: &'static str,
    pub risk_label: String,
    pub risk: RiskLevel,
    pub weather_title: &'static str,
    pub weather: Vec<Reading>,
    pub soil_title: &'static str,
    pub soil: Vec<Reading>,
    pub advisory_title: &'static str,
    pub advisory: String,
}

impl ResultCard {
    pub fn build(result: &PredictionResult, labels: &Labels) -> Self {
        let text = &labels.result;
        let form = &labels.form;
        let rankings = result
            .top_predictions
            .iter()
            .enumerate()
            .map(|(index, prediction)| ranked(index + 1, prediction, text.confidence))
            .collect();

        let weather = vec![
            Reading {
                label: text.temperature,
                value: or_missing(result.temperature, |value| format!("{value:.1}°C")),
            },
            Reading {
                label: text.humidity,
                value: or_missing(result.humidity, |value| format!("{value}%")),
            },
            Reading {
                label: text.rainfall,
                value: or_missing(result.rainfall, |value| format!("{value:.1} mm")),
            },
        ];

        let used = &result.soil_values_used;
        let soil = [
            (form.nitrogen, used.nitrogen),
            (form.phosphorous, used.phosphorous),
            (form.potassium, used.potassium),
            (form.ph, used.ph),
        ]
        .into_iter()
        .map(|(label, value)| Reading {
            label,
            value: or_missing(value, |value| value.to_string()),
        })
        .collect();

        Self {
            rankings_title: text.top_recommendations,
            rankings,
            risk_title: text.risk_level,
            risk_label: result.risk_level.clone(),
            risk: result.risk(),
            weather_title: text.weather_conditions,
            weather,
            soil_title: text.soil_values,
            soil,
            advisory_title: text.advisory,
            advisory: result.advisory_message.clone(),
        }
    }
}

fn ranked(rank: usize, prediction: &CropPrediction, confidence_label: &str) -> RankedCrop {
    RankedCrop {
        rank,
        crop: prediction.crop.clone(),
        confidence: prediction.confidence,
        line: format!(
            "{rank}. {} - {confidence_label}: {:.1}%",
            prediction.crop, prediction.confidence
        ),
        bar: confidence_bar(prediction.confidence, BAR_WIDTH),
    }
}

fn or_missing(value: Option<f64>, format: impl Fn(f64) -> String) -> String {
    value.map(format).unwrap_or_else(|| MISSING.to_string())
}

/// Horizontal bar for a percentage, clamped to 0-100.
pub fn confidence_bar(confidence: f64, width: usize) -> String {
    let ratio = if confidence.is_finite() {
        (confidence / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (ratio * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Lines shown on the result tab for a chat recommendation.
pub fn recommendation_summary(recommendation: &CropRecommendation, labels: &Labels) -> Vec<String> {
    let mut lines = vec![labels.result.top_recommendations.to_string()];
    match recommendation.crop() {
        Some(crop) => {
            let confidence = recommendation
                .confidence()
                .map(|value| format!(" - {}: {value:.1}%", labels.result.confidence))
                .unwrap_or_default();
            lines.push(format!("1. {crop}{confidence}"));
        }
        None => lines.push(recommendation.payload().to_string()),
    }
    lines
}
