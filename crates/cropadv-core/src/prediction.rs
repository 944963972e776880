//! Prediction request and result types (`POST /predict/`).

use serde::{Deserialize, Serialize};

use crate::language::Language;

/// Explicit soil measurements supplied by the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilValues {
    pub nitrogen: f64,
    pub phosphorous: f64,
    pub potassium: f64,
    pub ph: f64,
}

/// Body of a prediction request.
///
/// Either the server is asked to detect soil/weather values itself
/// (`use_auto_values: true`, no soil keys on the wire) or all four soil
/// values are sent. The constructors are the only way to build one, so the
/// two halves cannot disagree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub state: String,
    pub district: String,
    pub month: String,
    pub language: Language,
    use_auto_values: bool,
    #[serde(flatten)]
    soil: Option<SoilValues>,
}

impl PredictionRequest {
    /// A request that lets the server fill in soil and weather values.
    pub fn auto(
        state: impl Into<String>,
        district: impl Into<String>,
        month: impl Into<String>,
        language: Language,
    ) -> Self {
        Self {
            state: state.into(),
            district: district.into(),
            month: month.into(),
            language,
            use_auto_values: true,
            soil: None,
        }
    }

    /// A request carrying the user's own soil measurements.
    pub fn explicit(
        state: impl Into<String>,
        district: impl Into<String>,
        month: impl Into<String>,
        language: Language,
        soil: SoilValues,
    ) -> Self {
        Self {
            state: state.into(),
            district: district.into(),
            month: month.into(),
            language,
            use_auto_values: false,
            soil: Some(soil),
        }
    }

    pub fn use_auto_values(&self) -> bool {
        self.use_auto_values
    }

    pub fn soil(&self) -> Option<&SoilValues> {
        self.soil.as_ref()
    }
}

/// One ranked crop suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropPrediction {
    pub crop: String,
    /// Confidence in percent (0-100).
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<String>,
}

/// Soil values the server actually used; any of them may be null.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SoilValuesUsed {
    #[serde(default)]
    pub nitrogen: Option<f64>,
    #[serde(default)]
    pub phosphorous: Option<f64>,
    #[serde(default)]
    pub potassium: Option<f64>,
    #[serde(default)]
    pub ph: Option<f64>,
}

/// Response of `POST /predict/`. Rendered as-is, never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub top_predictions: Vec<CropPrediction>,
    pub risk_level: String,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub rainfall: Option<f64>,
    #[serde(default)]
    pub soil_values_used: SoilValuesUsed,
    pub advisory_message: String,
}

impl PredictionResult {
    /// The highest ranked suggestion, if the server returned any.
    pub fn top(&self) -> Option<&CropPrediction> {
        self.top_predictions.first()
    }

    pub fn risk(&self) -> RiskLevel {
        RiskLevel::from_label(&self.risk_level)
    }
}

/// Coarse risk classification used for highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Classifies a server risk label. Unknown labels count as medium.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "low risk" | "low" => RiskLevel::Low,
            "high risk" | "high" => RiskLevel::High,
            _ => RiskLevel::Medium,
        }
    }
}
