//! Form field identifiers and raw input.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Every input of the recommendation form.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FormField {
    State,
    District,
    Month,
    #[strum(to_string = "nitrogen", serialize = "n")]
    Nitrogen,
    #[strum(to_string = "phosphorous", serialize = "p")]
    Phosphorous,
    #[strum(to_string = "potassium", serialize = "k")]
    Potassium,
    Ph,
}

impl FormField {
    pub const SOIL: [FormField; 4] = [
        FormField::Nitrogen,
        FormField::Phosphorous,
        FormField::Potassium,
        FormField::Ph,
    ];

    pub fn is_soil(self) -> bool {
        Self::SOIL.contains(&self)
    }

    /// Range hint shown next to soil inputs. Not enforced client-side.
    pub fn placeholder_range(self) -> Option<&'static str> {
        match self {
            FormField::Nitrogen => Some("0-140"),
            FormField::Phosphorous => Some("0-145"),
            FormField::Potassium => Some("0-205"),
            FormField::Ph => Some("0-14"),
            _ => None,
        }
    }
}

/// Where soil values come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilMode {
    /// The server detects soil and weather values itself.
    #[default]
    Auto,
    /// The user types the four soil measurements.
    Explicit,
}

impl SoilMode {
    pub fn toggled(self) -> Self {
        match self {
            SoilMode::Auto => SoilMode::Explicit,
            SoilMode::Explicit => SoilMode::Auto,
        }
    }
}

/// Raw text of every form field, exactly as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub state: String,
    pub district: String,
    pub month: String,
    pub nitrogen: String,
    pub phosphorous: String,
    pub potassium: String,
    pub ph: String,
    pub soil_mode: SoilMode,
}

impl FormInput {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::State => &self.state,
            FormField::District => &self.district,
            FormField::Month => &self.month,
            FormField::Nitrogen => &self.nitrogen,
            FormField::Phosphorous => &self.phosphorous,
            FormField::Potassium => &self.potassium,
            FormField::Ph => &self.ph,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::State => &mut self.state,
            FormField::District => &mut self.district,
            FormField::Month => &mut self.month,
            FormField::Nitrogen => &mut self.nitrogen,
            FormField::Phosphorous => &mut self.phosphorous,
            FormField::Potassium => &mut self.potassium,
            FormField::Ph => &mut self.ph,
        };
        *slot = value.into();
    }
}
