//! Submit-time validation of the recommendation form.

use std::collections::BTreeMap;

use crate::form::fields::{FormField, FormInput, SoilMode};
use crate::language::Language;
use crate::prediction::{PredictionRequest, SoilValues};

/// Message raised to the surrounding view when validation fails.
pub const GENERIC_VALIDATION_MESSAGE: &str = "Please fill all required fields correctly";

/// Field-level validation messages, all collected in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<FormField, &'static str>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: FormField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.errors.contains_key(&field)
    }

    /// Drops the message for one field (the user edited it).
    pub fn clear(&mut self, field: FormField) {
        self.errors.remove(&field);
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &'static str)> + '_ {
        self.errors.iter().map(|(field, message)| (*field, *message))
    }

    fn insert(&mut self, field: FormField, message: &'static str) {
        self.errors.insert(field, message);
    }
}

fn required_message(field: FormField) -> &'static str {
    match field {
        FormField::State => "State is required",
        FormField::District => "District is required",
        FormField::Month => "Month is required",
        FormField::Nitrogen => "Valid nitrogen value required",
        FormField::Phosphorous => "Valid phosphorous value required",
        FormField::Potassium => "Valid potassium value required",
        FormField::Ph => "Valid pH value required",
    }
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Validates the raw input and builds the prediction request.
///
/// Location fields must be non-empty. In explicit soil mode each soil field
/// must parse as a finite number; ranges are left to the server. Soil text is
/// ignored entirely in auto mode.
pub fn validate(
    input: &FormInput,
    language: Language,
) -> Result<PredictionRequest, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    for field in [FormField::State, FormField::District, FormField::Month] {
        if input.get(field).trim().is_empty() {
            errors.insert(field, required_message(field));
        }
    }

    let mut soil = [0.0_f64; 4];
    if input.soil_mode == SoilMode::Explicit {
        for (slot, field) in soil.iter_mut().zip(FormField::SOIL) {
            match parse_number(input.get(field)) {
                Some(value) => *slot = value,
                None => errors.insert(field, required_message(field)),
            }
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let (state, district, month) = (
        input.state.trim(),
        input.district.trim(),
        input.month.trim(),
    );
    Ok(match input.soil_mode {
        SoilMode::Auto => PredictionRequest::auto(state, district, month, language),
        SoilMode::Explicit => {
            let [nitrogen, phosphorous, potassium, ph] = soil;
            PredictionRequest::explicit(
                state,
                district,
                month,
                language,
                SoilValues {
                    nitrogen,
                    phosphorous,
                    potassium,
                    ph,
                },
            )
        }
    })
}
