//! Crop recommendation form: raw input and validation.
//!
//! # Module Structure
//!
//! - `fields`: Field identifiers and raw text input (`FormField`, `FormInput`, `SoilMode`)
//! - `validation`: Submit-time validation (`validate`, `ValidationErrors`)

mod fields;
mod validation;

// Re-export public API
pub use fields::{FormField, FormInput, SoilMode};
pub use validation::{GENERIC_VALIDATION_MESSAGE, ValidationErrors, validate};
