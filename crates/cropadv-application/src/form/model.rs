//! Form interaction model.
//!
//! Holds the raw field values, the reference lists offered for selection and
//! the submission lifecycle. Network work is described by tickets
//! ([`DistrictFetch`], [`PendingPrediction`]) so results arriving out of order
//! can be recognized and dropped.

use cropadv_core::form::{
    FormField, FormInput, GENERIC_VALIDATION_MESSAGE, SoilMode, ValidationErrors, validate,
};
use cropadv_core::prediction::{PredictionRequest, PredictionResult};
use cropadv_core::{AdvisoryApi, Language, Result};

/// Raised when the states or months list cannot be loaded.
pub const LOAD_FAILED: &str = "Failed to load data";

/// Notification for the composition layer.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    Succeeded(PredictionResult),
    Failed(String),
}

/// Why a submission did not produce a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    /// A prediction is already outstanding.
    Busy,
    /// Field validation failed; see [`FormInteractionModel::errors`].
    Invalid,
}

impl SubmitRejection {
    /// The event to raise for this rejection, if any.
    pub fn into_event(self) -> Option<FormEvent> {
        match self {
            SubmitRejection::Busy => None,
            SubmitRejection::Invalid => {
                Some(FormEvent::Failed(GENERIC_VALIDATION_MESSAGE.to_string()))
            }
        }
    }
}

/// Ticket for one districts request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistrictFetch {
    state: String,
    generation: u64,
}

impl DistrictFetch {
    /// The state whose districts should be requested.
    pub fn state(&self) -> &str {
        &self.state
    }
}

/// Ticket for one prediction request.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPrediction {
    seq: u64,
    request: PredictionRequest,
}

impl PendingPrediction {
    pub fn request(&self) -> &PredictionRequest {
        &self.request
    }
}

#[derive(Debug, Default)]
pub struct FormInteractionModel {
    input: FormInput,
    states: Vec<String>,
    months: Vec<String>,
    districts: Vec<String>,
    errors: ValidationErrors,
    district_generation: u64,
    next_submission: u64,
    submitting: Option<u64>,
}

impl FormInteractionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &FormInput {
        &self.input
    }

    pub fn states(&self) -> &[String] {
        &self.states
    }

    pub fn months(&self) -> &[String] {
        &self.months
    }

    pub fn districts(&self) -> &[String] {
        &self.districts
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn soil_mode(&self) -> SoilMode {
        self.input.soil_mode
    }

    /// District selection is only offered once a state is chosen.
    pub fn district_enabled(&self) -> bool {
        !self.input.state.trim().is_empty()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.is_some()
    }

    /// Applies the result of the initial states/months load.
    ///
    /// Both lists are applied only when both requests succeeded.
    pub fn apply_reference_data(
        &mut self,
        states: Result<Vec<String>>,
        months: Result<Vec<String>>,
    ) -> Option<FormEvent> {
        match (states, months) {
            (Ok(states), Ok(months)) => {
                tracing::info!(
                    "[Form] Reference data loaded: {} states, {} months",
                    states.len(),
                    months.len()
                );
                self.states = states;
                self.months = months;
                None
            }
            (states, months) => {
                if let Err(err) = &states {
                    tracing::error!("[Form] Error fetching states: {}", err);
                }
                if let Err(err) = &months {
                    tracing::error!("[Form] Error fetching months: {}", err);
                }
                Some(FormEvent::Failed(LOAD_FAILED.to_string()))
            }
        }
    }

    /// Selects a state.
    ///
    /// The district option list is cleared at once. The selected district is
    /// left alone. Returns the districts request to make, unless the state is
    /// blank.
    pub fn select_state(&mut self, state: impl Into<String>) -> Option<DistrictFetch> {
        self.input.state = state.into();
        self.errors.clear(FormField::State);
        self.districts.clear();
        self.district_generation += 1;

        let state = self.input.state.trim();
        if state.is_empty() {
            return None;
        }
        tracing::debug!(
            "[Form] Fetching districts for {} (generation {})",
            state,
            self.district_generation
        );
        Some(DistrictFetch {
            state: state.to_string(),
            generation: self.district_generation,
        })
    }

    /// Applies a districts response. Returns `false` when it was stale.
    pub fn apply_districts(&mut self, fetch: &DistrictFetch, result: Result<Vec<String>>) -> bool {
        let current = fetch.generation == self.district_generation
            && fetch.state == self.input.state.trim();
        if !current {
            tracing::warn!(
                "[Form] Ignoring districts for {} (generation {})",
                fetch.state,
                fetch.generation
            );
            return false;
        }
        match result {
            Ok(districts) => self.districts = districts,
            Err(err) => {
                tracing::error!("[Form] Error fetching districts for {}: {}", fetch.state, err);
                self.districts.clear();
            }
        }
        true
    }

    /// Updates one field and clears its error.
    ///
    /// Setting the state goes through [`Self::select_state`], so a districts
    /// request may come back.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) -> Option<DistrictFetch> {
        if field == FormField::State {
            return self.select_state(value);
        }
        self.input.set(field, value);
        self.errors.clear(field);
        None
    }

    /// Switches soil mode. Entered soil values are kept.
    pub fn set_soil_mode(&mut self, mode: SoilMode) {
        self.input.soil_mode = mode;
    }

    pub fn toggle_soil_mode(&mut self) -> SoilMode {
        self.input.soil_mode = self.input.soil_mode.toggled();
        self.input.soil_mode
    }

    /// Validates the form and starts a submission.
    pub fn submit(&mut self, language: Language) -> std::result::Result<PendingPrediction, SubmitRejection> {
        if self.is_submitting() {
            return Err(SubmitRejection::Busy);
        }
        let request = match validate(&self.input, language) {
            Ok(request) => request,
            Err(errors) => {
                tracing::debug!("[Form] Validation failed on {} field(s)", errors.len());
                self.errors = errors;
                return Err(SubmitRejection::Invalid);
            }
        };
        self.errors = ValidationErrors::default();

        let seq = self.next_submission;
        self.next_submission += 1;
        self.submitting = Some(seq);
        tracing::info!(
            "[Form] Submitting prediction for {}/{}/{} (auto: {})",
            request.state,
            request.district,
            request.month,
            request.use_auto_values()
        );
        Ok(PendingPrediction { seq, request })
    }

    /// Applies a prediction response. Stale responses yield `None`.
    pub fn apply_prediction(
        &mut self,
        pending: &PendingPrediction,
        result: Result<PredictionResult>,
    ) -> Option<FormEvent> {
        if self.submitting != Some(pending.seq) {
            tracing::warn!("[Form] Ignoring stale prediction {}", pending.seq);
            return None;
        }
        self.submitting = None;
        Some(match result {
            Ok(result) => FormEvent::Succeeded(result),
            Err(err) => {
                tracing::error!("[Form] Prediction failed: {}", err);
                FormEvent::Failed(err.display_message())
            }
        })
    }

    /// Loads states and months concurrently and applies them.
    pub async fn load_reference_data(&mut self, api: &dyn AdvisoryApi) -> Option<FormEvent> {
        let (states, months) = tokio::join!(api.list_states(), api.list_months());
        self.apply_reference_data(states, months)
    }

    /// Selects a state and awaits its districts.
    pub async fn choose_state(&mut self, api: &dyn AdvisoryApi, state: &str) -> bool {
        let Some(fetch) = self.select_state(state) else {
            return false;
        };
        let result = api.list_districts(fetch.state()).await;
        self.apply_districts(&fetch, result)
    }

    /// Submits the form and awaits the prediction.
    pub async fn submit_with(&mut self, api: &dyn AdvisoryApi, language: Language) -> Option<FormEvent> {
        let pending = match self.submit(language) {
            Ok(pending) => pending,
            Err(rejection) => return rejection.into_event(),
        };
        let result = api.predict(pending.request()).await;
        self.apply_prediction(&pending, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cropadv_core::AdvisoryError;
    use cropadv_core::test_support::{ApiCall, RecordingApi};
    use serde_json::json;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    fn rice() -> PredictionResult {
        serde_json::from_value(json!({
            "top_predictions": [{"crop": "Rice", "confidence": 87.5}],
            "risk_level": "Low Risk",
            "temperature": 28.4,
            "humidity": 80,
            "rainfall": 210.0,
            "soil_values_used": {"nitrogen": 90, "phosphorous": 42, "potassium": 43, "ph": 6.5},
            "advisory_message": "Rice suits the monsoon in Pune"
        }))
        .unwrap()
    }

    fn located() -> FormInteractionModel {
        let mut form = FormInteractionModel::new();
        form.select_state("Maharashtra");
        form.set_field(FormField::District, "Pune");
        form.set_field(FormField::Month, "June");
        form
    }

    #[tokio::test]
    async fn reference_load_fills_both_lists() {
        let api = RecordingApi::new();
        api.set_states(Ok(names(&["Maharashtra", "Punjab"])));
        api.set_months(Ok(names(&["January", "June"])));
        let mut form = FormInteractionModel::new();

        assert_eq!(form.load_reference_data(&api).await, None);
        assert_eq!(form.states(), names(&["Maharashtra", "Punjab"]).as_slice());
        assert_eq!(form.months().len(), 2);
    }

    #[tokio::test]
    async fn reference_load_failure_raises_single_error() {
        let api = RecordingApi::new();
        api.set_states(Ok(names(&["Maharashtra"])));
        let mut form = FormInteractionModel::new();

        let event = form.load_reference_data(&api).await;

        assert_eq!(event, Some(FormEvent::Failed(LOAD_FAILED.to_string())));
        assert!(form.states().is_empty());
        assert!(form.months().is_empty());
    }

    #[tokio::test]
    async fn choosing_a_state_loads_its_districts() {
        let api = RecordingApi::new();
        api.set_districts("Maharashtra", Ok(names(&["Pune", "Nashik"])));
        let mut form = FormInteractionModel::new();
        assert!(!form.district_enabled());

        assert!(form.choose_state(&api, "Maharashtra").await);

        assert!(form.district_enabled());
        assert_eq!(form.districts(), names(&["Pune", "Nashik"]).as_slice());
        assert_eq!(api.calls(), vec![ApiCall::Districts("Maharashtra".into())]);
    }

    #[test]
    fn late_districts_for_previous_state_are_discarded() {
        let mut form = FormInteractionModel::new();
        let first = form.select_state("Punjab").unwrap();
        let second = form.select_state("Maharashtra").unwrap();
        assert!(form.districts().is_empty());

        assert!(form.apply_districts(&second, Ok(names(&["Pune"]))));
        assert!(!form.apply_districts(&first, Ok(names(&["Ludhiana"]))));
        assert_eq!(form.districts(), names(&["Pune"]).as_slice());
    }

    #[test]
    fn reselecting_the_same_state_only_accepts_the_latest_fetch() {
        let mut form = FormInteractionModel::new();
        let older = form.select_state("Punjab").unwrap();
        let newer = form.select_state("Punjab").unwrap();

        assert!(!form.apply_districts(&older, Ok(names(&["Old"]))));
        assert!(form.apply_districts(&newer, Ok(names(&["Ludhiana"]))));
        assert_eq!(form.districts(), names(&["Ludhiana"]).as_slice());
    }

    #[test]
    fn state_change_clears_options_but_keeps_district_selection() {
        let mut form = FormInteractionModel::new();
        let fetch = form.select_state("Maharashtra").unwrap();
        form.apply_districts(&fetch, Ok(names(&["Pune"])));
        form.set_field(FormField::District, "Pune");

        form.select_state("Punjab");

        assert!(form.districts().is_empty());
        assert_eq!(form.input().district, "Pune");
    }

    #[test]
    fn blank_state_issues_no_fetch() {
        let mut form = FormInteractionModel::new();
        assert!(form.select_state("  ").is_none());
        assert!(!form.district_enabled());
    }

    #[test]
    fn failed_current_fetch_leaves_list_empty() {
        let mut form = FormInteractionModel::new();
        let fetch = form.select_state("Kerala").unwrap();
        assert!(form.apply_districts(&fetch, Err(AdvisoryError::api("Failed to fetch districts"))));
        assert!(form.districts().is_empty());
    }

    #[tokio::test]
    async fn invalid_explicit_soil_makes_no_request() {
        let api = RecordingApi::new();
        let mut form = located();
        form.set_soil_mode(SoilMode::Explicit);
        form.set_field(FormField::Nitrogen, "90");
        form.set_field(FormField::Phosphorous, "abc");

        let event = form.submit_with(&api, Language::En).await;

        assert_eq!(
            event,
            Some(FormEvent::Failed(GENERIC_VALIDATION_MESSAGE.to_string()))
        );
        assert!(form.errors().contains(FormField::Phosphorous));
        assert!(form.errors().contains(FormField::Potassium));
        assert!(form.errors().contains(FormField::Ph));
        assert!(!form.errors().contains(FormField::Nitrogen));
        assert!(api.calls().is_empty());
        assert!(!form.is_submitting());
    }

    #[test]
    fn editing_a_field_clears_only_its_error() {
        let mut form = FormInteractionModel::new();
        assert_eq!(form.submit(Language::En), Err(SubmitRejection::Invalid));
        assert_eq!(form.errors().len(), 3);

        form.set_field(FormField::Month, "June");

        assert!(!form.errors().contains(FormField::Month));
        assert!(form.errors().contains(FormField::District));
    }

    #[test]
    fn toggling_soil_mode_keeps_entered_values() {
        let mut form = located();
        form.set_soil_mode(SoilMode::Explicit);
        form.set_field(FormField::Ph, "6.5");

        assert_eq!(form.toggle_soil_mode(), SoilMode::Auto);
        assert_eq!(form.toggle_soil_mode(), SoilMode::Explicit);
        assert_eq!(form.input().ph, "6.5");
    }

    #[tokio::test]
    async fn auto_submission_scenario() {
        let api = RecordingApi::new();
        api.push_prediction(Ok(rice()));
        let mut form = located();

        let event = form.submit_with(&api, Language::Hi).await;

        let result = match event {
            Some(FormEvent::Succeeded(result)) => result,
            other => panic!("expected a prediction, got {other:?}"),
        };
        assert_eq!(result.top().unwrap().crop, "Rice");
        assert_eq!(result.top().unwrap().confidence, 87.5);

        let sent = api.prediction_calls();
        assert_eq!(sent.len(), 1);
        let body = serde_json::to_value(&sent[0]).unwrap();
        assert_eq!(
            body,
            json!({
                "state": "Maharashtra",
                "district": "Pune",
                "month": "June",
                "language": "hi",
                "use_auto_values": true
            })
        );
        assert!(!form.is_submitting());
    }

    #[test]
    fn second_submit_is_rejected_while_outstanding() {
        let mut form = located();
        let pending = form.submit(Language::En).unwrap();
        assert!(form.is_submitting());
        assert_eq!(form.submit(Language::En), Err(SubmitRejection::Busy));
        assert_eq!(SubmitRejection::Busy.into_event(), None);

        let event = form.apply_prediction(&pending, Ok(rice()));
        assert!(matches!(event, Some(FormEvent::Succeeded(_))));
        assert!(!form.is_submitting());
        // Same ticket again is stale.
        assert_eq!(form.apply_prediction(&pending, Ok(rice())), None);
    }

    #[tokio::test]
    async fn failure_reports_server_detail_and_keeps_values() {
        let api = RecordingApi::new();
        api.push_prediction(Err(AdvisoryError::api_status(400, "Unknown district")));
        let mut form = located();

        let event = form.submit_with(&api, Language::En).await;

        assert_eq!(event, Some(FormEvent::Failed("Unknown district".to_string())));
        assert_eq!(form.input().district, "Pune");
        assert_eq!(form.input().month, "June");
        assert!(!form.is_submitting());
    }
}
