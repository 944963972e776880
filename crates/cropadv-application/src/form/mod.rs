//! Crop recommendation form.

mod model;

pub use model::{
    DistrictFetch, FormEvent, FormInteractionModel, LOAD_FAILED, PendingPrediction,
    SubmitRejection,
};
