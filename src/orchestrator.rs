//! Per-request glue between the validator and the predictor

use crate::config::AppConfig;
use crate::error::RequestError;
use crate::models::{Classifier, LabelMap, Predictor};
use crate::types::request::{FormDescriptor, FormSubmission};
use crate::types::response::{Diagnosis, PredictionResponse};
use crate::validator::FieldValidator;
use std::sync::Arc;
use tracing::debug;

/// Handles form requests.
///
/// Holds no per-request state; the classifier behind the predictor is shared
/// read-only by every request.
#[derive(Clone)]
pub struct RequestOrchestrator {
    validator: FieldValidator,
    predictor: Predictor,
    form: FormDescriptor,
}

impl RequestOrchestrator {
    pub fn new(validator: FieldValidator, predictor: Predictor) -> Self {
        Self {
            validator,
            predictor,
            form: FormDescriptor::new(),
        }
    }

    /// Wire an orchestrator around an already loaded classifier
    pub fn from_config(classifier: Arc<dyn Classifier>, config: &AppConfig) -> Self {
        Self::new(
            FieldValidator::new(config.validation.mode),
            Predictor::new(classifier, LabelMap::from_config(&config.labels)),
        )
    }

    /// Description of the empty form
    pub fn form(&self) -> &FormDescriptor {
        &self.form
    }

    /// Validate a submission and, only if it is valid, predict.
    pub fn handle(&self, form: &FormSubmission) -> Result<Diagnosis, RequestError> {
        let features = self.validator.validate(form).map_err(|failure| {
            debug!(
                failed_fields = failure.len(),
                error = %failure,
                "Submission rejected"
            );
            RequestError::Validation(failure)
        })?;

        self.predictor.predict(&features)
    }

    /// Handle a submission and wrap the outcome for the presentation layer
    pub fn respond(&self, form: &FormSubmission) -> PredictionResponse {
        PredictionResponse::from_outcome(&self.handle(form))
    }

    /// Handle a raw JSON payload.
    ///
    /// A payload that is not a JSON object of strings still gets a reply.
    pub fn respond_json(&self, payload: &[u8]) -> PredictionResponse {
        match serde_json::from_slice::<FormSubmission>(payload) {
            Ok(form) => self.respond(&form),
            Err(e) => {
                PredictionResponse::from_outcome(&Err(RequestError::MalformedRequest(e.to_string())))
            }
        }
    }
}
