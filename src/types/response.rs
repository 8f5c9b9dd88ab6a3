//! Prediction outcome and its wire representation

use crate::error::RequestError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A labelled model output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    /// Raw class value returned by the model
    pub class: u32,
    /// Human-readable label for the class
    pub label: String,
}

/// Reply sent back to the presentation layer.
///
/// Exactly one of `result` and `error` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Unique identifier for this request
    pub request_id: String,

    /// Diagnosis label on success
    pub result: Option<String>,

    /// User-facing error message on failure
    pub error: Option<String>,

    /// Time the response was produced
    pub timestamp: DateTime<Utc>,
}

impl PredictionResponse {
    /// Build the reply for a finished request
    pub fn from_outcome(outcome: &Result<Diagnosis, RequestError>) -> Self {
        let (result, error) = match outcome {
            Ok(diagnosis) => (Some(diagnosis.label.clone()), None),
            Err(e) => (None, Some(e.to_string())),
        };

        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            result,
            error,
            timestamp: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response() {
        let outcome = Ok(Diagnosis {
            class: 1,
            label: "Benign (Non-cancerous)".to_string(),
        });
        let response = PredictionResponse::from_outcome(&outcome);

        assert!(response.is_success());
        assert_eq!(response.result.as_deref(), Some("Benign (Non-cancerous)"));
        assert!(response.error.is_none());
    }

    #[test]
    fn test_error_response() {
        let outcome = Err(RequestError::Prediction("model unavailable".into()));
        let response = PredictionResponse::from_outcome(&outcome);

        assert!(!response.is_success());
        assert!(response.result.is_none());
        assert_eq!(
            response.error.as_deref(),
            Some("Error in prediction: model unavailable")
        );
    }

    #[test]
    fn test_response_serialization() {
        let response = PredictionResponse::from_outcome(&Ok(Diagnosis {
            class: 0,
            label: "Malignant (Cancer)".to_string(),
        }));

        let json = serde_json::to_string(&response).unwrap();
        let deserialized: PredictionResponse = serde_json::from_str(&json).unwrap();

        assert_eq!(response.request_id, deserialized.request_id);
        assert_eq!(response.result, deserialized.result);
        assert_eq!(deserialized.error, None);
    }
}
