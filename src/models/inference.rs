//! Single-sample inference and labelling

use crate::error::RequestError;
use crate::models::classifier::Classifier;
use crate::models::labels::LabelMap;
use crate::types::response::Diagnosis;
use crate::validator::FeatureVector;
use std::sync::Arc;
use tracing::{debug, error};

/// Runs the shared classifier on a validated vector and labels the output.
#[derive(Clone)]
pub struct Predictor {
    classifier: Arc<dyn Classifier>,
    labels: LabelMap,
}

impl Predictor {
    pub fn new(classifier: Arc<dyn Classifier>, labels: LabelMap) -> Self {
        Self { classifier, labels }
    }

    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    /// Predict and label one sample.
    ///
    /// Model failures come back as [`RequestError::Prediction`].
    pub fn predict(&self, features: &FeatureVector) -> Result<Diagnosis, RequestError> {
        let class = self.classifier.predict(features.as_slice()).map_err(|e| {
            error!(error = %e, "Model inference failed");
            RequestError::Prediction(format!("{e:#}"))
        })?;

        let diagnosis = self.labels.diagnose(class);
        debug!(class = class, label = %diagnosis.label, "Inference complete");
        Ok(diagnosis)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::validator::tests::valid_form;
    use crate::validator::FieldValidator;
    use anyhow::{bail, Result};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Always predicts the same class and counts how often it was asked.
    pub(crate) struct StubClassifier {
        class: u32,
        calls: AtomicUsize,
    }

    impl StubClassifier {
        pub(crate) fn new(class: u32) -> Self {
            Self {
                class,
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Classifier for StubClassifier {
        fn predict(&self, _features: &[f64]) -> Result<u32> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.class)
        }
    }

    pub(crate) struct FailingClassifier;

    impl Classifier for FailingClassifier {
        fn predict(&self, features: &[f64]) -> Result<u32> {
            bail!("expected 31 features, got {}", features.len())
        }
    }

    fn features() -> FeatureVector {
        FieldValidator::fail_fast().validate(&valid_form()).unwrap()
    }

    #[test]
    fn test_class_zero_is_malignant() {
        let predictor = Predictor::new(Arc::new(StubClassifier::new(0)), LabelMap::default());
        let diagnosis = predictor.predict(&features()).unwrap();

        assert_eq!(diagnosis.class, 0);
        assert_eq!(diagnosis.label, "Malignant (Cancer)");
    }

    #[test]
    fn test_class_one_is_benign() {
        let predictor = Predictor::new(Arc::new(StubClassifier::new(1)), LabelMap::default());
        let diagnosis = predictor.predict(&features()).unwrap();

        assert_eq!(diagnosis.label, "Benign (Non-cancerous)");
    }

    #[test]
    fn test_model_failure_becomes_prediction_error() {
        let predictor = Predictor::new(Arc::new(FailingClassifier), LabelMap::default());
        let err = predictor.predict(&features()).unwrap_err();

        assert_eq!(
            err,
            RequestError::Prediction("expected 31 features, got 30".to_string())
        );
        assert_eq!(
            err.to_string(),
            "Error in prediction: expected 31 features, got 30"
        );
    }
}
