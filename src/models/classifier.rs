//! Prediction capability shared by the real forest and test stubs

use crate::models::artifact::ModelArtifact;
use anyhow::{anyhow, bail, Result};
use smartcore::linalg::basic::matrix::DenseMatrix;

/// A fitted binary classifier.
///
/// Implementations are shared read-only across concurrent requests.
pub trait Classifier: Send + Sync {
    /// Predict the class of a single sample
    fn predict(&self, features: &[f64]) -> Result<u32>;
}

impl ModelArtifact {
    /// Predict every row of `rows`
    pub fn predict_rows(&self, rows: &DenseMatrix<f64>) -> Result<Vec<u32>> {
        self.model
            .predict(rows)
            .map_err(|e| anyhow!("forest prediction failed: {e}"))
    }
}

impl Classifier for ModelArtifact {
    fn predict(&self, features: &[f64]) -> Result<u32> {
        if features.len() != self.feature_names.len() {
            bail!(
                "expected {} features, got {}",
                self.feature_names.len(),
                features.len()
            );
        }

        let row = DenseMatrix::from_2d_vec(&vec![features.to_vec()]);
        self.predict_rows(&row)?
            .first()
            .copied()
            .ok_or_else(|| anyhow!("model returned no prediction"))
    }
}
