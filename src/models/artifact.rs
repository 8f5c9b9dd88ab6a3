//! Serialized model artifact.
//!
//! The artifact is a JSON envelope around the fitted forest that also records
//! the feature order, class set and holdout report of the training run.

use crate::training::evaluation::EvaluationReport;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_classifier::RandomForestClassifier;
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::collections::BTreeMap;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Random forest over `f64` features with `u32` class labels
pub type ForestModel = RandomForestClassifier<f64, u32, DenseMatrix<f64>, Vec<u32>>;

/// Parameters and sizes of the training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    /// Where the samples came from
    pub dataset: String,
    pub seed: u64,
    pub test_size: f32,
    pub n_trees: u16,
    pub train_samples: usize,
    pub holdout_samples: usize,
}

/// Fitted model plus the metadata needed to serve it safely
#[derive(Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Feature names in the column order the forest was fitted on
    pub feature_names: Vec<String>,
    /// Distinct class values seen during training, ascending
    pub classes: Vec<u32>,
    /// Class names supplied by the dataset
    pub class_names: BTreeMap<u32, String>,
    pub trained_at: DateTime<Utc>,
    pub training: TrainingSummary,
    pub evaluation: EvaluationReport,
    pub model: ForestModel,
}

impl ModelArtifact {
    /// Write the artifact, creating the parent directory if needed
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let file = File::create(path)
            .with_context(|| format!("Failed to create model artifact {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self)
            .with_context(|| format!("Failed to serialize model to {}", path.display()))?;
        writer.flush()?;

        debug!(path = %path.display(), "Model artifact written");
        Ok(())
    }

    /// Read an artifact without any compatibility checks
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path)
            .with_context(|| format!("Failed to open model artifact {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to decode model artifact {}", path.display()))
    }
}

impl fmt::Debug for ModelArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelArtifact")
            .field("features", &self.feature_names.len())
            .field("classes", &self.classes)
            .field("trained_at", &self.trained_at)
            .field("training", &self.training)
            .finish_non_exhaustive()
    }
}
