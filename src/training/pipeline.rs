//! Offline training job: split, fit, evaluate, serialize.

use crate::config::TrainingConfig;
use crate::models::artifact::{ForestModel, ModelArtifact, TrainingSummary};
use crate::schema::FEATURE_NAMES;
use crate::training::dataset::{LabeledDataset, MALIGNANT};
use crate::training::evaluation::EvaluationReport;
use anyhow::{anyhow, bail, Result};
use chrono::Utc;
use smartcore::ensemble::random_forest_classifier::RandomForestClassifierParameters;
use smartcore::model_selection::train_test_split;
use std::path::Path;
use tracing::info;

/// Fits a random forest on a labeled dataset
pub struct TrainingPipeline {
    config: TrainingConfig,
}

impl TrainingPipeline {
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    /// Split the dataset, fit the forest on the training part and evaluate
    /// it on the holdout part.
    pub fn fit(&self, dataset: &LabeledDataset) -> Result<ModelArtifact> {
        let cfg = &self.config;

        if !(0.0..1.0).contains(&cfg.test_size) {
            bail!("test_size must be in [0, 1), got {}", cfg.test_size);
        }
        dataset.check()?;

        let x = dataset.to_matrix();
        let y = dataset.labels.clone();

        let (x_train, x_test, y_train, y_test) =
            train_test_split(&x, &y, cfg.test_size, true, Some(cfg.seed));

        info!(
            train = y_train.len(),
            holdout = y_test.len(),
            seed = cfg.seed,
            "Dataset split"
        );

        let params = RandomForestClassifierParameters::default()
            .with_n_trees(cfg.n_trees)
            .with_seed(cfg.seed);

        info!(n_trees = cfg.n_trees, "Fitting random forest");
        let model = ForestModel::fit(&x_train, &y_train, params)
            .map_err(|e| anyhow!("random forest training failed: {e}"))?;

        let evaluation = if y_test.is_empty() {
            EvaluationReport::compute(&[], &[], MALIGNANT)
        } else {
            let predicted = model
                .predict(&x_test)
                .map_err(|e| anyhow!("holdout prediction failed: {e}"))?;
            EvaluationReport::compute(&y_test, &predicted, MALIGNANT)
        };
        evaluation.log();

        let artifact = ModelArtifact {
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            classes: dataset.classes(),
            class_names: dataset.class_names.clone(),
            trained_at: Utc::now(),
            training: TrainingSummary {
                dataset: dataset.source.clone(),
                seed: cfg.seed,
                test_size: cfg.test_size,
                n_trees: cfg.n_trees,
                train_samples: y_train.len(),
                holdout_samples: y_test.len(),
            },
            evaluation,
            model,
        };

        Ok(artifact)
    }

    /// Fit and write the artifact to `output`
    pub fn run<P: AsRef<Path>>(&self, dataset: &LabeledDataset, output: P) -> Result<ModelArtifact> {
        let output = output.as_ref();
        let artifact = self.fit(dataset)?;
        artifact.save(output)?;

        info!(path = %output.display(), "Model trained and saved");
        Ok(artifact)
    }
}
