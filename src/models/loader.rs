//! Model artifact loader

use crate::models::artifact::ModelArtifact;
use crate::models::labels::LabelMap;
use crate::schema::FEATURE_NAMES;
use anyhow::{bail, Context, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

/// Loads the trained forest and refuses artifacts the service cannot serve
pub struct ModelLoader {
    labels: LabelMap,
}

impl ModelLoader {
    /// Create a loader that checks artifacts against `labels`
    pub fn new(labels: LabelMap) -> Self {
        Self { labels }
    }

    /// Load and check the artifact at `path`.
    ///
    /// Fails if the file is missing or undecodable, if the feature order
    /// differs from the serving schema, or if the label mapping does not fit
    /// the model's classes.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<ModelArtifact> {
        let path = path.as_ref();

        info!(path = %path.display(), "Loading model artifact");

        if !path.exists() {
            bail!(
                "Model artifact {} not found. Run `train_model` first.",
                path.display()
            );
        }

        let artifact = ModelArtifact::read(path)?;

        check_feature_order(&artifact.feature_names)
            .with_context(|| format!("Model artifact {} is incompatible", path.display()))?;
        self.labels
            .check_classes(&artifact.classes)
            .with_context(|| format!("Model artifact {} is incompatible", path.display()))?;

        check_class_names(&self.labels, &artifact.class_names)
            .with_context(|| format!("Model artifact {} is incompatible", path.display()))?;

        info!(
            trained_at = %artifact.trained_at,
            dataset = %artifact.training.dataset,
            n_trees = artifact.training.n_trees,
            holdout_accuracy = %format!("{:.4}", artifact.evaluation.accuracy),
            "Model loaded successfully"
        );

        Ok(artifact)
    }
}

impl Default for ModelLoader {
    fn default() -> Self {
        Self::new(LabelMap::default())
    }
}

/// The training data's name for the configured malignant class must say so
fn check_class_names(labels: &LabelMap, class_names: &BTreeMap<u32, String>) -> Result<()> {
    let malignant = labels.malignant_class();
    match class_names.get(&malignant) {
        Some(name) if !name.to_lowercase().contains("malignant") => bail!(
            "configured malignant class {malignant} is `{name}` in the training data"
        ),
        Some(_) => Ok(()),
        None => {
            warn!(
                class = malignant,
                "Training data does not name the configured malignant class"
            );
            Ok(())
        }
    }
}

fn check_feature_order(names: &[String]) -> Result<()> {
    if names.len() != FEATURE_NAMES.len() {
        bail!(
            "model was trained on {} features, expected {}",
            names.len(),
            FEATURE_NAMES.len()
        );
    }

    if let Some((i, (found, expected))) = names
        .iter()
        .zip(FEATURE_NAMES)
        .enumerate()
        .find(|(_, (found, expected))| found.as_str() != *expected)
    {
        bail!("feature {i} is `{found}`, expected `{expected}`");
    }

    Ok(())
}
