//! Mapping from model class values to diagnosis labels

use crate::config::LabelConfig;
use crate::types::response::Diagnosis;
use anyhow::{bail, Result};

/// Binary class-to-label mapping.
///
/// The malignant class gets the malignant label and every other class the
/// benign label, so the map is only meaningful for two-class models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    malignant_class: u32,
    malignant_label: String,
    benign_label: String,
}

impl LabelMap {
    pub fn new(
        malignant_class: u32,
        malignant_label: impl Into<String>,
        benign_label: impl Into<String>,
    ) -> Self {
        Self {
            malignant_class,
            malignant_label: malignant_label.into(),
            benign_label: benign_label.into(),
        }
    }

    pub fn from_config(config: &LabelConfig) -> Self {
        Self::new(
            config.malignant_class,
            config.malignant_label.clone(),
            config.benign_label.clone(),
        )
    }

    pub fn malignant_class(&self) -> u32 {
        self.malignant_class
    }

    /// Label for a class value
    pub fn label(&self, class: u32) -> &str {
        if class == self.malignant_class {
            &self.malignant_label
        } else {
            &self.benign_label
        }
    }

    pub fn diagnose(&self, class: u32) -> Diagnosis {
        Diagnosis {
            class,
            label: self.label(class).to_string(),
        }
    }

    /// Check the mapping against the classes a model was trained on.
    pub fn check_classes(&self, classes: &[u32]) -> Result<()> {
        if classes.len() != 2 {
            bail!(
                "label mapping expects a binary model, but the model has {} classes: {:?}",
                classes.len(),
                classes
            );
        }
        if !classes.contains(&self.malignant_class) {
            bail!(
                "malignant class {} is not one of the model's classes {:?}",
                self.malignant_class,
                classes
            );
        }
        Ok(())
    }
}

impl Default for LabelMap {
    fn default() -> Self {
        Self::from_config(&LabelConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mapping() {
        let labels = LabelMap::default();
        assert_eq!(labels.label(0), "Malignant (Cancer)");
        assert_eq!(labels.label(1), "Benign (Non-cancerous)");
        // Anything that is not the malignant class reads as benign
        assert_eq!(labels.label(7), "Benign (Non-cancerous)");
    }

    #[test]
    fn test_inverted_encoding() {
        let labels = LabelMap::new(1, "Malignant", "Benign");
        assert_eq!(labels.diagnose(1).label, "Malignant");
        assert_eq!(labels.diagnose(0).label, "Benign");
    }

    #[test]
    fn test_check_classes() {
        let labels = LabelMap::default();
        assert!(labels.check_classes(&[0, 1]).is_ok());
        assert!(labels.check_classes(&[1, 2]).is_err());
        assert!(labels.check_classes(&[0, 1, 2]).is_err());
        assert!(labels.check_classes(&[0]).is_err());
    }
}
