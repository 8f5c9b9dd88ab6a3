//! Configuration management for the prediction service and training job

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// How the validator reacts to bad fields
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Report only the first failing field (the form's historical behaviour)
    #[default]
    FailFast,
    /// Check all 30 fields and report every failure together
    Accumulate,
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub nats: NatsConfig,
    pub model: ModelConfig,
    pub training: TrainingConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub labels: LabelConfig,
    pub service: ServiceConfig,
    pub logging: LoggingConfig,
}

/// NATS connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NatsConfig {
    /// NATS server URL
    pub url: String,
    /// Subject answering with the form description
    pub form_subject: String,
    /// Subject accepting form submissions
    pub predict_subject: String,
}

/// Model artifact location
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Path of the serialized model written by `train_model`
    pub artifact_path: PathBuf,
}

/// Offline training parameters
#[derive(Debug, Clone, Deserialize)]
pub struct TrainingConfig {
    /// CSV dataset; the bundled Wisconsin diagnostic data is used when unset
    #[serde(default)]
    pub dataset_path: Option<PathBuf>,
    /// Fraction of samples held out for evaluation
    #[serde(default = "default_test_size")]
    pub test_size: f32,
    /// Seed for the split and the forest
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Number of trees in the forest
    #[serde(default = "default_n_trees")]
    pub n_trees: u16,
}

fn default_test_size() -> f32 {
    0.2
}

fn default_seed() -> u64 {
    42
}

fn default_n_trees() -> u16 {
    100
}

/// Validator behaviour
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub mode: ValidationMode,
}

/// Class value to label mapping
#[derive(Debug, Clone, Deserialize)]
pub struct LabelConfig {
    /// Class the model emits for malignant tumors
    #[serde(default)]
    pub malignant_class: u32,
    #[serde(default = "default_malignant_label")]
    pub malignant_label: String,
    /// Label for every other class
    #[serde(default = "default_benign_label")]
    pub benign_label: String,
}

fn default_malignant_label() -> String {
    "Malignant (Cancer)".to_string()
}

fn default_benign_label() -> String {
    "Benign (Non-cancerous)".to_string()
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            malignant_class: 0,
            malignant_label: default_malignant_label(),
            benign_label: default_benign_label(),
        }
    }
}

/// Request loop configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Maximum requests handled concurrently
    pub workers: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default log level when RUST_LOG is unset (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl AppConfig {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            nats: NatsConfig {
                url: "nats://localhost:4222".to_string(),
                form_subject: "breast_cancer.form".to_string(),
                predict_subject: "breast_cancer.predict".to_string(),
            },
            model: ModelConfig {
                artifact_path: PathBuf::from("model/model.json"),
            },
            training: TrainingConfig {
                dataset_path: None,
                test_size: default_test_size(),
                seed: default_seed(),
                n_trees: default_n_trees(),
            },
            validation: ValidationConfig::default(),
            labels: LabelConfig::default(),
            service: ServiceConfig { workers: 4 },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}
