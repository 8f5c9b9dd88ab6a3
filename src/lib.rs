//! Breast Cancer Prediction Library
//!
//! Validates tumor measurement forms, runs them through a trained random
//! forest and reports a benign/malignant diagnosis. Also carries the offline
//! training job that produces the model artifact.

pub mod config;
pub mod consumer;
pub mod error;
pub mod logging;
pub mod models;
pub mod orchestrator;
pub mod producer;
pub mod schema;
pub mod training;
pub mod types;
pub mod validator;

pub use config::AppConfig;
pub use consumer::RequestConsumer;
pub use error::{FieldError, RequestError, ValidationFailure};
pub use models::{Classifier, LabelMap, ModelArtifact, ModelLoader, Predictor};
pub use orchestrator::RequestOrchestrator;
pub use producer::ReplyProducer;
pub use types::{Diagnosis, FormDescriptor, FormSubmission, PredictionResponse};
pub use validator::{FeatureVector, FieldValidator};
