//! Model artifact, loading and inference components

pub mod artifact;
pub mod classifier;
pub mod inference;
pub mod labels;
pub mod loader;

pub use artifact::{ForestModel, ModelArtifact, TrainingSummary};
pub use classifier::Classifier;
pub use inference::Predictor;
pub use labels::LabelMap;
pub use loader::ModelLoader;
