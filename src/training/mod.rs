//! Offline model training

pub mod dataset;
pub mod evaluation;
pub mod pipeline;

pub use dataset::LabeledDataset;
pub use evaluation::EvaluationReport;
pub use pipeline::TrainingPipeline;
