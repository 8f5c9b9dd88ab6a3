//! Offline training job.
//!
//! Fits the random forest on the bundled Wisconsin diagnostic dataset (or a
//! CSV export), reports holdout metrics and writes the model artifact the
//! prediction service loads at startup.

use anyhow::{Context, Result};
use breast_cancer_predictor::{
    config::AppConfig,
    logging,
    training::{LabeledDataset, TrainingPipeline},
};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "train_model", about = "Train and serialize the tumor classifier")]
struct Args {
    /// Configuration file
    #[arg(long, default_value = "config/config.toml")]
    config: PathBuf,

    /// CSV dataset, overriding `training.dataset_path`
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Artifact path, overriding `model.artifact_path`
    #[arg(long)]
    output: Option<PathBuf>,

    /// Seed for the split and the forest
    #[arg(long)]
    seed: Option<u64>,

    /// Number of trees
    #[arg(long)]
    trees: Option<u16>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load_from_path(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;
    if let Some(dataset) = args.dataset {
        config.training.dataset_path = Some(dataset);
    }
    if let Some(output) = args.output {
        config.model.artifact_path = output;
    }
    if let Some(seed) = args.seed {
        config.training.seed = seed;
    }
    if let Some(trees) = args.trees {
        config.training.n_trees = trees;
    }

    logging::init(&config.logging, "train_model")?;

    info!(
        dataset = ?config.training.dataset_path,
        output = %config.model.artifact_path.display(),
        seed = config.training.seed,
        n_trees = config.training.n_trees,
        "Starting training"
    );

    let dataset = LabeledDataset::load(config.training.dataset_path.as_deref())?;
    let pipeline = TrainingPipeline::new(config.training.clone());
    let artifact = pipeline.run(&dataset, &config.model.artifact_path)?;

    println!(
        "Model trained and saved as {} (holdout accuracy {:.4})",
        config.model.artifact_path.display(),
        artifact.evaluation.accuracy
    );

    Ok(())
}
