//! Breast Cancer Prediction Service - Main Entry Point
//!
//! Loads the trained forest once, then answers form and prediction requests
//! over NATS request/reply.

use anyhow::{Context, Result};
use breast_cancer_predictor::{
    config::AppConfig,
    consumer::{RequestConsumer, RequestKind},
    logging,
    models::{Classifier, LabelMap, ModelLoader},
    orchestrator::RequestOrchestrator,
    producer::ReplyProducer,
};
use clap::Parser;
use futures::StreamExt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "predictor", about = "Serve breast cancer predictions over NATS")]
struct Args {
    /// Configuration file
    #[arg(long, default_value = "config/config.toml")]
    config: PathBuf,

    /// Model artifact, overriding `model.artifact_path`
    #[arg(long)]
    model: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load_from_path(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;
    if let Some(model) = args.model {
        config.model.artifact_path = model;
    }

    logging::init(&config.logging, "predictor")?;

    info!("Starting Breast Cancer Prediction Service");
    info!(
        validation = ?config.validation.mode,
        malignant_class = config.labels.malignant_class,
        "Configuration loaded successfully"
    );

    // The service must not come up without a usable model
    let loader = ModelLoader::new(LabelMap::from_config(&config.labels));
    let artifact = loader.load(&config.model.artifact_path)?;
    let classifier: Arc<dyn Classifier> = Arc::new(artifact);

    let orchestrator = Arc::new(RequestOrchestrator::from_config(classifier, &config));

    // Connect to NATS
    let client = async_nats::connect(&config.nats.url)
        .await
        .with_context(|| format!("Failed to connect to NATS at {}", config.nats.url))?;
    info!("Connected to NATS at {}", config.nats.url);

    let consumer = RequestConsumer::new(
        client.clone(),
        &config.nats.form_subject,
        &config.nats.predict_subject,
    );
    let producer = ReplyProducer::new(client.clone());

    let semaphore = Arc::new(Semaphore::new(config.service.workers.max(1)));
    info!(
        workers = config.service.workers,
        form_subject = consumer.form_subject(),
        predict_subject = consumer.predict_subject(),
        "Starting request loop"
    );

    let mut requests = consumer.subscribe().await?;

    loop {
        let request = tokio::select! {
            request = requests.next() => match request {
                Some(request) => request,
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        };

        // Acquire permit (limits concurrent requests)
        let permit = semaphore.clone().acquire_owned().await?;

        let orchestrator = orchestrator.clone();
        let producer = producer.clone();

        tokio::spawn(async move {
            let start_time = Instant::now();
            let message = request.message;

            let Some(reply_to) = message.reply.clone() else {
                warn!(subject = %message.subject, "Request without reply subject ignored");
                return;
            };

            let published = match request.kind {
                RequestKind::Form => producer.reply(reply_to, orchestrator.form()).await,
                RequestKind::Predict => {
                    let response = orchestrator.respond_json(&message.payload);
                    debug!(
                        request_id = %response.request_id,
                        result = ?response.result,
                        error = ?response.error,
                        processing_time_us = start_time.elapsed().as_micros(),
                        "Prediction request handled"
                    );
                    producer.reply(reply_to, &response).await
                }
            };

            if let Err(e) = published {
                error!(kind = ?request.kind, error = %e, "Failed to publish reply");
            }

            drop(permit);
        });
    }

    info!("Prediction service shutting down...");
    client.flush().await.ok();

    Ok(())
}
