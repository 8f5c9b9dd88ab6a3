//! Test Form Client
//!
//! Sends sample form submissions to a running prediction service and prints
//! the replies. Falls back to local validation when NATS is unreachable.

use breast_cancer_predictor::{
    schema::{self, VISIBLE_FEATURES},
    types::{FormDescriptor, FormSubmission, PredictionResponse},
    validator::FieldValidator,
};
use clap::Parser;
use rand::Rng;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "test_client", about = "Send sample form submissions")]
struct Args {
    #[arg(long, default_value = "nats://localhost:4222")]
    nats_url: String,

    #[arg(long, default_value = "breast_cancer.form")]
    form_subject: String,

    #[arg(long, default_value = "breast_cancer.predict")]
    predict_subject: String,

    /// Number of submissions to send
    #[arg(long, default_value_t = 20)]
    count: u64,

    /// Share of submissions with a deliberately bad field, in [0, 1]
    #[arg(long, default_value_t = 0.2, value_parser = parse_rate)]
    invalid_rate: f64,

    #[arg(long, default_value_t = 100)]
    delay_ms: u64,
}

fn parse_rate(s: &str) -> Result<f64, String> {
    let rate: f64 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(format!("{rate} is not in [0, 1]"))
    }
}

/// Random form generator for testing
struct SubmissionGenerator {
    rng: rand::rngs::ThreadRng,
}

impl SubmissionGenerator {
    fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }

    /// Every visible field within its bound, hidden fields defaulted
    fn generate_valid(&mut self) -> FormSubmission {
        let values: Vec<(&str, String)> = VISIBLE_FEATURES
            .iter()
            .map(|name| {
                let max = schema::max_value(name).unwrap_or(1.0);
                let value = self.rng.gen_range(0.1..0.9) * max;
                (*name, format!("{:.4}", value))
            })
            .collect();

        FormSubmission::from_visible(values)
    }

    /// A valid form with one field broken in a random way
    fn generate_invalid(&mut self) -> FormSubmission {
        let mut form = self.generate_valid();
        let name = VISIBLE_FEATURES[self.rng.gen_range(0..VISIBLE_FEATURES.len())];

        match self.rng.gen_range(0..3) {
            0 => {
                form.remove(name);
            }
            1 => form.insert(name, "abc"),
            _ => {
                let max = schema::max_value(name).unwrap_or(1.0);
                form.insert(name, format!("{}", max * 1.5));
            }
        }

        form
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("test_client=info".parse()?),
        )
        .init();

    let args = Args::parse();
    info!(
        nats_url = %args.nats_url,
        subject = %args.predict_subject,
        count = args.count,
        invalid_rate = args.invalid_rate,
        "Starting Test Form Client"
    );

    let client = match async_nats::connect(&args.nats_url).await {
        Ok(c) => {
            info!("Connected to NATS");
            c
        }
        Err(e) => {
            warn!(error = %e, "Failed to connect to NATS. Running in dry-run mode.");
            return run_dry_mode(&args).await;
        }
    };

    let form_reply = client
        .request(args.form_subject.clone(), Vec::new().into())
        .await?;
    let form: FormDescriptor = serde_json::from_slice(&form_reply.payload)?;
    info!(
        visible = form.visible.len(),
        hidden = form.hidden.len(),
        "Received form description"
    );

    let mut generator = SubmissionGenerator::new();
    let mut rng = rand::thread_rng();
    let (mut results, mut errors) = (0u64, 0u64);

    for i in 0..args.count {
        let submission = if rng.gen_bool(args.invalid_rate) {
            generator.generate_invalid()
        } else {
            generator.generate_valid()
        };

        let payload = serde_json::to_vec(&submission)?;
        let reply = client
            .request(args.predict_subject.clone(), payload.into())
            .await?;
        let response: PredictionResponse = serde_json::from_slice(&reply.payload)?;

        match (&response.result, &response.error) {
            (Some(result), _) => {
                results += 1;
                info!(n = i + 1, request_id = %response.request_id, "Result: {}", result);
            }
            (None, Some(error)) => {
                errors += 1;
                info!(n = i + 1, request_id = %response.request_id, "Error: {}", error);
            }
            (None, None) => warn!(n = i + 1, "Reply carried neither result nor error"),
        }

        tokio::time::sleep(Duration::from_millis(args.delay_ms)).await;
    }

    info!(
        "Completed! Sent {} submissions ({} results, {} errors)",
        args.count, results, errors
    );

    Ok(())
}

async fn run_dry_mode(args: &Args) -> anyhow::Result<()> {
    info!("Running in dry-run mode (no NATS connection)");

    let validator = FieldValidator::fail_fast();
    let mut generator = SubmissionGenerator::new();
    let mut rng = rand::thread_rng();

    for i in 0..args.count {
        let submission = if rng.gen_bool(args.invalid_rate) {
            generator.generate_invalid()
        } else {
            generator.generate_valid()
        };

        match validator.validate(&submission) {
            Ok(features) => info!(n = i + 1, "Valid submission: {:?}", &features.as_slice()[..4]),
            Err(e) => info!(n = i + 1, "Rejected submission: {}", e),
        }

        tokio::time::sleep(Duration::from_millis(args.delay_ms)).await;
    }

    Ok(())
}
