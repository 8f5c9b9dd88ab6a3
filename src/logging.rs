//! Tracing subscriber setup shared by the binaries

use crate::config::LoggingConfig;
use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` still applies; `target` additionally gets the configured level.
pub fn init(config: &LoggingConfig, target: &str) -> Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("{}={}", target, config.level).parse()?)
        .add_directive(format!("breast_cancer_predictor={}", config.level).parse()?);

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match config.format.as_str() {
        "json" => builder.json().init(),
        _ => builder.init(),
    }

    Ok(())
}
