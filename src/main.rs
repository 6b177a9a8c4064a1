use std::fs;
use std::sync::Arc;

use anyhow::Context;
use sextant::config::Config;
use sextant::services::{pipeline, AnalysisContext, MarketInput, ReportAssembler};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sextant=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Starting sextant for {} from {}",
        config.symbol,
        config.input.display()
    );

    let raw = fs::read_to_string(&config.input)
        .with_context(|| format!("reading {}", config.input.display()))?;
    let input: MarketInput = serde_json::from_str(&raw).context("parsing market input")?;

    let ctx = Arc::new(AnalysisContext::new(config.symbol.clone()));
    let report = if config.concurrent {
        pipeline::run_concurrent(input, &config.analysis, Arc::clone(&ctx)).await
    } else {
        pipeline::run(input, &config.analysis, &ctx)
    };

    let value = ReportAssembler::to_value(&report)?;
    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;
    let path = config
        .output_dir
        .join(format!("{}.json", report.date.replace('-', "")));
    fs::write(&path, serde_json::to_string_pretty(&value)?)
        .with_context(|| format!("writing {}", path.display()))?;

    info!(
        "Report written to {} ({} diagnostics)",
        path.display(),
        report.diagnostics.len()
    );
    Ok(())
}
