use std::io::Read;

use anyhow::Context;
use commission_analytics::commissions::CommissionSummaryBuilder;
use commission_analytics::config::Config;
use commission_analytics::core::money;
use commission_analytics::timeseries::{Granularity, TimeSeriesBucketer};
use commission_analytics::transactions::Validator;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("commission_analytics={}", config.app.log_level).into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.app.log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::info!("Starting commission report ({})", config.app.env);

    let document = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read transactions from {}", path))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read transactions from stdin")?;
            buffer
        }
    };

    let outcome = Validator::new()
        .ingest_json(&document)
        .context("Failed to ingest transactions")?;

    for rejected in &outcome.rejected {
        tracing::warn!(
            "Skipping record {}: {}",
            rejected.index,
            rejected.report.errors.join("; ")
        );
    }

    let builder = CommissionSummaryBuilder::new(&config.analytics);
    let bucketer = TimeSeriesBucketer::new(&config.analytics);

    let comparison = builder
        .compare_actors(&outcome.accepted, None)
        .context("Failed to rank actors")?;
    let monthly = bucketer
        .bucket(&outcome.accepted, Granularity::Month)
        .context("Failed to build monthly series")?;

    tracing::info!(
        "Total commission across {} actors: {}",
        comparison.aggregate.actor_count,
        money::format_amount(comparison.aggregate.total_commission)
    );

    let tiered = match config.tiers.engine()? {
        Some(engine) => {
            tracing::info!("Recomputing commission with {} tiers", engine.rules().len());
            let tiered = builder
                .tiered_commission(&outcome.accepted, &engine, None)
                .context("Failed to recompute tiered commission")?;
            for (actor_id, amount) in &tiered {
                tracing::info!(
                    "Tiered commission for {}: {}",
                    actor_id,
                    money::format_amount(*amount)
                );
            }
            Some(tiered)
        }
        None => None,
    };

    let report = serde_json::json!({
        "comparison": comparison,
        "inactive": builder.find_inactive(&outcome.accepted, None),
        "monthly": monthly,
        "tieredCommission": tiered,
        "rejected": outcome.rejected.len(),
    });

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
