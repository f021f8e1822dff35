//! # Carousel Replay
//!
//! Replays a carousel scenario and prints one JSON record per step.

use std::io::Write;

use anyhow::Context;
use carousel_replay::{run, CliArgs, ReplayConfig};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing on stderr so stdout carries only records.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,carousel_core=debug".into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    // Use JSON format when RUST_LOG_FORMAT=json
    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = ReplayConfig::from(args);

    tracing::info!(
        scenario = %config.scenario.display(),
        accept_proposals = config.accept_proposals,
        "Starting carousel replay"
    );

    let scenario = config
        .load_scenario()
        .with_context(|| format!("Failed to load {}", config.scenario.display()))?;
    let records = run(&scenario, config.accept_proposals).context("Failed to start carousel")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for record in &records {
        if config.pretty {
            serde_json::to_writer_pretty(&mut out, record)?;
        } else {
            serde_json::to_writer(&mut out, record)?;
        }
        writeln!(out)?;
    }
    out.flush()?;

    Ok(())
}
