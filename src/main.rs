// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Campus CO2 command-line logger.
//!
//! Logs daily trips, meals, and electricity use to a local store and
//! reports footprint, savings, missions, badges, and streaks.

use campus_co2::{cli::Cli, config::Config};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_logging(config.log_json);

    let cli = Cli::parse();
    tracing::debug!(store = %config.store_dir.display(), "Starting campus-co2");

    campus_co2::cli::run(cli, &config)
}

/// Initialize logging to stderr, human-readable or JSON.
fn init_logging(json: bool) {
    let format = if json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(false)
            .with_current_span(true)
            .flatten_event(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed()
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("campus_co2=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
