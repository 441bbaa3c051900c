//! Impulse Guard CLI - Purchase-decision analytics
//!
//! Usage:
//!   impulse summary                     Totals, savings and streak
//!   impulse categories --days 7         Per-category breakdown
//!   impulse radar --metric saved        Frequency vs. amount per category
//!   impulse import --file stats.json    Load extension data into the database

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let settings = commands::load_settings(cli.config.as_deref())?;
    let source = || commands::open_source(&cli.db, cli.source.as_deref());
    let now = commands::now_ms();

    match cli.command {
        Commands::Summary { days, json } => {
            let events = commands::load_events(source()?.as_ref(), &settings, days, now)?;
            commands::cmd_summary(&events, &settings, json)
        }
        Commands::Categories { days, json } => {
            let events = commands::load_events(source()?.as_ref(), &settings, days, now)?;
            commands::cmd_categories(&events, &settings, json)
        }
        Commands::Timeline { days, json } => {
            let events = commands::load_events(source()?.as_ref(), &settings, days, now)?;
            commands::cmd_timeline(&events, &settings, json)
        }
        Commands::Radar { metric, days, json } => {
            let metric = metric.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            let events = commands::load_events(source()?.as_ref(), &settings, days, now)?;
            commands::cmd_radar(&events, &settings, metric, json)
        }
        Commands::Streak { days } => {
            let events = commands::load_events(source()?.as_ref(), &settings, days, now)?;
            commands::cmd_streak(&events)
        }
        Commands::Recent { limit, days } => {
            let events = commands::load_events(source()?.as_ref(), &settings, days, now)?;
            commands::cmd_recent(&events, &settings, limit.unwrap_or(settings.recent_limit))
        }
        Commands::Classify { description } => commands::cmd_classify(&description),
        Commands::Log {
            description,
            amount,
            outcome,
            timestamp,
        } => {
            let db = commands::open_db(&cli.db)?;
            let outcome = outcome.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            commands::cmd_log(&db, &description, amount, outcome, timestamp.unwrap_or(now))
        }
        Commands::Import { file } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_import(&db, &file)
        }
        Commands::Export { output, format } => {
            let format = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            let events = commands::load_events(source()?.as_ref(), &settings, Some(0), now)?;
            commands::cmd_export(&events, &output, format)
        }
    }
}
