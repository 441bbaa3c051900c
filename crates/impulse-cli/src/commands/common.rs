//! Shared command utilities
//!
//! This module contains:
//! - `load_settings` - Resolve the settings file
//! - `open_db` / `open_source` - Open the event source
//! - `load_events` - Load a snapshot and apply the report window

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use impulse_core::{
    events_since, Database, EventSource, JsonDocument, PurchaseEvent, Settings,
};
use tracing::debug;

/// Current time in milliseconds since epoch
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Load settings from an explicit file or the default locations
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Settings::from_path(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => Settings::load().context("Failed to load settings"),
    }
}

/// Open the database
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    Database::new(path_str).context("Failed to open database")
}

/// Open a JSON document when `--source` is given, otherwise the database
pub fn open_source(db_path: &Path, source: Option<&Path>) -> Result<Box<dyn EventSource>> {
    match source {
        Some(path) => Ok(Box::new(JsonDocument::new(path))),
        None => Ok(Box::new(open_db(db_path)?)),
    }
}

/// Load events and keep those inside the report window
///
/// `days` overrides the configured window; `Some(0)` means all time.
pub fn load_events(
    source: &dyn EventSource,
    settings: &Settings,
    days: Option<u32>,
    now: i64,
) -> Result<Vec<PurchaseEvent>> {
    let events = source.load_events().context("Failed to load events")?;

    let window = match days {
        Some(0) => None,
        Some(days) => Some(days),
        None => settings.window_days,
    };
    let window_settings = Settings {
        window_days: window,
        ..settings.clone()
    };

    let events = match window_settings.window_cutoff(now) {
        Some(cutoff) => events_since(&events, cutoff),
        None => events,
    };
    debug!(events = events.len(), window_days = ?window, "Loaded events for report");
    Ok(events)
}
