//! JSON event documents
//!
//! Two document shapes are accepted:
//! - a native array of [`PurchaseEvent`] objects
//! - the browser extension's stats document, whose `recentBattles` list uses
//!   "defeat" for an abandoned purchase and "victory" for a completed one
//!
//! Every event is validated on load; one bad record rejects the document.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Outcome, PurchaseEvent};
use crate::source::EventSource;

/// One entry of the extension's `recentBattles` list
#[derive(Debug, Deserialize)]
struct LegacyBattle {
    result: String,
    #[serde(default)]
    amount: Option<f64>,
    #[serde(default)]
    timestamp: Option<i64>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    item: Option<String>,
}

/// The extension's stats document. Its running totals are ignored; the
/// engine recomputes everything from the battles.
#[derive(Debug, Deserialize)]
struct LegacyStats {
    #[serde(rename = "recentBattles", default)]
    recent_battles: Vec<LegacyBattle>,
}

fn legacy_outcome(result: &str) -> Option<Outcome> {
    match result.to_lowercase().as_str() {
        "defeat" => Some(Outcome::Resisted),
        "victory" => Some(Outcome::Purchased),
        _ => None,
    }
}

impl LegacyBattle {
    fn into_event(self, index: usize) -> Result<PurchaseEvent> {
        let outcome = legacy_outcome(&self.result).ok_or_else(|| {
            Error::InvalidEvent(format!(
                "record {}: unknown result \"{}\"",
                index, self.result
            ))
        })?;
        let timestamp = self
            .timestamp
            .ok_or_else(|| Error::InvalidEvent(format!("record {}: missing timestamp", index)))?;
        let description = self.description.or(self.item).unwrap_or_default();

        Ok(PurchaseEvent {
            timestamp,
            outcome,
            amount: self.amount.unwrap_or(0.0),
            description,
        })
    }
}

/// Parse a JSON document in either accepted shape
pub fn parse_document(content: &str) -> Result<Vec<PurchaseEvent>> {
    let value: Value = serde_json::from_str(content)?;

    let events = match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                serde_json::from_value::<PurchaseEvent>(item)
                    .map_err(|e| Error::InvalidEvent(format!("record {}: {}", i, e)))
            })
            .collect::<Result<Vec<_>>>()?,
        Value::Object(_) => {
            let stats: LegacyStats = serde_json::from_value(value)?;
            stats
                .recent_battles
                .into_iter()
                .enumerate()
                .map(|(i, battle)| battle.into_event(i))
                .collect::<Result<Vec<_>>>()?
        }
        _ => {
            return Err(Error::InvalidEvent(
                "document must be an event array or a stats object".to_string(),
            ))
        }
    };

    for (i, event) in events.iter().enumerate() {
        if let Some(reason) = event.invalid_reason() {
            return Err(Error::InvalidEvent(format!("record {}: {}", i, reason)));
        }
    }

    Ok(events)
}

/// Write events as a native JSON array
pub fn save_events(path: &Path, events: &[PurchaseEvent]) -> Result<()> {
    let json = serde_json::to_string_pretty(events)?;
    fs::write(path, json)?;
    debug!(path = %path.display(), events = events.len(), "Saved event document");
    Ok(())
}

/// A JSON event document on disk
#[derive(Debug, Clone)]
pub struct JsonDocument {
    path: PathBuf,
}

impl JsonDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSource for JsonDocument {
    /// A missing file is an empty document
    fn load_events(&self) -> Result<Vec<PurchaseEvent>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Event document missing, treating as empty");
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let events = parse_document(&content)?;
        debug!(path = %self.path.display(), events = events.len(), "Loaded event document");
        Ok(events)
    }
}
