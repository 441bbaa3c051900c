//! Bulk event export
//!
//! Supports:
//! - CSV with one row per event plus its category
//! - JSON in the native event document shape

use std::io::Write;

use serde::Serialize;

use crate::classify::classify;
use crate::error::Result;
use crate::models::{Category, Outcome, PurchaseEvent};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    Csv,
    #[default]
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown export format: {}", s)),
        }
    }
}

/// CSV column names, in `EventRow` field order
const CSV_HEADER: [&str; 5] = ["timestamp", "outcome", "amount", "category", "description"];

/// One CSV row
#[derive(Debug, Serialize)]
struct EventRow<'a> {
    timestamp: i64,
    outcome: Outcome,
    amount: f64,
    category: Category,
    description: &'a str,
}

/// Write `events` to `writer`, returning the number of events written
pub fn export_events<W: Write>(
    mut writer: W,
    events: &[PurchaseEvent],
    format: ExportFormat,
) -> Result<usize> {
    match format {
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, events)?;
            writer.flush()?;
        }
        ExportFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            // serialize() only emits the header alongside the first row
            if events.is_empty() {
                csv_writer.write_record(CSV_HEADER)?;
            }
            for event in events {
                csv_writer.serialize(EventRow {
                    timestamp: event.timestamp,
                    outcome: event.outcome,
                    amount: event.amount,
                    category: classify(&event.description),
                    description: &event.description,
                })?;
            }
            csv_writer.flush()?;
        }
    }
    Ok(events.len())
}
