//! Settings for reports and daily bucketing
//!
//! ## Configuration Resolution
//!
//! Settings are loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/impulse-guard/config/impulse.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Duration, FixedOffset, Local, Offset, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::aggregate::Aggregator;
use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/impulse.toml");

/// Largest accepted UTC offset, in minutes
const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

/// Resolved settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Only aggregate events from the last N days (`None` = all time)
    pub window_days: Option<u32>,
    /// Rows shown in recent-activity listings
    pub recent_limit: usize,
    /// Rows shown in the top categories table
    pub top_categories: usize,
    /// Fixed offset for daily buckets (`None` = machine local offset)
    pub utc_offset_minutes: Option<i32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_days: Some(30),
            recent_limit: 10,
            top_categories: 5,
            utc_offset_minutes: None,
        }
    }
}

impl Settings {
    /// Load settings from the default override location or the embedded defaults
    pub fn load() -> Result<Self> {
        load_config(None)
    }

    /// Load settings from an explicit path, falling back to embedded defaults
    /// when the file does not exist
    pub fn from_path(path: &Path) -> Result<Self> {
        load_config(Some(path))
    }

    /// Offset used for daily buckets
    pub fn utc_offset(&self) -> FixedOffset {
        match self.utc_offset_minutes {
            Some(minutes) => FixedOffset::east_opt(minutes * 60).unwrap_or_else(|| Utc.fix()),
            None => Local::now().offset().fix(),
        }
    }

    /// Aggregator configured with this offset
    pub fn aggregator(&self) -> Aggregator {
        Aggregator::with_offset(self.utc_offset())
    }

    /// Millisecond cutoff for the report window, relative to `now_ms`
    pub fn window_cutoff(&self, now_ms: i64) -> Option<i64> {
        self.window_days
            .map(|days| now_ms - Duration::days(i64::from(days)).num_milliseconds())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| {
        d.join("impulse-guard")
            .join("config")
            .join("impulse.toml")
    })
}

/// Load configuration (override first, then default)
fn load_config(override_path: Option<&Path>) -> Result<Settings> {
    let path = override_path
        .map(Path::to_path_buf)
        .or_else(default_config_path)
        .filter(|p| p.exists());

    let content = match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading settings override");
            fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?
        }
        None => DEFAULT_CONFIG.to_string(),
    };

    parse_config(&content)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    report: Option<RawReport>,
    timeline: Option<RawTimeline>,
}

#[derive(Debug, Deserialize)]
struct RawReport {
    window_days: Option<u32>,
    recent_limit: Option<usize>,
    top_categories: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawTimeline {
    utc_offset_minutes: Option<i32>,
}

/// Parse settings from TOML content
pub fn parse_config(content: &str) -> Result<Settings> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut settings = Settings::default();

    if let Some(report) = raw.report {
        if let Some(days) = report.window_days {
            settings.window_days = (days > 0).then_some(days);
        }
        if let Some(limit) = report.recent_limit {
            settings.recent_limit = limit;
        }
        if let Some(top) = report.top_categories {
            settings.top_categories = top;
        }
    }

    if let Some(timeline) = raw.timeline {
        if let Some(minutes) = timeline.utc_offset_minutes {
            if minutes.abs() > MAX_OFFSET_MINUTES {
                return Err(Error::Config(format!(
                    "utc_offset_minutes must be within ±{}, got {}",
                    MAX_OFFSET_MINUTES, minutes
                )));
            }
            settings.utc_offset_minutes = Some(minutes);
        }
    }

    Ok(settings)
}
