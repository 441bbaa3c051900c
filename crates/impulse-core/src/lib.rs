//! Impulse Guard Core Library
//!
//! Purchase-decision analytics for the Impulse Guard tools:
//! - Canonical event model (resisted vs. purchased decisions)
//! - Keyword classifier over a fixed eight-category taxonomy
//! - Aggregator: category rollups, daily timeline, streaks, biggest save
//! - Radar normalizer for plotting counts and amounts on one axis
//! - Event sources: JSON documents and a pooled SQLite store
//! - Settings with embedded defaults and a user override file
//!
//! The analytics functions are pure: they read a snapshot of events and
//! return fresh structures, so they can be called from any thread.

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod db;
pub mod document;
pub mod error;
pub mod export;
pub mod models;
pub mod radar;
pub mod source;

pub use aggregate::{aggregate, current_streak, events_since, recent_events, Aggregator};
pub use classify::classify;
pub use config::Settings;
pub use db::Database;
pub use document::JsonDocument;
pub use error::{Error, Result};
pub use export::ExportFormat;
pub use models::{
    AggregateResult, Category, CategoryStats, DailyAggregate, ImportStats, Outcome,
    PurchaseEvent, RecentEvent, StreakState,
};
pub use radar::{normalize, RadarMetric, RadarSeries};
pub use source::EventSource;
