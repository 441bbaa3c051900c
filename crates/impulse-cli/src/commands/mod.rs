//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `common` - Shared utilities (settings, opening sources, loading events)
//! - `events` - Recording, importing, exporting and classifying events
//! - `reports` - Report commands (summary, categories, timeline, radar, streak, recent)

pub mod common;
pub mod events;
pub mod reports;

// Re-export command functions for main.rs
pub use common::*;
pub use events::*;
pub use reports::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
