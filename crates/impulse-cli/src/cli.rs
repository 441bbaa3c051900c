//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Impulse Guard - See what resisting impulse buys saved you
#[derive(Parser)]
#[command(name = "impulse")]
#[command(about = "Purchase-decision analytics for Impulse Guard", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "impulse.db", global = true)]
    pub db: PathBuf,

    /// Read events from a JSON document instead of the database
    ///
    /// Accepts a native event array or the extension's stats.json.
    #[arg(long, global = true)]
    pub source: Option<PathBuf>,

    /// Settings file (defaults to ~/.local/share/impulse-guard/config/impulse.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show totals, savings, success rate and the current streak
    Summary {
        /// Only include the last N days (0 = all time)
        #[arg(short, long)]
        days: Option<u32>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the per-category breakdown
    Categories {
        /// Only include the last N days (0 = all time)
        #[arg(short, long)]
        days: Option<u32>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the daily timeline
    Timeline {
        /// Only include the last N days (0 = all time)
        #[arg(short, long)]
        days: Option<u32>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show frequency vs. amount per category on one scale
    Radar {
        /// Amount series: spent, saved
        #[arg(short, long, default_value = "spent")]
        metric: String,

        /// Only include the last N days (0 = all time)
        #[arg(short, long)]
        days: Option<u32>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the current streak
    Streak {
        /// Only include the last N days (0 = all time)
        #[arg(short, long)]
        days: Option<u32>,
    },

    /// List the most recent decisions
    Recent {
        /// Number of events to show (defaults to the configured limit)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Only include the last N days (0 = all time)
        #[arg(short, long)]
        days: Option<u32>,
    },

    /// Classify an item description
    Classify {
        /// Item description (e.g., "Designer watch")
        description: String,
    },

    /// Record a decision in the database
    Log {
        /// Item description
        #[arg(short = 'D', long)]
        description: String,

        /// Amount saved (resisted) or spent (purchased)
        #[arg(short, long)]
        amount: f64,

        /// Outcome: resisted, purchased
        #[arg(short, long)]
        outcome: String,

        /// Milliseconds since epoch (defaults to now)
        #[arg(short, long)]
        timestamp: Option<i64>,
    },

    /// Import a JSON event document into the database
    Import {
        /// JSON file to import (event array or stats.json)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Export events from the current source
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Output format: json, csv
        #[arg(short, long, default_value = "json")]
        format: String,
    },
}
