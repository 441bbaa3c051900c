//! Domain models for Impulse Guard

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How a purchase prompt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The user walked away; `amount` counts as money saved
    Resisted,
    /// The user bought the item; `amount` counts as money spent
    Purchased,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resisted => "resisted",
            Self::Purchased => "purchased",
        }
    }
}

impl std::str::FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "resisted" => Ok(Self::Resisted),
            "purchased" => Ok(Self::Purchased),
            _ => Err(format!("Unknown outcome: {}", s)),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One recorded purchase decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseEvent {
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub outcome: Outcome,
    /// Money saved (resisted) or spent (purchased)
    pub amount: f64,
    /// Free-text item label, only used for classification
    #[serde(default)]
    pub description: String,
}

impl PurchaseEvent {
    pub fn new(timestamp: i64, outcome: Outcome, amount: f64, description: &str) -> Self {
        Self {
            timestamp,
            outcome,
            amount,
            description: description.to_string(),
        }
    }

    pub fn resisted(timestamp: i64, amount: f64, description: &str) -> Self {
        Self::new(timestamp, Outcome::Resisted, amount, description)
    }

    pub fn purchased(timestamp: i64, amount: f64, description: &str) -> Self {
        Self::new(timestamp, Outcome::Purchased, amount, description)
    }

    /// Check the field constraints adapters must enforce before handing
    /// events to the engine. The engine itself never calls this.
    pub fn validate(&self) -> Result<()> {
        match self.invalid_reason() {
            Some(reason) => Err(Error::InvalidEvent(reason)),
            None => Ok(()),
        }
    }

    /// Why [`validate`](Self::validate) would reject this event, if it would
    pub fn invalid_reason(&self) -> Option<String> {
        if self.timestamp < 0 {
            return Some(format!("negative timestamp {}", self.timestamp));
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Some(format!(
                "amount must be a non-negative number, got {}",
                self.amount
            ));
        }
        None
    }

    /// Calendar day of this event at the given UTC offset
    ///
    /// Returns `None` when the timestamp is outside chrono's representable range.
    pub fn date_at(&self, offset: &FixedOffset) -> Option<NaiveDate> {
        DateTime::from_timestamp_millis(self.timestamp)
            .map(|dt| dt.with_timezone(offset).date_naive())
    }
}

/// Fixed purchase taxonomy
///
/// Declaration order is the classifier's tie-break order and the radar axis order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Fashion,
    Food,
    Entertainment,
    Home,
    Beauty,
    Fitness,
    #[default]
    Other,
}

impl Category {
    pub const COUNT: usize = 8;

    pub const ALL: [Category; Category::COUNT] = [
        Self::Electronics,
        Self::Fashion,
        Self::Food,
        Self::Entertainment,
        Self::Home,
        Self::Beauty,
        Self::Fitness,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Electronics => "electronics",
            Self::Fashion => "fashion",
            Self::Food => "food",
            Self::Entertainment => "entertainment",
            Self::Home => "home",
            Self::Beauty => "beauty",
            Self::Fitness => "fitness",
            Self::Other => "other",
        }
    }

    /// Display label (used as the radar axis name)
    pub fn label(&self) -> &'static str {
        match self {
            Self::Electronics => "Electronics",
            Self::Fashion => "Fashion",
            Self::Food => "Food",
            Self::Entertainment => "Entertainment",
            Self::Home => "Home",
            Self::Beauty => "Beauty",
            Self::Fitness => "Fitness",
            Self::Other => "Other",
        }
    }

    /// Position in the fixed category order
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-category rollup
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryStats {
    pub total: usize,
    pub purchased_count: usize,
    pub resisted_count: usize,
    pub amount_spent: f64,
    pub amount_saved: f64,
}

/// Rollup for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub resisted_count: usize,
    pub purchased_count: usize,
    pub amount_saved: f64,
}

impl DailyAggregate {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            resisted_count: 0,
            purchased_count: 0,
            amount_saved: 0.0,
        }
    }
}

/// Run of consecutive most-recent events sharing one outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakState {
    pub length: usize,
    /// `None` exactly when `length == 0`
    pub outcome: Option<Outcome>,
}

/// Everything the aggregator derives from one event snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub total_events: usize,
    pub resisted_count: usize,
    pub purchased_count: usize,
    pub amount_saved: f64,
    pub amount_spent: f64,
    /// Always holds all eight categories
    pub categories: BTreeMap<Category, CategoryStats>,
    /// Ascending by date, one entry per day
    pub timeline: Vec<DailyAggregate>,
    pub streak: StreakState,
    /// Largest resisted amount, 0 when nothing was resisted
    pub biggest_save: f64,
}

impl AggregateResult {
    /// All-zero result with every category present
    pub fn empty() -> Self {
        Self {
            total_events: 0,
            resisted_count: 0,
            purchased_count: 0,
            amount_saved: 0.0,
            amount_spent: 0.0,
            categories: Category::ALL
                .iter()
                .map(|c| (*c, CategoryStats::default()))
                .collect(),
            timeline: Vec::new(),
            streak: StreakState::default(),
            biggest_save: 0.0,
        }
    }

    /// Stats for one category
    pub fn category(&self, category: Category) -> CategoryStats {
        self.categories
            .get(&category)
            .copied()
            .unwrap_or_default()
    }
}

/// An event paired with its category, for recent-activity listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentEvent {
    #[serde(flatten)]
    pub event: PurchaseEvent,
    pub category: Category,
}

/// Outcome of a bulk import into the event store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportStats {
    pub inserted: usize,
    pub duplicates: usize,
}
