//! Purchase-decision aggregation
//!
//! A stateless batch transform: one pass over the event snapshot builds the
//! per-category rollups, daily buckets and grand totals, then a stable sort by
//! timestamp yields the current streak. Derived rates are zero-guarded.

use std::collections::BTreeMap;

use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use tracing::{debug, warn};

use crate::classify::classify;
use crate::models::{
    AggregateResult, Category, CategoryStats, DailyAggregate, Outcome, PurchaseEvent,
    RecentEvent, StreakState,
};

/// Aggregates event snapshots, bucketing days at a fixed UTC offset
#[derive(Debug, Clone, Copy)]
pub struct Aggregator {
    offset: FixedOffset,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator {
    /// Aggregator that buckets days in UTC
    pub fn new() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    /// Aggregator that buckets days at the given offset
    pub fn with_offset(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn aggregate(&self, events: &[PurchaseEvent]) -> AggregateResult {
        let mut result = AggregateResult::empty();
        let mut days: BTreeMap<NaiveDate, DailyAggregate> = BTreeMap::new();

        for event in events {
            let stats = result
                .categories
                .entry(classify(&event.description))
                .or_default();
            stats.total += 1;

            match event.outcome {
                Outcome::Resisted => {
                    stats.resisted_count += 1;
                    stats.amount_saved += event.amount;
                    result.resisted_count += 1;
                    result.amount_saved += event.amount;
                    result.biggest_save = result.biggest_save.max(event.amount);
                }
                Outcome::Purchased => {
                    stats.purchased_count += 1;
                    stats.amount_spent += event.amount;
                    result.purchased_count += 1;
                    result.amount_spent += event.amount;
                }
            }

            match event.date_at(&self.offset) {
                Some(date) => {
                    let day = days
                        .entry(date)
                        .or_insert_with(|| DailyAggregate::new(date));
                    match event.outcome {
                        Outcome::Resisted => {
                            day.resisted_count += 1;
                            day.amount_saved += event.amount;
                        }
                        Outcome::Purchased => day.purchased_count += 1,
                    }
                }
                None => warn!(
                    timestamp = event.timestamp,
                    "Timestamp out of range, event left out of the daily timeline"
                ),
            }
        }

        result.total_events = events.len();
        result.timeline = days.into_values().collect();
        result.streak = current_streak(events);

        debug!(
            events = result.total_events,
            days = result.timeline.len(),
            streak = result.streak.length,
            "Aggregated purchase events"
        );

        result
    }
}

/// Aggregate with days bucketed in UTC
pub fn aggregate(events: &[PurchaseEvent]) -> AggregateResult {
    Aggregator::new().aggregate(events)
}

/// Events ordered most recent first; equal timestamps keep input order
fn most_recent_first(events: &[PurchaseEvent]) -> Vec<&PurchaseEvent> {
    let mut sorted: Vec<&PurchaseEvent> = events.iter().collect();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted
}

/// Count consecutive most-recent events sharing the latest event's outcome
pub fn current_streak(events: &[PurchaseEvent]) -> StreakState {
    let sorted = most_recent_first(events);
    let Some(latest) = sorted.first() else {
        return StreakState::default();
    };

    let length = sorted
        .iter()
        .take_while(|e| e.outcome == latest.outcome)
        .count();

    StreakState {
        length,
        outcome: Some(latest.outcome),
    }
}

/// The `limit` most recent events with their categories
pub fn recent_events(events: &[PurchaseEvent], limit: usize) -> Vec<RecentEvent> {
    most_recent_first(events)
        .into_iter()
        .take(limit)
        .map(|e| RecentEvent {
            category: classify(&e.description),
            event: e.clone(),
        })
        .collect()
}

/// Events at or after `cutoff_ms`
pub fn events_since(events: &[PurchaseEvent], cutoff_ms: i64) -> Vec<PurchaseEvent> {
    events
        .iter()
        .filter(|e| e.timestamp >= cutoff_ms)
        .cloned()
        .collect()
}

/// `numerator / denominator`, or 0 when the denominator is zero
fn ratio(numerator: f64, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator / denominator as f64
    }
}

impl AggregateResult {
    /// Percentage of events that were resisted
    pub fn success_rate(&self) -> f64 {
        ratio(self.resisted_count as f64, self.total_events) * 100.0
    }

    /// Mean saved amount per resisted event
    pub fn average_save(&self) -> f64 {
        ratio(self.amount_saved, self.resisted_count)
    }

    /// Mean number of events per active day
    pub fn daily_average(&self) -> f64 {
        ratio(self.total_events as f64, self.timeline.len())
    }

    /// Categories with activity, most money saved first
    ///
    /// Ties keep the fixed category order.
    pub fn top_categories(&self, limit: usize) -> Vec<(Category, CategoryStats)> {
        let mut ranked: Vec<(Category, CategoryStats)> = self
            .categories
            .iter()
            .filter(|(_, stats)| stats.total > 0)
            .map(|(c, stats)| (*c, *stats))
            .collect();
        ranked.sort_by(|a, b| b.1.amount_saved.total_cmp(&a.1.amount_saved));
        ranked.truncate(limit);
        ranked
    }
}
