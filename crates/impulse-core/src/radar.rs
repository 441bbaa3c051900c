//! Radar chart normalization
//!
//! Puts per-category event counts and money amounts on one radial axis. Counts
//! keep their native scale; amounts are rescaled so the largest amount lands on
//! the largest count. The absolute amount scale is lost, so anything needing real
//! money values should read [`CategoryStats`](crate::models::CategoryStats) instead.

use serde::{Deserialize, Serialize};

use crate::models::{AggregateResult, Category};

/// Which money column the amount series is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadarMetric {
    /// Money spent on purchases (the spending radar)
    #[default]
    Spent,
    /// Money kept by resisting
    Saved,
}

impl RadarMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spent => "spent",
            Self::Saved => "saved",
        }
    }
}

impl std::str::FromStr for RadarMetric {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spent" | "spending" => Ok(Self::Spent),
            "saved" | "savings" => Ok(Self::Saved),
            _ => Err(format!("Unknown radar metric: {}", s)),
        }
    }
}

/// Two parallel series in fixed category order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarSeries {
    pub counts: [f64; Category::COUNT],
    pub amounts: [f64; Category::COUNT],
}

/// Largest value, or 0 for an all-zero series
fn series_max(values: &[f64; Category::COUNT]) -> f64 {
    values.iter().copied().fold(0.0, f64::max)
}

/// Rescale `amounts` into the numeric range of `counts`
///
/// Counts come back unchanged. When every count is zero the scaled amounts
/// are all zero too, so neither series ever exceeds the count maximum.
pub fn normalize(
    counts: &[f64; Category::COUNT],
    amounts: &[f64; Category::COUNT],
) -> RadarSeries {
    let max_count = series_max(counts);
    let max_amount = match series_max(amounts) {
        m if m > 0.0 => m,
        _ => 1.0,
    };

    let mut scaled = [0.0; Category::COUNT];
    if max_count > 0.0 {
        for (out, amount) in scaled.iter_mut().zip(amounts) {
            *out = amount / max_amount * max_count;
        }
    }

    RadarSeries {
        counts: *counts,
        amounts: scaled,
    }
}

impl RadarSeries {
    /// Build the radar series from an aggregation result
    pub fn from_result(result: &AggregateResult, metric: RadarMetric) -> Self {
        let mut counts = [0.0; Category::COUNT];
        let mut amounts = [0.0; Category::COUNT];
        for category in Category::ALL {
            let stats = result.category(category);
            counts[category.index()] = stats.total as f64;
            amounts[category.index()] = match metric {
                RadarMetric::Spent => stats.amount_spent,
                RadarMetric::Saved => stats.amount_saved,
            };
        }
        normalize(&counts, &amounts)
    }

    /// Axis labels matching the series positions
    pub fn labels() -> [&'static str; Category::COUNT] {
        Category::ALL.map(|c| c.label())
    }

    /// Suggested radial axis upper bound (10% headroom, 10 when empty)
    pub fn axis_max(&self) -> f64 {
        let max = series_max(&self.counts).max(series_max(&self.amounts));
        if max > 0.0 {
            max * 1.1
        } else {
            10.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::models::PurchaseEvent;

    #[test]
    fn test_all_zero_is_safe() {
        let zeros = [0.0; Category::COUNT];
        let series = normalize(&zeros, &zeros);
        assert_eq!(series.counts, zeros);
        assert_eq!(series.amounts, zeros);
        assert_eq!(series.axis_max(), 10.0);
    }

    #[test]
    fn test_counts_returned_unchanged() {
        let counts = [3.0, 1.0, 0.0, 2.0, 0.0, 0.0, 5.0, 1.0];
        let amounts = [10.0, 0.0, 0.0, 40.0, 0.0, 0.0, 20.0, 0.0];
        assert_eq!(normalize(&counts, &amounts).counts, counts);
    }

    #[test]
    fn test_amounts_scaled_to_count_range() {
        let counts = [4.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let amounts = [100.0, 50.0, 25.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let series = normalize(&counts, &amounts);
        assert_eq!(series.amounts[0], 4.0);
        assert_eq!(series.amounts[1], 2.0);
        assert_eq!(series.amounts[2], 1.0);
        assert_eq!(series.amounts[3], 0.0);
    }

    #[test]
    fn test_scaled_amounts_never_exceed_count_max() {
        let cases: [([f64; 8], [f64; 8]); 4] = [
            (
                [1.0, 7.0, 3.0, 0.0, 2.0, 0.0, 0.0, 9.0],
                [0.5, 900.0, 12.0, 3.0, 0.0, 44.0, 1.0, 8.0],
            ),
            ([0.0; 8], [5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0]),
            ([2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], [0.0; 8]),
            ([1.0; 8], [0.01, 0.02, 0.03, 0.04, 0.05, 0.06, 0.07, 0.08]),
        ];
        for (counts, amounts) in cases {
            let series = normalize(&counts, &amounts);
            let max_count = series_max(&counts);
            for scaled in series.amounts {
                assert!(scaled <= max_count, "{} > {}", scaled, max_count);
            }
        }
    }

    #[test]
    fn test_amounts_without_counts_collapse_to_zero() {
        let series = normalize(&[0.0; 8], &[5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(series.amounts, [0.0; 8]);
    }

    #[test]
    fn test_from_result_uses_metric() {
        let events = vec![
            PurchaseEvent::purchased(1, 80.0, "laptop"),
            PurchaseEvent::purchased(2, 20.0, "pizza"),
            PurchaseEvent::resisted(3, 10.0, "pizza"),
        ];
        let result = aggregate(&events);

        let spent = RadarSeries::from_result(&result, RadarMetric::Spent);
        assert_eq!(spent.counts[Category::Electronics.index()], 1.0);
        assert_eq!(spent.counts[Category::Food.index()], 2.0);
        // max count 2, max spent 80
        assert_eq!(spent.amounts[Category::Electronics.index()], 2.0);
        assert_eq!(spent.amounts[Category::Food.index()], 0.5);

        let saved = RadarSeries::from_result(&result, RadarMetric::Saved);
        assert_eq!(saved.amounts[Category::Food.index()], 2.0);
        assert_eq!(saved.amounts[Category::Electronics.index()], 0.0);
    }

    #[test]
    fn test_labels_follow_category_order() {
        let labels = RadarSeries::labels();
        assert_eq!(labels[0], "Electronics");
        assert_eq!(labels[Category::COUNT - 1], "Other");
    }

    #[test]
    fn test_metric_parse() {
        assert_eq!("saved".parse::<RadarMetric>().unwrap(), RadarMetric::Saved);
        assert_eq!("Spending".parse::<RadarMetric>().unwrap(), RadarMetric::Spent);
        assert!("both".parse::<RadarMetric>().is_err());
    }
}
