//! Report command implementations

use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use impulse_core::{
    current_streak, recent_events, AggregateResult, Category, Outcome, PurchaseEvent,
    RadarMetric, RadarSeries, Settings, StreakState,
};
use serde_json::json;

use super::truncate;

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Human-readable streak, e.g. "3 resisted in a row"
pub fn describe_streak(streak: &StreakState) -> String {
    match streak.outcome {
        Some(outcome) if streak.length > 0 => {
            format!("{} {} in a row", streak.length, outcome)
        }
        _ => "no decisions yet".to_string(),
    }
}

/// Summary figures as JSON
pub fn summary_json(result: &AggregateResult) -> serde_json::Value {
    json!({
        "total_events": result.total_events,
        "resisted_count": result.resisted_count,
        "purchased_count": result.purchased_count,
        "amount_saved": result.amount_saved,
        "amount_spent": result.amount_spent,
        "success_rate": result.success_rate(),
        "average_save": result.average_save(),
        "biggest_save": result.biggest_save,
        "daily_average": result.daily_average(),
        "streak": result.streak,
    })
}

pub fn cmd_summary(events: &[PurchaseEvent], settings: &Settings, json: bool) -> Result<()> {
    let result = settings.aggregator().aggregate(events);

    if json {
        return print_json(&summary_json(&result));
    }

    println!();
    println!("🛡️  Impulse Guard Summary");
    println!("   ─────────────────────────────────────────────────────────────");

    if result.total_events == 0 {
        println!("   No decisions recorded in this period.");
        return Ok(());
    }

    println!("   Decisions:      {}", result.total_events);
    println!("   Resisted:       {}", result.resisted_count);
    println!("   Purchased:      {}", result.purchased_count);
    println!("   Success rate:   {:.1}%", result.success_rate());
    println!();
    println!("   💰 Money saved:  ${:.2}", result.amount_saved);
    println!("   💸 Money spent:  ${:.2}", result.amount_spent);
    println!("   📊 Average save: ${:.2}", result.average_save());
    println!("   🏆 Biggest save: ${:.2}", result.biggest_save);
    println!("   📅 Daily average: {:.1}", result.daily_average());
    println!("   🔥 Streak:       {}", describe_streak(&result.streak));

    Ok(())
}

pub fn cmd_categories(events: &[PurchaseEvent], settings: &Settings, json: bool) -> Result<()> {
    let result = settings.aggregator().aggregate(events);
    let top = result.top_categories(settings.top_categories);

    if json {
        let top: Vec<_> = top
            .iter()
            .map(|(category, stats)| json!({ "category": category, "stats": stats }))
            .collect();
        return print_json(&json!({
            "categories": result.categories,
            "top_categories": top,
        }));
    }

    println!();
    println!("🗂️  Category Breakdown");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:14} │ {:>5} │ {:>8} │ {:>9} │ {:>10} │ {:>10}",
        "Category", "Total", "Resisted", "Purchased", "Saved", "Spent"
    );
    println!("   ───────────────┼───────┼──────────┼───────────┼────────────┼───────────");

    for category in Category::ALL {
        let stats = result.category(category);
        println!(
            "   {:14} │ {:>5} │ {:>8} │ {:>9} │ {:>10.2} │ {:>10.2}",
            category.label(),
            stats.total,
            stats.resisted_count,
            stats.purchased_count,
            stats.amount_saved,
            stats.amount_spent
        );
    }

    if !top.is_empty() {
        println!();
        println!("   Top categories by money saved:");
        for (i, (category, stats)) in top.iter().enumerate() {
            println!(
                "   {}. {:14} ${:.2} ({} resisted)",
                i + 1,
                category.label(),
                stats.amount_saved,
                stats.resisted_count
            );
        }
    }

    Ok(())
}

pub fn cmd_timeline(events: &[PurchaseEvent], settings: &Settings, json: bool) -> Result<()> {
    let result = settings.aggregator().aggregate(events);

    if json {
        return print_json(&json!(result.timeline));
    }

    println!();
    println!("📈 Daily Timeline");
    println!("   ─────────────────────────────────────────────────────────────");

    if result.timeline.is_empty() {
        println!("   No decisions recorded in this period.");
        return Ok(());
    }

    println!(
        "   {:12} │ {:>8} │ {:>9} │ {:>10}",
        "Date", "Resisted", "Purchased", "Saved"
    );
    println!("   ─────────────┼──────────┼───────────┼───────────");

    for day in &result.timeline {
        println!(
            "   {:12} │ {:>8} │ {:>9} │ {:>10.2}",
            day.date.format("%Y-%m-%d").to_string(),
            day.resisted_count,
            day.purchased_count,
            day.amount_saved
        );
    }

    println!("   ─────────────┼──────────┼───────────┼───────────");
    println!(
        "   {:12} │ {:>8} │ {:>9} │ {:>10.2}",
        "Total", result.resisted_count, result.purchased_count, result.amount_saved
    );

    Ok(())
}

pub fn cmd_radar(
    events: &[PurchaseEvent],
    settings: &Settings,
    metric: RadarMetric,
    json: bool,
) -> Result<()> {
    let result = settings.aggregator().aggregate(events);
    let series = RadarSeries::from_result(&result, metric);

    if json {
        return print_json(&json!({
            "metric": metric,
            "labels": RadarSeries::labels(),
            "counts": series.counts,
            "amounts": series.amounts,
            "axis_max": series.axis_max(),
        }));
    }

    println!();
    println!("🎯 Frequency vs. {} (shared scale)", metric.as_str());
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   {:14} │ {:>6} │ {:>8}", "Category", "Count", "Amount");
    println!("   ───────────────┼────────┼─────────");

    for (i, label) in RadarSeries::labels().iter().enumerate() {
        println!(
            "   {:14} │ {:>6.1} │ {:>8.2}",
            label, series.counts[i], series.amounts[i]
        );
    }
    println!("   Axis max: {:.2}", series.axis_max());

    Ok(())
}

pub fn cmd_streak(events: &[PurchaseEvent]) -> Result<()> {
    let streak = current_streak(events);
    let icon = match streak.outcome {
        Some(Outcome::Resisted) => "🔥",
        Some(Outcome::Purchased) => "🛒",
        None => "⏳",
    };
    println!("{} Current streak: {}", icon, describe_streak(&streak));
    Ok(())
}

/// Format a millisecond timestamp at the given offset
///
/// Falls back to the raw number when chrono cannot represent it.
pub fn format_timestamp(timestamp: i64, offset: &FixedOffset) -> String {
    DateTime::from_timestamp_millis(timestamp)
        .map(|dt| {
            dt.with_timezone(offset)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| timestamp.to_string())
}

pub fn cmd_recent(events: &[PurchaseEvent], settings: &Settings, limit: usize) -> Result<()> {
    let recent = recent_events(events, limit);
    let offset = settings.utc_offset();

    println!();
    println!("🕒 Recent Decisions");
    println!("   ─────────────────────────────────────────────────────────────");

    if recent.is_empty() {
        println!("   No decisions recorded in this period.");
        return Ok(());
    }

    println!(
        "   {:19} │ {:9} │ {:>9} │ {:13} │ {}",
        format!("When ({})", offset),
        "Outcome",
        "Amount",
        "Category",
        "Item"
    );
    println!("   ────────────────────┼───────────┼───────────┼───────────────┼──────────────");

    for entry in &recent {
        println!(
            "   {:19} │ {:9} │ {:>9.2} │ {:13} │ {}",
            format_timestamp(entry.event.timestamp, &offset),
            entry.event.outcome.as_str(),
            entry.event.amount,
            entry.category.label(),
            truncate(&entry.event.description, 30)
        );
    }

    Ok(())
}
