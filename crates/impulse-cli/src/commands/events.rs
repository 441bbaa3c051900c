//! Event command implementations

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use impulse_core::classify::matched_keyword;
use impulse_core::export::export_events;
use impulse_core::{
    classify, Database, EventSource, ExportFormat, JsonDocument, Outcome, PurchaseEvent,
};
use tracing::info;

pub fn cmd_classify(description: &str) -> Result<()> {
    let category = classify(description);
    match matched_keyword(description) {
        Some((_, keyword)) => println!("🏷️  {} (matched \"{}\")", category, keyword),
        None => println!("🏷️  {} (no keyword matched)", category),
    }
    Ok(())
}

pub fn cmd_log(
    db: &Database,
    description: &str,
    amount: f64,
    outcome: Outcome,
    timestamp: i64,
) -> Result<()> {
    let event = PurchaseEvent::new(timestamp, outcome, amount, description);
    event.validate()?;

    match db.insert_event(&event).context("Failed to record decision")? {
        Some(id) => {
            let icon = match outcome {
                Outcome::Resisted => "💪",
                Outcome::Purchased => "🛒",
            };
            println!(
                "{} Recorded #{}: {} ${:.2} on {} ({})",
                icon,
                id,
                outcome,
                amount,
                if description.is_empty() { "-" } else { description },
                classify(description)
            );
        }
        None => println!(
            "⚠️  A decision with timestamp {} already exists, nothing recorded",
            timestamp
        ),
    }
    Ok(())
}

pub fn cmd_import(db: &Database, file: &Path) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File not found: {}", file.display());
    }

    let events = JsonDocument::new(file)
        .load_events()
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let stats = db.import_events(&events).context("Import failed")?;

    info!(
        file = %file.display(),
        inserted = stats.inserted,
        duplicates = stats.duplicates,
        "Import finished"
    );
    println!("📥 Imported {} events from {}", stats.inserted, file.display());
    if stats.duplicates > 0 {
        println!("   Skipped {} duplicates", stats.duplicates);
    }
    Ok(())
}

pub fn cmd_export(events: &[PurchaseEvent], output: &Path, format: ExportFormat) -> Result<()> {
    let file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    let written = export_events(BufWriter::new(file), events, format)?;

    println!(
        "📤 Exported {} events to {} ({})",
        written,
        output.display(),
        format.as_str()
    );
    Ok(())
}
