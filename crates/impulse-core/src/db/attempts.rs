//! Purchase attempt operations

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use super::Database;
use crate::classify::classify;
use crate::error::{Error, Result};
use crate::models::{ImportStats, Outcome, PurchaseEvent};
use crate::source::EventSource;

/// Value of the `outcome` column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptStatus {
    /// The user walked away
    Blocked,
    /// The user went through with the purchase
    Allowed,
    /// Prompt shown, no decision recorded yet
    Pending,
}

impl AttemptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blocked => "blocked",
            Self::Allowed => "allowed",
            Self::Pending => "pending",
        }
    }

    /// Engine outcome, `None` for undecided attempts
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Self::Blocked => Some(Outcome::Resisted),
            Self::Allowed => Some(Outcome::Purchased),
            Self::Pending => None,
        }
    }
}

impl From<Outcome> for AttemptStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Resisted => Self::Blocked,
            Outcome::Purchased => Self::Allowed,
        }
    }
}

impl std::str::FromStr for AttemptStatus {
    type Err = String;

    /// Also accepts the extension's "defeat"/"victory" labels, which older
    /// syncs wrote straight into this column. "defeat" means the purchase was
    /// abandoned.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "blocked" | "resisted" | "defeat" => Ok(Self::Blocked),
            "allowed" | "purchased" | "victory" => Ok(Self::Allowed),
            "pending" => Ok(Self::Pending),
            _ => Err(format!("Unknown attempt outcome: {}", s)),
        }
    }
}

/// A purchase attempt to record
#[derive(Debug, Clone)]
pub struct NewAttempt {
    pub timestamp: i64,
    pub price: f64,
    pub description: String,
    pub status: AttemptStatus,
    pub url: Option<String>,
    pub domain: Option<String>,
    pub session_id: Option<String>,
    /// Milliseconds the user took to decide
    pub decision_time: Option<i64>,
}

impl From<&PurchaseEvent> for NewAttempt {
    fn from(event: &PurchaseEvent) -> Self {
        Self {
            timestamp: event.timestamp,
            price: event.amount,
            description: event.description.clone(),
            status: event.outcome.into(),
            url: None,
            domain: None,
            session_id: None,
            decision_time: None,
        }
    }
}

/// Reject attempts whose fields the event model cannot hold
fn check_attempt(attempt: &NewAttempt) -> Result<()> {
    if attempt.timestamp < 0 {
        return Err(Error::InvalidEvent(format!(
            "negative timestamp {}",
            attempt.timestamp
        )));
    }
    if !attempt.price.is_finite() || attempt.price < 0.0 {
        return Err(Error::InvalidEvent(format!(
            "price must be a non-negative number, got {}",
            attempt.price
        )));
    }
    Ok(())
}

/// Insert on an open connection or transaction, skipping duplicate timestamps
fn insert_attempt_on(conn: &Connection, attempt: &NewAttempt) -> Result<Option<i64>> {
    // Check for duplicate
    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM purchase_attempts WHERE timestamp = ?",
            params![attempt.timestamp],
            |row| row.get(0),
        )
        .optional()?;

    if existing.is_some() {
        debug!(timestamp = attempt.timestamp, "Skipping duplicate attempt");
        return Ok(None);
    }

    conn.execute(
        r#"
        INSERT INTO purchase_attempts (timestamp, category, price, item_description, outcome, url, domain, session_id, decision_time)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
        params![
            attempt.timestamp,
            classify(&attempt.description).as_str(),
            attempt.price,
            attempt.description,
            attempt.status.as_str(),
            attempt.url,
            attempt.domain,
            attempt.session_id,
            attempt.decision_time,
        ],
    )?;

    Ok(Some(conn.last_insert_rowid()))
}

impl Database {
    /// Insert an attempt (skips duplicates based on timestamp)
    ///
    /// Returns the new row id, or `None` when an attempt with the same
    /// timestamp already exists.
    pub fn insert_attempt(&self, attempt: &NewAttempt) -> Result<Option<i64>> {
        check_attempt(attempt)?;
        let conn = self.conn()?;
        insert_attempt_on(&conn, attempt)
    }

    /// Insert a decided event (skips duplicates based on timestamp)
    pub fn insert_event(&self, event: &PurchaseEvent) -> Result<Option<i64>> {
        event.validate()?;
        self.insert_attempt(&NewAttempt::from(event))
    }

    /// Insert a batch of events, counting duplicates instead of failing on them
    ///
    /// All or nothing: one invalid event rejects the whole batch before any
    /// row is written.
    pub fn import_events(&self, events: &[PurchaseEvent]) -> Result<ImportStats> {
        for (i, event) in events.iter().enumerate() {
            if let Some(reason) = event.invalid_reason() {
                return Err(Error::InvalidEvent(format!("record {}: {}", i, reason)));
            }
        }

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let mut stats = ImportStats::default();
        for event in events {
            match insert_attempt_on(&tx, &NewAttempt::from(event))? {
                Some(_) => stats.inserted += 1,
                None => stats.duplicates += 1,
            }
        }

        tx.commit()?;

        info!(
            inserted = stats.inserted,
            duplicates = stats.duplicates,
            "Imported purchase events"
        );
        Ok(stats)
    }

    /// Record the decision for an attempt
    pub fn update_outcome(
        &self,
        id: i64,
        outcome: Outcome,
        decision_time: Option<i64>,
    ) -> Result<()> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE purchase_attempts SET outcome = ?, decision_time = ? WHERE id = ?",
            params![AttemptStatus::from(outcome).as_str(), decision_time, id],
        )?;

        if updated == 0 {
            return Err(Error::NotFound(format!("purchase attempt {}", id)));
        }
        Ok(())
    }

    /// Decided attempts as engine events, most recent first
    ///
    /// `since` limits the result to attempts at or after that millisecond
    /// timestamp. Pending attempts are skipped.
    pub fn list_events(&self, since: Option<i64>) -> Result<Vec<PurchaseEvent>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, timestamp, price, COALESCE(item_description, ''), outcome
            FROM purchase_attempts
            WHERE timestamp >= ?
            ORDER BY timestamp DESC, id DESC
            "#,
        )?;

        let rows = stmt
            .query_map(params![since.unwrap_or(i64::MIN)], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut events = Vec::with_capacity(rows.len());
        for (id, timestamp, price, description, outcome) in rows {
            let status: AttemptStatus = outcome
                .parse()
                .map_err(|e: String| Error::InvalidEvent(format!("attempt {}: {}", id, e)))?;
            let Some(outcome) = status.outcome() else {
                debug!(id, "Skipping pending attempt");
                continue;
            };
            let event = PurchaseEvent::new(timestamp, outcome, price, &description);
            if let Some(reason) = event.invalid_reason() {
                return Err(Error::InvalidEvent(format!("attempt {}: {}", id, reason)));
            }
            events.push(event);
        }

        Ok(events)
    }

    /// Number of stored attempts, pending included
    pub fn count_attempts(&self) -> Result<i64> {
        let conn = self.conn()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM purchase_attempts", [], |row| {
            row.get(0)
        })?)
    }

    /// Mean decision time in seconds over attempts that recorded one
    pub fn average_decision_time(&self) -> Result<f64> {
        let conn = self.conn()?;
        let avg_ms: Option<f64> = conn.query_row(
            "SELECT AVG(decision_time) FROM purchase_attempts WHERE decision_time IS NOT NULL",
            [],
            |row| row.get(0),
        )?;
        Ok(avg_ms.map(|ms| ms / 1000.0).unwrap_or(0.0))
    }
}

impl EventSource for Database {
    fn load_events(&self) -> Result<Vec<PurchaseEvent>> {
        self.list_events(None)
    }
}
