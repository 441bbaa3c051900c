//! Database access layer with connection pooling and migrations
//!
//! Stores purchase attempts in a single `purchase_attempts` table. Rows are
//! converted to [`PurchaseEvent`](crate::models::PurchaseEvent) on the way out;
//! the outcome column keeps its own vocabulary (see `attempts`).

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::debug;

use crate::error::Result;

mod attempts;

pub use attempts::{AttemptStatus, NewAttempt};

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
}

impl Database {
    /// Open (or create) the database at `path` and run migrations
    pub fn new(path: &str) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().max_size(4).build(manager)?;

        let db = Self {
            pool,
            db_path: path.to_string(),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create a throwaway database (for testing)
    ///
    /// Note: Uses a temporary file rather than `:memory:` because each pooled
    /// connection to `:memory:` would see its own empty database.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "impulse_test_{}_{}.db",
            std::process::id(),
            id
        ));

        // Remove any existing file
        let _ = std::fs::remove_file(&path);

        Self::new(&path.to_string_lossy())
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- WAL mode: readers don't block writers
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;

            -- One row per purchase prompt shown to the user
            -- outcome: 'blocked' (resisted), 'allowed' (purchased), 'pending' (undecided)
            CREATE TABLE IF NOT EXISTS purchase_attempts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp INTEGER NOT NULL,
                category TEXT NOT NULL,
                price REAL NOT NULL,
                item_description TEXT,
                outcome TEXT NOT NULL DEFAULT 'pending',
                url TEXT,
                domain TEXT,
                session_id TEXT,
                decision_time INTEGER
            );

            CREATE INDEX IF NOT EXISTS idx_purchase_attempts_timestamp
                ON purchase_attempts(timestamp);
            "#,
        )?;

        debug!(path = %self.db_path, "Database ready");
        Ok(())
    }
}
