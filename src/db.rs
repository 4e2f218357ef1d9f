use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use rusqlite::Connection;
use std::path::Path;
use tracing::debug;

use crate::entities::{CategoryStore, TransactionStore};
use crate::error::{LedgerError, Result};

/// Storage format of `transactions.date` (local time, second precision)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Calendar-day prefix of a stored timestamp
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// The ledger's backing store.
///
/// Owns the single SQLite connection. Construct it once at startup and hand
/// `&Database` to whoever needs the category or transaction stores.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) a database file and make sure the schema exists
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL for crash recovery; the pragma echoes the mode it settled on
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        debug!(path = %path.display(), journal_mode = %mode, "opened database");

        setup_database(&conn)?;
        Ok(Self { conn })
    }

    /// Private in-memory database (tests, dry runs)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        setup_database(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn categories(&self) -> CategoryStore<'_> {
        CategoryStore::new(&self.conn)
    }

    pub fn transactions(&self) -> TransactionStore<'_> {
        TransactionStore::new(&self.conn)
    }
}

pub fn setup_database(conn: &Connection) -> Result<()> {
    // ==========================================================================
    // Categories Table
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )",
        [],
    )?;

    // ==========================================================================
    // Transactions Table
    // category_id is checked on insert only; SQLite does not enforce the
    // REFERENCES clause unless foreign_keys is switched on (it is not).
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            amount REAL NOT NULL,
            type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
            description TEXT,
            date TEXT NOT NULL,
            category_id INTEGER NOT NULL REFERENCES categories(id)
        )",
        [],
    )?;

    // ==========================================================================
    // Indexes
    // ==========================================================================
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_transactions_category ON transactions(category_id)",
        [],
    )?;

    Ok(())
}

/// Current local time truncated to whole seconds (the storage precision)
pub fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored or user-supplied timestamp.
///
/// Accepts `YYYY-MM-DD HH:MM:SS` (optionally with fractional seconds),
/// the `T`-separated ISO form, and a bare `YYYY-MM-DD` (midnight).
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime> {
    let text = text.trim();

    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(ts);
        }
    }

    parse_day(text)
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .ok_or_else(|| LedgerError::InvalidInput(format!("not a timestamp: '{}'", text)))
}

/// Parse a `YYYY-MM-DD` calendar day
pub fn parse_day(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DAY_FORMAT)
        .map_err(|_| LedgerError::InvalidInput(format!("expected YYYY-MM-DD, got '{}'", text.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        setup_database(db.connection()).unwrap();

        let tables: i64 = db
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
                 AND name IN ('categories', 'transactions')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 2);
    }

    #[test]
    fn test_type_check_constraint() {
        let db = Database::open_in_memory().unwrap();
        let result = db.connection().execute(
            "INSERT INTO transactions (amount, type, date, category_id)
             VALUES (1.0, 'transfer', '2024-01-01 00:00:00', 1)",
            [],
        );
        assert!(result.is_err(), "unknown transaction type must be rejected");
    }

    #[test]
    fn test_timestamp_round_trip_formats() {
        let ts = parse_timestamp("2024-03-05 14:30:00").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-03-05 14:30:00");

        let fractional = parse_timestamp("2024-03-05 14:30:00.123456").unwrap();
        assert_eq!(fractional.date(), ts.date());

        let iso = parse_timestamp("2024-03-05T14:30:00").unwrap();
        assert_eq!(iso, ts);

        let day_only = parse_timestamp("2024-03-05").unwrap();
        assert_eq!(format_timestamp(&day_only), "2024-03-05 00:00:00");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
        assert!(parse_day("2024/03/05").is_err());
    }

    #[test]
    fn test_now_has_whole_seconds() {
        assert_eq!(now().nanosecond(), 0);
    }
}
