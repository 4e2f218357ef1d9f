// 💸 Transaction Entity - a single income or expense record
//
// Amounts are always stored positive; the type carries the sign.

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::db::{self, format_timestamp, DAY_FORMAT};
use crate::entities::CategoryStore;
use crate::error::{LedgerError, Result};

// ============================================================================
// TRANSACTION TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in
    Income,

    /// Money going out
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// Display form used by the menu ("Income", "Expense")
    pub fn title(&self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }

    /// +1 for income, -1 for expense
    pub fn sign(&self) -> f64 {
        match self {
            TransactionType::Income => 1.0,
            TransactionType::Expense => -1.0,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(LedgerError::InvalidInput(format!(
                "unknown transaction type '{}' (expected income or expense)",
                other
            ))),
        }
    }
}

// ============================================================================
// TRANSACTION ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,

    /// Always > 0
    pub amount: f64,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    pub description: Option<String>,

    /// Local time, second precision
    pub date: NaiveDateTime,

    /// Checked on insert; may dangle afterwards
    pub category_id: i64,
}

impl Transaction {
    /// Amount with the type's sign applied (income +, expense -)
    pub fn signed_amount(&self) -> f64 {
        self.kind.sign() * self.amount
    }

    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let kind_text: String = row.get(2)?;
        let kind = kind_text
            .parse::<TransactionType>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;

        let date_text: String = row.get(4)?;
        let date = db::parse_timestamp(&date_text)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

        Ok(Transaction {
            id: row.get(0)?,
            amount: row.get(1)?,
            kind,
            description: row.get(3)?,
            date,
            category_id: row.get(5)?,
        })
    }
}

const SELECT_COLUMNS: &str = "SELECT id, amount, type, description, date, category_id FROM transactions";

// ============================================================================
// TRANSACTION STORE
// ============================================================================

/// Data access for the `transactions` table
pub struct TransactionStore<'a> {
    conn: &'a Connection,
}

impl<'a> TransactionStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        TransactionStore { conn }
    }

    /// Record a transaction dated now
    pub fn create(
        &self,
        amount: f64,
        kind: TransactionType,
        category_id: i64,
        description: Option<&str>,
    ) -> Result<Transaction> {
        self.create_dated(amount, kind, category_id, description, db::now())
    }

    /// Record a transaction with an explicit timestamp.
    ///
    /// Rejects non-positive or non-finite amounts and category ids that do
    /// not exist. Blank descriptions are stored as NULL.
    pub fn create_dated(
        &self,
        amount: f64,
        kind: TransactionType,
        category_id: i64,
        description: Option<&str>,
        date: NaiveDateTime,
    ) -> Result<Transaction> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(LedgerError::Validation(format!(
                "amount must be a positive number, got {}",
                amount
            )));
        }

        if CategoryStore::new(self.conn).find_by_id(category_id)?.is_none() {
            return Err(LedgerError::NotFound {
                entity: "Category",
                id: category_id,
            });
        }

        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        self.conn.execute(
            "INSERT INTO transactions (amount, type, description, date, category_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                amount,
                kind.as_str(),
                description,
                format_timestamp(&date),
                category_id,
            ],
        )?;

        let tx = Transaction {
            id: self.conn.last_insert_rowid(),
            amount,
            kind,
            description,
            date,
            category_id,
        };
        debug!(id = tx.id, amount, kind = %kind, category_id, "created transaction");

        Ok(tx)
    }

    /// All transactions in insertion order
    pub fn get_all(&self) -> Result<Vec<Transaction>> {
        self.query(&format!("{} ORDER BY id", SELECT_COLUMNS), params![])
    }

    pub fn find_by_id(&self, id: i64) -> Result<Option<Transaction>> {
        let tx = self
            .conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![id],
                Transaction::from_row,
            )
            .optional()?;

        Ok(tx)
    }

    pub fn find_by_category(&self, category_id: i64) -> Result<Vec<Transaction>> {
        self.query(
            &format!("{} WHERE category_id = ?1 ORDER BY id", SELECT_COLUMNS),
            params![category_id],
        )
    }

    /// Transactions whose stored timestamp starts with the given calendar day
    pub fn find_by_date(&self, day: NaiveDate) -> Result<Vec<Transaction>> {
        let prefix = day.format(DAY_FORMAT).to_string();

        // substr instead of LIKE: no wildcard escaping to worry about
        self.query(
            &format!(
                "{} WHERE substr(date, 1, length(?1)) = ?1 ORDER BY id",
                SELECT_COLUMNS
            ),
            params![prefix],
        )
    }

    /// Σ income − Σ expense over every stored transaction (0 when empty)
    pub fn get_balance(&self) -> Result<f64> {
        let balance: f64 = self.conn.query_row(
            "SELECT
                COALESCE(SUM(CASE WHEN type = 'income' THEN amount ELSE 0 END), 0.0)
              - COALESCE(SUM(CASE WHEN type = 'expense' THEN amount ELSE 0 END), 0.0)
             FROM transactions",
            [],
            |row| row.get(0),
        )?;

        Ok(balance)
    }

    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;

        Ok(count)
    }

    pub fn delete(&self, id: i64) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM transactions WHERE id = ?1", params![id])?;
        debug!(id, removed, "delete transaction");

        Ok(removed > 0)
    }

    fn query(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(sql)?;

        let transactions = stmt
            .query_map(params, Transaction::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }
}
