// 🏷️ Category Entity - named grouping for transactions
//
// Identity is the system-assigned integer id; the name is unique
// (case-sensitive, enforced by the table's UNIQUE constraint).

use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::error::{LedgerError, Result};

// ============================================================================
// CATEGORY ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

impl Category {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Category {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }
}

// ============================================================================
// CATEGORY STORE
// ============================================================================

/// Data access for the `categories` table
pub struct CategoryStore<'a> {
    conn: &'a Connection,
}

impl<'a> CategoryStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        CategoryStore { conn }
    }

    /// Create a category.
    ///
    /// The name is trimmed first. Fails with `Validation` when it is empty and
    /// with `Duplicate` when another category already has it.
    pub fn create(&self, name: &str) -> Result<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::Validation(
                "category name cannot be empty".to_string(),
            ));
        }

        let result = self
            .conn
            .execute("INSERT INTO categories (name) VALUES (?1)", params![name]);

        match result {
            Ok(_) => {
                let category = Category {
                    id: self.conn.last_insert_rowid(),
                    name: name.to_string(),
                };
                debug!(id = category.id, name = %category.name, "created category");
                Ok(category)
            }
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(LedgerError::Duplicate {
                    entity: "Category",
                    name: name.to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// All categories in creation order
    pub fn get_all(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM categories ORDER BY id")?;

        let categories = stmt
            .query_map([], Category::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    pub fn find_by_id(&self, id: i64) -> Result<Option<Category>> {
        let category = self
            .conn
            .query_row(
                "SELECT id, name FROM categories WHERE id = ?1",
                params![id],
                Category::from_row,
            )
            .optional()?;

        Ok(category)
    }

    /// Exact, case-sensitive lookup
    pub fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        let category = self
            .conn
            .query_row(
                "SELECT id, name FROM categories WHERE name = ?1",
                params![name],
                Category::from_row,
            )
            .optional()?;

        Ok(category)
    }

    /// id → name lookup table for rendering transactions and reports
    pub fn names_by_id(&self) -> Result<HashMap<i64, String>> {
        Ok(self
            .get_all()?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect())
    }

    /// Delete a category.
    ///
    /// Returns `Ok(false)` when no such row exists. A category that still has
    /// transactions is never deleted: the call fails with `CategoryInUse`
    /// instead of leaving dangling references behind.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let in_use: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM transactions WHERE category_id = ?1",
            params![id],
            |row| row.get(0),
        )?;

        if in_use > 0 {
            warn!(id, transactions = in_use, "refusing to delete category in use");
            return Err(LedgerError::CategoryInUse {
                id,
                transactions: in_use,
            });
        }

        let removed = self
            .conn
            .execute("DELETE FROM categories WHERE id = ?1", params![id])?;
        debug!(id, removed, "delete category");

        Ok(removed > 0)
    }
}
