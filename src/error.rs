// ⚠️ Ledger Errors
// Every failure the stores can report is recoverable: the caller decides
// how to present it (menu message or exit code).

use thiserror::Error;

/// Errors surfaced by the ledger stores, reports and import/export
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Input rejected before touching the database (empty name, bad amount)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced row does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// UNIQUE constraint violation
    #[error("{entity} already exists: {name}")]
    Duplicate { entity: &'static str, name: String },

    /// Category still referenced by transactions
    #[error("Category {id} is used by {transactions} transaction(s); delete or move them first")]
    CategoryInUse { id: i64, transactions: i64 },

    /// Text that could not be parsed (transaction type, date, window...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LedgerError {
    /// True for errors caused by user input rather than the storage engine
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            LedgerError::Validation(_)
                | LedgerError::NotFound { .. }
                | LedgerError::Duplicate { .. }
                | LedgerError::CategoryInUse { .. }
                | LedgerError::InvalidInput(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LedgerError::NotFound { entity: "Category", id: 7 };
        assert_eq!(err.to_string(), "Category not found: 7");

        let err = LedgerError::Duplicate {
            entity: "Category",
            name: "Food".to_string(),
        };
        assert_eq!(err.to_string(), "Category already exists: Food");
        assert!(err.is_user_error());
    }

    #[test]
    fn test_database_errors_are_not_user_errors() {
        let err = LedgerError::from(rusqlite::Error::InvalidQuery);
        assert!(!err.is_user_error());
    }
}
