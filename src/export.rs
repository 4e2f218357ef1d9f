// 📄 CSV import / export
//
// Layout: id,date,type,amount,category,description
// `id` is written on export and ignored on import (the database assigns ids).

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::info;

use crate::db::{format_timestamp, parse_timestamp, Database};
use crate::entities::TransactionType;
use crate::error::{LedgerError, Result};
use crate::reports::UNKNOWN_CATEGORY;

#[derive(Debug, Serialize, Deserialize)]
struct CsvRecord {
    #[serde(default)]
    id: Option<i64>,
    date: String,
    #[serde(rename = "type")]
    kind: String,
    amount: f64,
    category: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub categories_created: usize,
}

/// Write every transaction (insertion order) as CSV; returns the row count
pub fn export_csv<W: Write>(db: &Database, writer: W) -> Result<usize> {
    let names = db.categories().names_by_id()?;
    let transactions = db.transactions().get_all()?;

    let mut wtr = csv::Writer::from_writer(writer);
    for tx in &transactions {
        wtr.serialize(CsvRecord {
            id: Some(tx.id),
            date: format_timestamp(&tx.date),
            kind: tx.kind.as_str().to_string(),
            amount: tx.amount,
            category: names
                .get(&tx.category_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string()),
            description: tx.description.clone(),
        })?;
    }
    wtr.flush()?;

    Ok(transactions.len())
}

pub fn export_csv_file(db: &Database, path: &Path) -> Result<usize> {
    let file = File::create(path)?;
    let written = export_csv(db, file)?;
    info!(path = %path.display(), rows = written, "exported transactions");
    Ok(written)
}

/// Read transactions from CSV.
///
/// Unknown category names are created on the fly. The whole file is one
/// transaction: the first invalid row rolls back every row and category
/// written before it.
pub fn import_csv<R: Read>(db: &Database, reader: R) -> Result<ImportSummary> {
    // Rolled back on drop unless committed
    let tx = db.connection().unchecked_transaction()?;
    let categories = db.categories();
    let transactions = db.transactions();
    let mut summary = ImportSummary::default();

    let mut rdr = csv::Reader::from_reader(reader);
    for (index, result) in rdr.deserialize::<CsvRecord>().enumerate() {
        // +2: header is line 1
        let line = index + 2;
        let record = result?;

        let kind: TransactionType = record.kind.parse().map_err(|e| at_line(line, e))?;
        let date = parse_timestamp(&record.date).map_err(|e| at_line(line, e))?;

        let category = match categories.find_by_name(record.category.trim())? {
            Some(existing) => existing,
            None => {
                summary.categories_created += 1;
                categories
                    .create(&record.category)
                    .map_err(|e| at_line(line, e))?
            }
        };

        transactions
            .create_dated(
                record.amount,
                kind,
                category.id,
                record.description.as_deref(),
                date,
            )
            .map_err(|e| at_line(line, e))?;
        summary.imported += 1;
    }

    tx.commit()?;
    Ok(summary)
}

pub fn import_csv_file(db: &Database, path: &Path) -> Result<ImportSummary> {
    let file = File::open(path)?;
    let summary = import_csv(db, file)?;
    info!(
        path = %path.display(),
        rows = summary.imported,
        categories = summary.categories_created,
        "imported transactions"
    );
    Ok(summary)
}

fn at_line(line: usize, err: LedgerError) -> LedgerError {
    if err.is_user_error() {
        LedgerError::Validation(format!("line {}: {}", line, err))
    } else {
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_writes_header_and_rows() {
        let db = Database::open_in_memory().unwrap();
        let food = db.categories().create("Food").unwrap();
        db.transactions()
            .create_dated(
                12.5,
                TransactionType::Expense,
                food.id,
                Some("Lunch"),
                parse_timestamp("2024-03-01 12:30:00").unwrap(),
            )
            .unwrap();

        let mut out = Vec::new();
        let rows = export_csv(&db, &mut out).unwrap();
        assert_eq!(rows, 1);

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("id,date,type,amount,category,description"));
        assert_eq!(lines.next(), Some("1,2024-03-01 12:30:00,expense,12.5,Food,Lunch"));
    }

    #[test]
    fn test_import_creates_missing_categories() {
        let db = Database::open_in_memory().unwrap();
        db.categories().create("Food").unwrap();

        let data = "\
id,date,type,amount,category,description
,2024-03-01 08:00:00,income,2500,Salary,March pay
,2024-03-02,expense,45.10,Food,
";
        let summary = import_csv(&db, data.as_bytes()).unwrap();
        assert_eq!(summary.imported, 2);
        assert_eq!(summary.categories_created, 1);

        let all = db.transactions().get_all().unwrap();
        assert_eq!(all[0].description.as_deref(), Some("March pay"));
        assert_eq!(all[1].description, None);
        assert!((db.transactions().get_balance().unwrap() - 2454.9).abs() < 1e-9);
    }

    #[test]
    fn test_bad_line_rolls_back_import() {
        let db = Database::open_in_memory().unwrap();

        let data = "\
id,date,type,amount,category,description
,2024-03-01,expense,10,Food,ok
,2024-03-02,expense,-3,Food,negative
";
        let err = import_csv(&db, data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 3"), "{}", err);

        // Line 2 and the Food category it created are rolled back
        assert_eq!(db.transactions().count().unwrap(), 0);
        assert!(db.categories().get_all().unwrap().is_empty());

        // The database stays usable and a corrected file imports cleanly
        let fixed = data.replace("-3", "3");
        let summary = import_csv(&db, fixed.as_bytes()).unwrap();
        assert_eq!(summary.imported, 2);
        assert_eq!(db.transactions().count().unwrap(), 2);
    }

    #[test]
    fn test_export_then_import_into_fresh_database() {
        let source = Database::open_in_memory().unwrap();
        let rent = source.categories().create("Rent").unwrap();
        source
            .transactions()
            .create(900.0, TransactionType::Expense, rent.id, Some("June"))
            .unwrap();

        let mut buffer = Vec::new();
        export_csv(&source, &mut buffer).unwrap();

        let target = Database::open_in_memory().unwrap();
        let summary = import_csv(&target, buffer.as_slice()).unwrap();
        assert_eq!(summary.imported, 1);
        assert_eq!(
            target.transactions().get_balance().unwrap(),
            source.transactions().get_balance().unwrap()
        );
    }
}
