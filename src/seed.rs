// 🧪 Sample data for demos and manual testing
//
// Deterministic: the same `count` and `now` always produce the same rows,
// so a seeded database can be compared across runs.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use tracing::info;

use crate::db::Database;
use crate::entities::TransactionType;
use crate::error::Result;

pub const SAMPLE_CATEGORIES: [&str; 7] = [
    "Food",
    "Rent",
    "Transport",
    "Entertainment",
    "Utilities",
    "Salary",
    "Freelance",
];

/// Categories whose sample transactions are income
const INCOME_CATEGORIES: [&str; 2] = ["Salary", "Freelance"];

const SAMPLE_DESCRIPTIONS: [&str; 10] = [
    "Weekly groceries run",
    "Monthly apartment rent",
    "Bus pass top up",
    "Cinema night with friends",
    "Electricity and water bill",
    "Paycheck from employer",
    "Website project invoice",
    "Coffee and pastries downtown",
    "Train tickets for the weekend",
    "Concert tickets purchase",
];

pub const DEFAULT_SEED_COUNT: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeedSummary {
    pub categories_created: usize,
    pub transactions_created: usize,
    pub balance: f64,
}

/// Insert `count` sample transactions dated within the 30 days before `now`
pub fn seed_data(db: &Database, count: usize, now: NaiveDateTime) -> Result<SeedSummary> {
    let categories = db.categories();
    let transactions = db.transactions();

    // Reuse categories that already exist by name
    let mut sample_ids = Vec::with_capacity(SAMPLE_CATEGORIES.len());
    let mut categories_created = 0;
    for name in SAMPLE_CATEGORIES {
        let category = match categories.find_by_name(name)? {
            Some(existing) => existing,
            None => {
                categories_created += 1;
                categories.create(name)?
            }
        };
        sample_ids.push((category.id, name));
    }

    for i in 0..count {
        let (category_id, name) = sample_ids[i % sample_ids.len()];
        let kind = if INCOME_CATEGORIES.contains(&name) {
            TransactionType::Income
        } else {
            TransactionType::Expense
        };

        // Spread amounts over 10.00..1000.00 in whole cents
        let cents = 1_000 + (i as i64 * 7_919) % 99_000;
        let amount = cents as f64 / 100.0;

        let date = now
            - Duration::days((i as i64 * 3) % 30)
            - Duration::hours((i as i64 * 5) % 12);

        let description = SAMPLE_DESCRIPTIONS[i % SAMPLE_DESCRIPTIONS.len()];
        transactions.create_dated(amount, kind, category_id, Some(description), date)?;
    }

    let summary = SeedSummary {
        categories_created,
        transactions_created: count,
        balance: transactions.get_balance()?,
    };
    info!(
        categories = summary.categories_created,
        transactions = summary.transactions_created,
        "seeded sample data"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::parse_timestamp;
    use crate::reports::{build_report, ReportWindow};

    #[test]
    fn test_seed_creates_rows_in_range() {
        let db = Database::open_in_memory().unwrap();
        let now = parse_timestamp("2024-06-30 12:00:00").unwrap();

        let summary = seed_data(&db, DEFAULT_SEED_COUNT, now).unwrap();
        assert_eq!(summary.categories_created, SAMPLE_CATEGORIES.len());
        assert_eq!(summary.transactions_created, DEFAULT_SEED_COUNT);

        let all = db.transactions().get_all().unwrap();
        assert_eq!(all.len(), DEFAULT_SEED_COUNT);
        for tx in &all {
            assert!(tx.amount >= 10.0 && tx.amount < 1000.0, "amount {}", tx.amount);
            assert!(tx.date <= now && tx.date > now - Duration::days(31));
        }

        // Every seeded row falls inside the monthly window
        let names = db.categories().names_by_id().unwrap();
        let outcome = build_report(&all, &names, ReportWindow::Monthly, now).unwrap();
        assert_eq!(outcome.report().unwrap().transaction_count, DEFAULT_SEED_COUNT);
    }

    #[test]
    fn test_seed_reuses_existing_categories() {
        let db = Database::open_in_memory().unwrap();
        db.categories().create("Food").unwrap();
        let now = parse_timestamp("2024-06-30 12:00:00").unwrap();

        let summary = seed_data(&db, 3, now).unwrap();
        assert_eq!(summary.categories_created, SAMPLE_CATEGORIES.len() - 1);

        let again = seed_data(&db, 3, now).unwrap();
        assert_eq!(again.categories_created, 0);
        assert_eq!(db.transactions().count().unwrap(), 6);
        assert!((again.balance - db.transactions().get_balance().unwrap()).abs() < 1e-9);
    }
}
