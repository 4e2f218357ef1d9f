// 📊 Reports - trailing-window income/expense summaries
//
// Reads every transaction, keeps the ones dated inside [now - window, now]
// and folds them into totals plus a per-category breakdown.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::db::Database;
use crate::entities::{Transaction, TransactionType};
use crate::error::{LedgerError, Result};

/// Label for transactions whose category no longer exists
pub const UNKNOWN_CATEGORY: &str = "Unknown";

// ============================================================================
// REPORT WINDOW
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportWindow {
    /// Last 7 days
    Weekly,

    /// Last 30 days
    Monthly,

    /// Last N days (N > 0)
    Days(u32),
}

impl ReportWindow {
    pub fn days(&self) -> i64 {
        match self {
            ReportWindow::Weekly => 7,
            ReportWindow::Monthly => 30,
            ReportWindow::Days(n) => i64::from(*n),
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::days(self.days())
    }

    pub fn title(&self) -> String {
        match self {
            ReportWindow::Weekly => "Weekly Report".to_string(),
            ReportWindow::Monthly => "Monthly Report".to_string(),
            ReportWindow::Days(n) => format!("{}-Day Report", n),
        }
    }
}

impl fmt::Display for ReportWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportWindow::Weekly => f.write_str("weekly"),
            ReportWindow::Monthly => f.write_str("monthly"),
            ReportWindow::Days(n) => write!(f, "{}", n),
        }
    }
}

impl FromStr for ReportWindow {
    type Err = LedgerError;

    /// `weekly`, `monthly`, or a positive number of days
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "weekly" | "week" => return Ok(ReportWindow::Weekly),
            "monthly" | "month" => return Ok(ReportWindow::Monthly),
            _ => {}
        }

        match s.parse::<u32>() {
            Ok(7) => Ok(ReportWindow::Weekly),
            Ok(30) => Ok(ReportWindow::Monthly),
            Ok(n) if n > 0 => Ok(ReportWindow::Days(n)),
            _ => Err(LedgerError::InvalidInput(format!(
                "report window must be weekly, monthly or a positive number of days, got '{}'",
                s
            ))),
        }
    }
}

// ============================================================================
// REPORT
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryTotals {
    pub category: String,
    pub income: f64,
    pub expense: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub window: ReportWindow,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub transaction_count: usize,
    pub total_income: f64,
    pub total_expense: f64,
    pub net: f64,
    /// In order of first appearance among the matching transactions
    pub by_category: Vec<CategoryTotals>,
}

impl Report {
    pub fn category(&self, name: &str) -> Option<&CategoryTotals> {
        self.by_category.iter().find(|c| c.category == name)
    }
}

/// A window with no matching transactions is its own outcome, never a
/// report full of zeros.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportOutcome {
    NoTransactions {
        window: ReportWindow,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    Summary(Report),
}

impl ReportOutcome {
    pub fn report(&self) -> Option<&Report> {
        match self {
            ReportOutcome::Summary(report) => Some(report),
            ReportOutcome::NoTransactions { .. } => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ReportOutcome::NoTransactions { .. })
    }

    pub fn bounds(&self) -> (NaiveDateTime, NaiveDateTime) {
        match self {
            ReportOutcome::NoTransactions { start, end, .. } => (*start, *end),
            ReportOutcome::Summary(report) => (report.start, report.end),
        }
    }
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// Fold transactions into a report for `window` ending at `now`.
///
/// Bounds are inclusive on both ends; transactions dated after `now` are
/// left out. A window reaching past the calendar's lower limit is rejected
/// as invalid input. Category ids missing from `category_names` are grouped under
/// [`UNKNOWN_CATEGORY`].
pub fn build_report(
    transactions: &[Transaction],
    category_names: &HashMap<i64, String>,
    window: ReportWindow,
    now: NaiveDateTime,
) -> Result<ReportOutcome> {
    let start = now.checked_sub_signed(window.duration()).ok_or_else(|| {
        LedgerError::InvalidInput(format!(
            "report window of {} days reaches before the earliest supported date",
            window.days()
        ))
    })?;

    let in_window: Vec<&Transaction> = transactions
        .iter()
        .filter(|tx| tx.date >= start && tx.date <= now)
        .collect();

    if in_window.is_empty() {
        return Ok(ReportOutcome::NoTransactions {
            window,
            start,
            end: now,
        });
    }

    let mut total_income = 0.0;
    let mut total_expense = 0.0;
    let mut by_category: Vec<CategoryTotals> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for tx in &in_window {
        let name = category_names
            .get(&tx.category_id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_CATEGORY);

        let slot = *slots.entry(name).or_insert_with(|| {
            by_category.push(CategoryTotals {
                category: name.to_string(),
                ..Default::default()
            });
            by_category.len() - 1
        });

        match tx.kind {
            TransactionType::Income => {
                total_income += tx.amount;
                by_category[slot].income += tx.amount;
            }
            TransactionType::Expense => {
                total_expense += tx.amount;
                by_category[slot].expense += tx.amount;
            }
        }
    }

    Ok(ReportOutcome::Summary(Report {
        window,
        start,
        end: now,
        transaction_count: in_window.len(),
        total_income,
        total_expense,
        net: total_income - total_expense,
        by_category,
    }))
}

/// Load everything from the stores and build the report
pub fn generate_report(
    db: &Database,
    window: ReportWindow,
    now: NaiveDateTime,
) -> Result<ReportOutcome> {
    let transactions = db.transactions().get_all()?;
    let names = db.categories().names_by_id()?;

    let outcome = build_report(&transactions, &names, window, now)?;
    debug!(
        window = %window,
        scanned = transactions.len(),
        matched = outcome.report().map(|r| r.transaction_count).unwrap_or(0),
        "generated report"
    );

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::parse_timestamp;

    fn ts(text: &str) -> NaiveDateTime {
        parse_timestamp(text).unwrap()
    }

    fn tx(id: i64, amount: f64, kind: TransactionType, category_id: i64, date: &str) -> Transaction {
        Transaction {
            id,
            amount,
            kind,
            description: None,
            date: ts(date),
            category_id,
        }
    }

    fn names() -> HashMap<i64, String> {
        HashMap::from([(1, "Food".to_string()), (2, "Rent".to_string())])
    }

    #[test]
    fn test_window_parsing() {
        assert_eq!("weekly".parse::<ReportWindow>().unwrap(), ReportWindow::Weekly);
        assert_eq!("Monthly".parse::<ReportWindow>().unwrap(), ReportWindow::Monthly);
        assert_eq!("30".parse::<ReportWindow>().unwrap(), ReportWindow::Monthly);
        assert_eq!("90".parse::<ReportWindow>().unwrap(), ReportWindow::Days(90));
        assert!("0".parse::<ReportWindow>().is_err());
        assert!("fortnight".parse::<ReportWindow>().is_err());
        assert_eq!(ReportWindow::Days(90).days(), 90);
    }

    #[test]
    fn test_example_breakdown() {
        let now = ts("2024-06-15 12:00:00");
        let transactions = vec![
            tx(1, 1000.0, TransactionType::Income, 1, "2024-06-14 09:00:00"),
            tx(2, 200.0, TransactionType::Expense, 1, "2024-06-14 13:00:00"),
            tx(3, 300.0, TransactionType::Expense, 2, "2024-06-15 08:00:00"),
        ];

        let outcome = build_report(&transactions, &names(), ReportWindow::Weekly, now).unwrap();
        let report = outcome.report().expect("report should have data");

        assert_eq!(report.transaction_count, 3);
        assert_eq!(report.total_income, 1000.0);
        assert_eq!(report.total_expense, 500.0);
        assert_eq!(report.net, 500.0);

        let food = report.category("Food").unwrap();
        assert_eq!((food.income, food.expense), (1000.0, 200.0));
        let rent = report.category("Rent").unwrap();
        assert_eq!((rent.income, rent.expense), (0.0, 300.0));

        let order: Vec<&str> = report.by_category.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(order, vec!["Food", "Rent"]);
    }

    #[test]
    fn test_window_bounds() {
        let now = ts("2024-06-30 12:00:00");
        let transactions = vec![
            tx(1, 1.0, TransactionType::Expense, 1, "2024-06-23 12:00:00"), // exactly now - 7d
            tx(2, 2.0, TransactionType::Expense, 1, "2024-06-23 11:59:59"), // just outside
            tx(3, 4.0, TransactionType::Expense, 1, "2024-06-30 12:00:00"), // exactly now
            tx(4, 8.0, TransactionType::Expense, 1, "2024-06-30 12:00:01"), // future
        ];

        let weekly = build_report(&transactions, &names(), ReportWindow::Weekly, now).unwrap();
        let report = weekly.report().unwrap();
        assert_eq!(report.transaction_count, 2);
        assert_eq!(report.total_expense, 5.0);

        let monthly = build_report(&transactions, &names(), ReportWindow::Monthly, now).unwrap();
        assert_eq!(monthly.report().unwrap().total_expense, 7.0);
    }

    #[test]
    fn test_custom_day_window() {
        let now = ts("2024-06-30 12:00:00");
        let transactions = vec![
            tx(1, 1.0, TransactionType::Income, 1, "2024-06-27 12:00:00"), // exactly now - 3d
            tx(2, 2.0, TransactionType::Expense, 2, "2024-06-27 11:59:59"), // just outside
            tx(3, 4.0, TransactionType::Expense, 2, "2024-06-29 18:00:00"),
        ];

        let outcome = build_report(&transactions, &names(), ReportWindow::Days(3), now).unwrap();
        let report = outcome.report().unwrap();
        assert_eq!(report.window, ReportWindow::Days(3));
        assert_eq!(report.start, ts("2024-06-27 12:00:00"));
        assert_eq!(report.transaction_count, 2);
        assert_eq!(report.net, -3.0);

        let wide = build_report(&transactions, &names(), ReportWindow::Days(90), now).unwrap();
        assert_eq!(wide.report().unwrap().total_expense, 6.0);
    }

    #[test]
    fn test_window_past_calendar_limit_is_rejected() {
        let now = ts("2024-06-30 12:00:00");
        let window: ReportWindow = "100000000".parse().unwrap();

        let err = build_report(&[], &names(), window, now).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(_)), "{}", err);
        assert!(err.is_user_error());

        let db = Database::open_in_memory().unwrap();
        assert!(generate_report(&db, window, now).is_err());
    }

    #[test]
    fn test_empty_window_is_explicit() {
        let now = ts("2024-06-30 12:00:00");
        let old = vec![tx(1, 50.0, TransactionType::Income, 1, "2024-01-01 00:00:00")];

        let outcome = build_report(&old, &names(), ReportWindow::Weekly, now).unwrap();
        assert!(outcome.is_empty());
        assert!(outcome.report().is_none());
        assert_eq!(outcome.bounds(), (ts("2024-06-23 12:00:00"), now));

        let none = build_report(&[], &names(), ReportWindow::Monthly, now).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_unknown_category_label() {
        let now = ts("2024-06-30 12:00:00");
        let transactions = vec![
            tx(1, 10.0, TransactionType::Expense, 42, "2024-06-29 10:00:00"),
            tx(2, 15.0, TransactionType::Expense, 43, "2024-06-29 11:00:00"),
        ];

        let outcome = build_report(&transactions, &names(), ReportWindow::Weekly, now).unwrap();
        let report = outcome.report().unwrap();

        assert_eq!(report.by_category.len(), 1, "all dangling ids share one bucket");
        assert_eq!(report.category(UNKNOWN_CATEGORY).unwrap().expense, 25.0);
    }

    #[test]
    fn test_generate_report_from_database() {
        let db = Database::open_in_memory().unwrap();
        let food = db.categories().create("Food").unwrap();
        let now = ts("2024-06-30 12:00:00");

        assert!(generate_report(&db, ReportWindow::Weekly, now).unwrap().is_empty());

        db.transactions()
            .create_dated(40.0, TransactionType::Expense, food.id, None, ts("2024-06-28 19:00:00"))
            .unwrap();

        let outcome = generate_report(&db, ReportWindow::Weekly, now).unwrap();
        let report = outcome.report().unwrap();
        assert_eq!(report.category("Food").unwrap().expense, 40.0);
        assert_eq!(report.net, -40.0);
    }

    #[test]
    fn test_outcome_json_shape() {
        let now = ts("2024-06-30 12:00:00");
        let outcome = build_report(&[], &names(), ReportWindow::Weekly, now).unwrap();

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "no_transactions");
        assert_eq!(json["window"], "weekly");
    }
}
