// 🧭 Interactive numbered menu
//
// Reads from any BufRead and writes to any Write so a whole session can be
// scripted in tests. Store errors caused by user input are printed and the
// menu keeps going; storage-engine failures end the session.

use anyhow::Result;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::io::{BufRead, Write};

use crate::db::{self, parse_day, Database, DAY_FORMAT};
use crate::entities::{Category, Transaction, TransactionType};
use crate::error::LedgerError;
use crate::reports::{generate_report, ReportOutcome, ReportWindow, UNKNOWN_CATEGORY};

const RULE: &str = "--------------------------------------------------------------------------------";

pub struct Menu<'a, R, W> {
    db: &'a Database,
    input: R,
    out: W,
    clock: fn() -> NaiveDateTime,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(db: &'a Database, input: R, out: W) -> Self {
        Menu {
            db,
            input,
            out,
            clock: db::now,
        }
    }

    /// Fix "now" for reports (tests)
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Main loop; returns on `0` or end of input
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.out, "Welcome to the Budget Tracker CLI!")?;

        loop {
            self.print_main_menu()?;
            let Some(choice) = self.prompt("\nEnter choice: ")? else {
                break;
            };

            match choice.as_str() {
                "1" => self.add_transaction(TransactionType::Income)?,
                "2" => self.add_transaction(TransactionType::Expense)?,
                "3" => self.view_transactions()?,
                "4" => self.delete_transaction()?,
                "5" => self.view_balance()?,
                "6" => self.manage_categories()?,
                "7" => self.search_transactions()?,
                "8" => self.generate_reports()?,
                "0" => {
                    writeln!(self.out, "Thanks for using the Budget Tracker!")?;
                    return Ok(());
                }
                _ => writeln!(self.out, "Invalid choice. Please try again.")?,
            }
        }

        Ok(())
    }

    fn print_main_menu(&mut self) -> Result<()> {
        writeln!(self.out, "\n========================================")?;
        writeln!(self.out, "PERSONAL BUDGET TRACKER")?;
        writeln!(self.out, "========================================")?;
        writeln!(self.out, "1. Add Income")?;
        writeln!(self.out, "2. Add Expense")?;
        writeln!(self.out, "3. View Transactions")?;
        writeln!(self.out, "4. Delete Transaction")?;
        writeln!(self.out, "5. View Balance")?;
        writeln!(self.out, "6. Manage Categories")?;
        writeln!(self.out, "7. Search Transactions")?;
        writeln!(self.out, "8. Generate Reports")?;
        writeln!(self.out, "0. Exit")?;
        Ok(())
    }

    // ========================================================================
    // INPUT HELPERS
    // ========================================================================

    /// Print a prompt and read one trimmed line; `None` at end of input
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{}", label)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_id(&mut self, label: &str) -> Result<Option<i64>> {
        match self.prompt(label)? {
            None => Ok(None),
            Some(text) => match text.parse::<i64>() {
                Ok(id) => Ok(Some(id)),
                Err(_) => {
                    writeln!(self.out, "Invalid input. Please enter a valid ID.")?;
                    Ok(None)
                }
            },
        }
    }

    /// Print user-facing errors, propagate the rest
    fn report_error(&mut self, err: LedgerError) -> Result<()> {
        if err.is_user_error() {
            writeln!(self.out, "Error: {}", err)?;
            Ok(())
        } else {
            Err(err.into())
        }
    }

    fn list_categories(&mut self, categories: &[Category]) -> Result<()> {
        for cat in categories {
            writeln!(self.out, "{}. {}", cat.id, cat.name)?;
        }
        Ok(())
    }

    fn print_transactions(&mut self, transactions: &[Transaction]) -> Result<()> {
        let names = self.db.categories().names_by_id()?;
        writeln!(self.out, "{}", RULE)?;
        for tx in transactions {
            writeln!(self.out, "{}", format_transaction(tx, &names))?;
            writeln!(self.out, "{}", RULE)?;
        }
        Ok(())
    }

    // ========================================================================
    // MENU ACTIONS
    // ========================================================================

    fn add_transaction(&mut self, kind: TransactionType) -> Result<()> {
        let categories = self.db.categories().get_all()?;
        if categories.is_empty() {
            writeln!(self.out, "No categories found. Please create a category first.")?;
            return Ok(());
        }

        writeln!(self.out, "Categories:")?;
        self.list_categories(&categories)?;

        let Some(amount_text) = self.prompt(&format!("{} amount: $", kind.title()))? else {
            return Ok(());
        };
        let Some(category_text) = self.prompt("Category number: ")? else {
            return Ok(());
        };

        let (amount, category_id) =
            match (amount_text.parse::<f64>(), category_text.parse::<i64>()) {
                (Ok(amount), Ok(id)) => (amount, id),
                _ => {
                    writeln!(self.out, "Invalid input. Please enter valid numbers.")?;
                    return Ok(());
                }
            };

        let Some(description) = self.prompt("Description (optional): ")? else {
            return Ok(());
        };
        let description = Some(description).filter(|d| !d.is_empty());

        match self
            .db
            .transactions()
            .create(amount, kind, category_id, description.as_deref())
        {
            Ok(tx) => writeln!(
                self.out,
                "{} of ${:.2} added successfully!",
                kind.title(),
                tx.amount
            )?,
            Err(e) => self.report_error(e)?,
        }

        Ok(())
    }

    fn view_transactions(&mut self) -> Result<()> {
        let transactions = self.db.transactions().get_all()?;
        if transactions.is_empty() {
            writeln!(self.out, "No transactions found.")?;
            return Ok(());
        }

        writeln!(self.out, "\nAll Transactions:")?;
        self.print_transactions(&transactions)
    }

    fn delete_transaction(&mut self) -> Result<()> {
        if self.db.transactions().count()? == 0 {
            writeln!(self.out, "No transactions to delete.")?;
            return Ok(());
        }

        self.view_transactions()?;
        let Some(id) = self.prompt_id("Enter transaction ID to delete: ")? else {
            return Ok(());
        };

        if self.db.transactions().delete(id)? {
            writeln!(self.out, "Transaction deleted successfully!")?;
        } else {
            writeln!(self.out, "Transaction not found.")?;
        }
        Ok(())
    }

    fn view_balance(&mut self) -> Result<()> {
        let balance = self.db.transactions().get_balance()?;
        writeln!(self.out, "\nCurrent Balance: {}", format_money(balance))?;
        Ok(())
    }

    fn manage_categories(&mut self) -> Result<()> {
        loop {
            writeln!(self.out, "\n--- Category Management ---")?;
            writeln!(self.out, "1. View Categories")?;
            writeln!(self.out, "2. Add Category")?;
            writeln!(self.out, "3. Delete Category")?;
            writeln!(self.out, "0. Back to Main Menu")?;

            let Some(choice) = self.prompt("Enter choice: ")? else {
                return Ok(());
            };

            match choice.as_str() {
                "1" => {
                    let categories = self.db.categories().get_all()?;
                    if categories.is_empty() {
                        writeln!(self.out, "No categories found.")?;
                    } else {
                        writeln!(self.out, "\nCategories:")?;
                        self.list_categories(&categories)?;
                    }
                }
                "2" => {
                    let Some(name) = self.prompt("Category name: ")? else {
                        return Ok(());
                    };
                    if name.is_empty() {
                        writeln!(self.out, "Category name cannot be empty.")?;
                        continue;
                    }
                    match self.db.categories().create(&name) {
                        Ok(cat) => {
                            writeln!(self.out, "Category '{}' created successfully!", cat.name)?
                        }
                        Err(e) => self.report_error(e)?,
                    }
                }
                "3" => {
                    let categories = self.db.categories().get_all()?;
                    if categories.is_empty() {
                        writeln!(self.out, "No categories to delete.")?;
                        continue;
                    }
                    writeln!(self.out, "\nCategories:")?;
                    self.list_categories(&categories)?;

                    let Some(id) = self.prompt_id("Enter category ID to delete: ")? else {
                        continue;
                    };
                    match self.db.categories().delete(id) {
                        Ok(true) => writeln!(self.out, "Category deleted successfully!")?,
                        Ok(false) => writeln!(self.out, "Category not found.")?,
                        Err(e) => self.report_error(e)?,
                    }
                }
                "0" => return Ok(()),
                _ => writeln!(self.out, "Invalid choice. Please try again.")?,
            }
        }
    }

    fn search_transactions(&mut self) -> Result<()> {
        writeln!(self.out, "\n--- Search Transactions ---")?;
        writeln!(self.out, "1. Search by Category")?;
        writeln!(self.out, "2. Search by Date")?;

        let Some(choice) = self.prompt("Enter choice: ")? else {
            return Ok(());
        };

        match choice.as_str() {
            "1" => {
                let categories = self.db.categories().get_all()?;
                if categories.is_empty() {
                    writeln!(self.out, "No categories found.")?;
                    return Ok(());
                }
                writeln!(self.out, "Categories:")?;
                self.list_categories(&categories)?;

                let Some(id) = self.prompt_id("Enter category ID: ")? else {
                    return Ok(());
                };
                let transactions = self.db.transactions().find_by_category(id)?;
                if transactions.is_empty() {
                    writeln!(self.out, "No transactions found for this category.")?;
                } else {
                    writeln!(self.out, "\nTransactions in category:")?;
                    self.print_transactions(&transactions)?;
                }
            }
            "2" => {
                let Some(text) = self.prompt("Enter date (YYYY-MM-DD): ")? else {
                    return Ok(());
                };
                let day = match parse_day(&text) {
                    Ok(day) => day,
                    Err(e) => return self.report_error(e),
                };
                let transactions = self.db.transactions().find_by_date(day)?;
                if transactions.is_empty() {
                    writeln!(self.out, "No transactions found for this date.")?;
                } else {
                    writeln!(self.out, "\nTransactions on {}:", day.format(DAY_FORMAT))?;
                    self.print_transactions(&transactions)?;
                }
            }
            _ => writeln!(self.out, "Invalid choice.")?,
        }

        Ok(())
    }

    fn generate_reports(&mut self) -> Result<()> {
        writeln!(self.out, "\n--- Generate Reports ---")?;
        writeln!(self.out, "1. Weekly Report")?;
        writeln!(self.out, "2. Monthly Report")?;

        let window = match self.prompt("Enter choice: ")?.as_deref() {
            Some("1") => ReportWindow::Weekly,
            Some("2") => ReportWindow::Monthly,
            Some(_) => {
                writeln!(self.out, "Invalid choice.")?;
                return Ok(());
            }
            None => return Ok(()),
        };

        let outcome = generate_report(self.db, window, (self.clock)())?;
        write!(self.out, "{}", render_report(&outcome))?;
        Ok(())
    }
}

// ============================================================================
// FORMATTING (shared with the one-shot subcommands)
// ============================================================================

/// `$1,234.50` style with a leading minus for negatives
pub fn format_money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", -amount)
    } else {
        format!("${:.2}", amount)
    }
}

/// Two-line listing entry
pub fn format_transaction(tx: &Transaction, names: &HashMap<i64, String>) -> String {
    let category = names
        .get(&tx.category_id)
        .map(String::as_str)
        .unwrap_or(UNKNOWN_CATEGORY);

    format!(
        "ID: {} | {}: ${:.2} | Category: {}\nDate: {} | Description: {}",
        tx.id,
        tx.kind.title(),
        tx.amount,
        category,
        db::format_timestamp(&tx.date),
        tx.description.as_deref().unwrap_or("N/A"),
    )
}

pub fn render_report(outcome: &ReportOutcome) -> String {
    let (start, end) = outcome.bounds();
    let window = match outcome {
        ReportOutcome::NoTransactions { window, .. } => *window,
        ReportOutcome::Summary(report) => report.window,
    };

    let mut text = format!(
        "\n{} ({} to {}):\n",
        window.title(),
        start.format(DAY_FORMAT),
        end.format(DAY_FORMAT)
    );

    let Some(report) = outcome.report() else {
        text.push_str("No transactions found in this period.\n");
        return text;
    };

    text.push_str(&format!("Total Income: {}\n", format_money(report.total_income)));
    text.push_str(&format!("Total Expenses: {}\n", format_money(report.total_expense)));
    text.push_str(&format!("Net: {}\n", format_money(report.net)));
    text.push_str("\nCategory Breakdown:\n");
    for totals in &report.by_category {
        text.push_str(&format!(
            "{}: Income {}, Expenses {}\n",
            totals.category,
            format_money(totals.income),
            format_money(totals.expense)
        ));
    }

    text
}
