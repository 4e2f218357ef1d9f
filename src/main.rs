// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;

use budget_tracker::cli::{format_money, format_transaction, render_report, Menu};
use budget_tracker::config::{self, Config};
use budget_tracker::seed::DEFAULT_SEED_COUNT;
use budget_tracker::{
    create_default_categories, export_csv_file, generate_report, import_csv_file, parse_day,
    seed_data, Database, ReportWindow, Transaction,
};

#[derive(Parser)]
#[command(
    name = "budget-tracker",
    version,
    about = "Personal budget tracker: income, expenses, categories and reports"
)]
struct Cli {
    /// SQLite database file
    #[arg(long, env = config::DB_ENV, default_value = config::DEFAULT_DB_PATH, global = true)]
    db: PathBuf,

    /// Log filter (overridden by RUST_LOG)
    #[arg(long, env = config::LOG_ENV, default_value = config::DEFAULT_LOG_LEVEL, global = true)]
    log_level: String,

    /// Do not create the default categories on startup
    #[arg(long, global = true)]
    no_defaults: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive numbered menu (default)
    Menu,

    /// Full-screen transaction browser
    #[command(alias = "ui")]
    Browse,

    /// Print the current balance
    Balance,

    /// List transactions, optionally filtered
    List {
        /// Only this category id
        #[arg(short, long)]
        category: Option<i64>,

        /// Only this day (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Income/expense summary over a trailing window
    Report {
        /// weekly, monthly, or a number of days
        #[arg(short, long, default_value = "weekly")]
        window: ReportWindow,

        #[arg(long)]
        json: bool,
    },

    /// Insert deterministic sample data
    Seed {
        #[arg(short = 'n', long, default_value_t = DEFAULT_SEED_COUNT)]
        count: usize,
    },

    /// Write all transactions to a CSV file
    Export { path: PathBuf },

    /// Read transactions from a CSV file
    Import { path: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        db_path: cli.db.clone(),
        log_level: cli.log_level.clone(),
        bootstrap: !cli.no_defaults,
    };
    config.init_logging();

    let db = config
        .open_database()
        .with_context(|| format!("Failed to open database {}", config.db_path.display()))?;

    if config.bootstrap {
        let created = create_default_categories(&db)?;
        if !created.is_empty() {
            println!("✓ Default categories created ({})", created.len());
        }
    }

    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => {
            let stdin = io::stdin();
            let mut menu = Menu::new(&db, stdin.lock(), io::stdout());
            menu.run()?;
        }
        Command::Browse => run_ui_mode(&db)?,
        Command::Balance => {
            let balance = db.transactions().get_balance()?;
            println!("Current Balance: {}", format_money(balance));
        }
        Command::List {
            category,
            date,
            json,
        } => run_list(&db, category, date.as_deref(), json)?,
        Command::Report { window, json } => {
            let outcome = generate_report(&db, window, budget_tracker::db::now())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print!("{}", render_report(&outcome));
            }
        }
        Command::Seed { count } => {
            let summary = seed_data(&db, count, budget_tracker::db::now())?;
            println!("✓ Sample data created: {} transactions", summary.transactions_created);
            println!("Current Balance: {}", format_money(summary.balance));
        }
        Command::Export { path } => {
            let rows = export_csv_file(&db, &path)
                .with_context(|| format!("Failed to export to {}", path.display()))?;
            println!("✓ Exported {} transactions to {}", rows, path.display());
        }
        Command::Import { path } => {
            let summary = import_csv_file(&db, &path)
                .with_context(|| format!("Failed to import {}", path.display()))?;
            println!(
                "✓ Imported {} transactions ({} new categories)",
                summary.imported, summary.categories_created
            );
        }
    }

    Ok(())
}

/// Pick the store query matching the `list` filters
fn select_transactions(
    db: &Database,
    category: Option<i64>,
    date: Option<&str>,
) -> Result<Vec<Transaction>> {
    let store = db.transactions();
    let day = date.map(parse_day).transpose()?;

    let transactions = match (category, day) {
        (Some(id), None) => store.find_by_category(id)?,
        (Some(id), Some(day)) => {
            let mut matching = store.find_by_category(id)?;
            matching.retain(|tx| tx.day() == day);
            matching
        }
        (None, Some(day)) => store.find_by_date(day)?,
        (None, None) => store.get_all()?,
    };
    Ok(transactions)
}

fn run_list(db: &Database, category: Option<i64>, date: Option<&str>, json: bool) -> Result<()> {
    let transactions = select_transactions(db, category, date)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&transactions)?);
        return Ok(());
    }

    if transactions.is_empty() {
        println!("No transactions found.");
        return Ok(());
    }

    let names = db.categories().names_by_id()?;
    for tx in &transactions {
        println!("{}", format_transaction(tx, &names));
    }
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(db: &Database) -> Result<()> {
    let transactions = db.transactions().get_all()?;
    let categories = db.categories().get_all()?;
    let balance = db.transactions().get_balance()?;

    let mut app = ui::App::new(transactions, categories, balance);
    ui::run_ui(&mut app)?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_db: &Database) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use the menu: budget-tracker menu");
    std::process::exit(1);
}
