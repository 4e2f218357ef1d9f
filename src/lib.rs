// Budget Tracker - Core Library
// Exposes the stores, reports and helpers used by the CLI, the browser and tests

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod export;
pub mod reports;
pub mod seed;

// Re-export commonly used types
pub use bootstrap::{create_default_categories, DEFAULT_CATEGORIES};
pub use config::Config;
pub use db::{format_timestamp, parse_day, parse_timestamp, setup_database, Database};
pub use entities::{Category, CategoryStore, Transaction, TransactionStore, TransactionType};
pub use error::{LedgerError, Result};
pub use export::{export_csv, export_csv_file, import_csv, import_csv_file, ImportSummary};
pub use reports::{
    build_report, generate_report, CategoryTotals, Report, ReportOutcome, ReportWindow,
    UNKNOWN_CATEGORY,
};
pub use seed::{seed_data, SeedSummary};
