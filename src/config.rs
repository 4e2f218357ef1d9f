// ⚙️ Runtime configuration
//
// Resolution order for every setting: command-line flag, then environment
// variable, then built-in default (clap handles the first two).

use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::db::Database;
use crate::error::Result;

pub const DEFAULT_DB_PATH: &str = "budget.db";
pub const DB_ENV: &str = "BUDGET_TRACKER_DB";
pub const LOG_ENV: &str = "BUDGET_TRACKER_LOG";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// SQLite file holding both tables
    pub db_path: PathBuf,

    /// tracing filter directive (`warn`, `budget_tracker=debug`, ...)
    pub log_level: String,

    /// Create the default categories on startup
    pub bootstrap: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            bootstrap: true,
        }
    }
}

impl Config {
    /// Install the stderr subscriber.
    ///
    /// `RUST_LOG` wins over the configured level when set. Safe to call more
    /// than once; later calls are ignored.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.log_level))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Open the configured database, creating its parent directory if needed
    pub fn open_database(&self) -> Result<Database> {
        ensure_parent_dir(&self.db_path)?;
        Database::open(&self.db_path)
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
