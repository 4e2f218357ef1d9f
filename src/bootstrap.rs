// 🌱 Bootstrap - default categories on first run

use std::collections::HashSet;
use tracing::info;

use crate::db::Database;
use crate::entities::Category;
use crate::error::Result;

pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Food",
    "Rent",
    "Transport",
    "Entertainment",
    "Utilities",
    "Other",
];

/// Create whichever default categories are missing (exact name match).
///
/// Returns only the categories created by this call, so a second run
/// returns an empty list.
pub fn create_default_categories(db: &Database) -> Result<Vec<Category>> {
    let store = db.categories();
    let existing: HashSet<String> = store.get_all()?.into_iter().map(|c| c.name).collect();

    let mut created = Vec::new();
    for name in DEFAULT_CATEGORIES {
        if !existing.contains(name) {
            created.push(store.create(name)?);
        }
    }

    if !created.is_empty() {
        info!(created = created.len(), "default categories created");
    }

    Ok(created)
}
