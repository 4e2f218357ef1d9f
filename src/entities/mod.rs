// Entity Models
//
// Each entity has:
// - A plain data struct (what callers pass around)
// - A store borrowing the Database connection (create/read/delete)

pub mod category;
pub mod transaction;

pub use category::{Category, CategoryStore};
pub use transaction::{Transaction, TransactionStore, TransactionType};
