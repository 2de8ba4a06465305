//! Database integration for seeding generated data.
//!
//! [`BulkInsert`] turns a slice of [`BulkRow`]s into multi-row `INSERT`
//! statements, [`PgStore`] runs them one transaction per batch, and the
//! [`Seeder`] decides what a failed batch means for the caller.

mod bulk;
mod seeder;
mod store;

pub use bulk::{BulkInsert, BulkRow, Inserted, MAX_BIND_PARAMS};
pub use seeder::{SeedError, Seeder};
pub use store::{CombinedInsert, PgStore, TodoStore};
