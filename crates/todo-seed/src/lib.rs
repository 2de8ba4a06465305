//! Bulk todo generation and loading for PostgreSQL.
//!
//! Generates random todos (and, optionally, users owning ten todos each),
//! inserts them one page at a time with a single multi-row `INSERT` per
//! statement, and reports throughput.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use todo_seed::prelude::*;
//!
//! let config = SeedConfig {
//!     total_records: 1_000_000,
//!     ..Default::default()
//! };
//! let options = DbConfig::from_env()?.connect_options()?;
//! let seeder = Seeder::new(PgStore::new(options, config.page_size));
//! let mut builder = BatchBuilder::new();
//!
//! let stats = run(&seeder, &config, &mut builder).await?;
//! stats.log_summary();
//! ```

pub mod builders;
pub mod config;
pub mod db;
pub mod generators;
pub mod report;
pub mod runner;

#[cfg(test)]
mod testing;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{BatchBuilder, TODOS_PER_USER};
    pub use crate::config::{DbConfig, FailurePolicy, SeedArgs, SeedConfig, SeedMode};
    pub use crate::db::{BulkInsert, BulkRow, Inserted, PgStore, SeedError, Seeder, TodoStore};
    pub use crate::generators::{GeneratedTodo, GeneratedUser, TodoGenerator, UserGenerator};
    pub use crate::report::RunStats;
    pub use crate::runner::run;
}
