//! User generation for the combined seeding path.

use std::ops::Range;

use sqlx::Postgres;
use sqlx::query_builder::Separated;

use crate::db::BulkRow;

/// Generated user data ready for database insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUser {
    pub name: String,
    pub email: String,
}

impl BulkRow for GeneratedUser {
    const COLUMNS: &'static [&'static str] = &["name", "email"];

    fn push_binds<'args>(&'args self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.name.as_str())
            .push_bind(self.email.as_str());
    }
}

/// Generates sequentially numbered users.
///
/// Numbering starts after `offset` so repeated runs against the same database
/// can continue where the previous one stopped.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserGenerator {
    offset: u64,
}

impl UserGenerator {
    /// Creates a generator whose first user is `User1`.
    pub fn new() -> Self {
        Self { offset: 0 }
    }

    /// Creates a generator whose first user is `User{offset + 1}`.
    pub fn with_offset(offset: u64) -> Self {
        Self { offset }
    }

    /// Generates the user with sequence number `n`.
    pub fn generate(&self, n: u64) -> GeneratedUser {
        GeneratedUser {
            name: format!("User{n}"),
            email: format!("user{n}@example.com"),
        }
    }

    /// Generates users for positions `range` relative to the offset.
    ///
    /// Position `0` maps to sequence number `offset + 1`.
    pub fn generate_batch(&self, range: Range<u64>) -> Vec<GeneratedUser> {
        range
            .map(|position| self.generate(self.offset + position + 1))
            .collect()
    }
}
