//! Multi-row `INSERT ... RETURNING` statements built with value-list expansion.

use sqlx::query_builder::Separated;
use sqlx::{PgConnection, Postgres, QueryBuilder};
use tracing::debug;

/// PostgreSQL caps a single statement at this many bind parameters.
pub const MAX_BIND_PARAMS: usize = u16::MAX as usize;

/// A record that can be written as one tuple of a multi-row insert.
pub trait BulkRow: Sync {
    /// Column names, in the order [`push_binds`](Self::push_binds) binds them.
    const COLUMNS: &'static [&'static str];

    /// Binds this record's values into the current row tuple.
    fn push_binds<'args>(&'args self, row: &mut Separated<'_, 'args, Postgres, &'static str>);
}

/// Result of one [`BulkInsert::execute`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inserted {
    /// Generated ids, in insertion order.
    pub ids: Vec<i64>,
    /// Statements sent to the server.
    pub statements: usize,
}

/// Inserts homogeneous rows into one table and returns their generated ids.
///
/// Rows are split into statements of at most [`rows_per_statement`] tuples;
/// each statement is a single round trip.
///
/// [`rows_per_statement`]: BulkInsert::rows_per_statement
#[derive(Debug, Clone)]
pub struct BulkInsert {
    table: String,
    page_size: usize,
}

impl BulkInsert {
    /// Creates an insert into `table` returning its `id` column.
    pub fn new(table: impl Into<String>, page_size: usize) -> Self {
        Self {
            table: table.into(),
            page_size,
        }
    }

    /// Largest number of rows placed in one statement.
    ///
    /// Bounded by the page size and by the bind-parameter limit for `R`'s width.
    pub fn rows_per_statement<R: BulkRow>(&self) -> usize {
        let by_params = MAX_BIND_PARAMS / R::COLUMNS.len().max(1);
        self.page_size.min(by_params).max(1)
    }

    /// Number of statements needed to insert `rows` rows of `R`.
    pub fn statement_count<R: BulkRow>(&self, rows: usize) -> usize {
        rows.div_ceil(self.rows_per_statement::<R>())
    }

    /// Builds the statement for one chunk of rows.
    pub fn statement<'args, R: BulkRow>(&self, rows: &'args [R]) -> QueryBuilder<'args, Postgres> {
        let mut statement = QueryBuilder::new(format!(
            "INSERT INTO {} ({}) ",
            self.table,
            R::COLUMNS.join(", ")
        ));
        statement.push_values(rows, |mut tuple, row| row.push_binds(&mut tuple));
        statement.push(" RETURNING id::int8");
        statement
    }

    /// Inserts all `rows` on `conn`, one statement per chunk.
    ///
    /// Runs on whatever transaction `conn` is in; an error leaves it to the
    /// caller to roll back.
    pub async fn execute<R: BulkRow>(
        &self,
        conn: &mut PgConnection,
        rows: &[R],
    ) -> Result<Inserted, sqlx::Error> {
        debug!(
            "Inserting {} rows into {} in {} statements",
            rows.len(),
            self.table,
            self.statement_count::<R>(rows.len())
        );
        let mut inserted = Inserted {
            ids: Vec::with_capacity(rows.len()),
            statements: 0,
        };

        for chunk in rows.chunks(self.rows_per_statement::<R>()) {
            let mut statement = self.statement(chunk);
            let chunk_ids: Vec<i64> = statement
                .build_query_scalar()
                .fetch_all(&mut *conn)
                .await?;
            debug!("Inserted {} rows into {}", chunk_ids.len(), self.table);
            inserted.ids.extend(chunk_ids);
            inserted.statements += 1;
        }

        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{GeneratedTodo, GeneratedUser};

    fn todo(user_id: i64) -> GeneratedTodo {
        GeneratedTodo {
            title: "Fix log files.".to_string(),
            user_id,
            description: "Plan the next sprint goals for maintainability.".to_string(),
        }
    }

    #[test]
    fn test_statement_expands_value_list() {
        let insert = BulkInsert::new("todos", 100_000);
        let rows = vec![todo(4), todo(4)];
        let statement = insert.statement(&rows);
        let sql = statement.sql();

        assert!(sql.starts_with("INSERT INTO todos (title, user_id, description) VALUES"));
        assert!(sql.contains("($1, $2, $3), ($4, $5, $6)"), "{sql}");
        assert!(sql.ends_with(" RETURNING id::int8"), "{sql}");
    }

    #[test]
    fn test_statement_for_users() {
        let insert = BulkInsert::new("users", 100_000);
        let rows = vec![GeneratedUser {
            name: "User1".to_string(),
            email: "user1@example.com".to_string(),
        }];
        let statement = insert.statement(&rows);
        let sql = statement.sql();

        assert!(sql.starts_with("INSERT INTO users (name, email) VALUES"));
        assert!(sql.contains("($1, $2)"));
        assert!(!sql.contains("$3"));
        assert!(sql.ends_with(" RETURNING id::int8"));
    }

    #[test]
    fn test_rows_per_statement_respects_bind_limit() {
        let insert = BulkInsert::new("todos", 100_000);

        assert_eq!(insert.rows_per_statement::<GeneratedTodo>(), MAX_BIND_PARAMS / 3);
        assert_eq!(insert.rows_per_statement::<GeneratedUser>(), MAX_BIND_PARAMS / 2);
        assert!(insert.rows_per_statement::<GeneratedTodo>() * 3 <= MAX_BIND_PARAMS);
    }

    #[test]
    fn test_rows_per_statement_respects_page_size() {
        let insert = BulkInsert::new("todos", 500);
        assert_eq!(insert.rows_per_statement::<GeneratedTodo>(), 500);

        let degenerate = BulkInsert::new("todos", 0);
        assert_eq!(degenerate.rows_per_statement::<GeneratedTodo>(), 1);
    }

    #[test]
    fn test_statement_count() {
        let insert = BulkInsert::new("todos", 100_000);

        assert_eq!(insert.statement_count::<GeneratedTodo>(0), 0);
        assert_eq!(insert.statement_count::<GeneratedTodo>(3), 1);
        assert_eq!(insert.statement_count::<GeneratedTodo>(21_845), 1);
        assert_eq!(insert.statement_count::<GeneratedTodo>(21_846), 2);
        assert_eq!(insert.statement_count::<GeneratedTodo>(100_000), 5);
    }
}
