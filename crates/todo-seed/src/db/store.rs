//! Transactional bulk-insert store.

use std::future::Future;
use std::time::Instant;

use async_trait::async_trait;
use sqlx::postgres::PgConnectOptions;
use sqlx::{Connection, PgConnection};
use tracing::{info, warn};

use super::bulk::BulkInsert;
use super::seeder::SeedError;
use crate::builders::BatchBuilder;
use crate::generators::{GeneratedTodo, GeneratedUser};

/// Ids returned by a combined users-then-todos insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombinedInsert {
    pub user_ids: Vec<i64>,
    pub todo_ids: Vec<i64>,
}

/// Destination for generated batches.
///
/// Every call is one unit of work: it either commits all of its rows or none.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Inserts `todos` and returns their generated ids.
    async fn insert_todos(&self, todos: &[GeneratedTodo]) -> Result<Vec<i64>, SeedError>;

    /// Inserts `users`, then the todos `builder` creates for the returned ids.
    async fn insert_users_and_todos(
        &self,
        users: &[GeneratedUser],
        builder: &mut BatchBuilder,
    ) -> Result<CombinedInsert, SeedError>;
}

/// PostgreSQL store opening one connection and one transaction per call.
///
/// The transaction is committed only after every statement succeeds. On any
/// error the transaction and connection are dropped, which rolls back and
/// disconnects.
#[derive(Debug, Clone)]
pub struct PgStore {
    options: PgConnectOptions,
    page_size: usize,
    users: BulkInsert,
    todos: BulkInsert,
}

impl PgStore {
    /// Creates a store writing to the `users` and `todos` tables.
    pub fn new(options: PgConnectOptions, page_size: usize) -> Self {
        Self {
            options,
            page_size,
            users: BulkInsert::new("users", page_size),
            todos: BulkInsert::new("todos", page_size),
        }
    }

    /// Overrides the target table names.
    pub fn with_tables(mut self, users_table: &str, todos_table: &str) -> Self {
        self.users = BulkInsert::new(users_table, self.page_size);
        self.todos = BulkInsert::new(todos_table, self.page_size);
        self
    }

    async fn connect(&self) -> Result<PgConnection, sqlx::Error> {
        PgConnection::connect_with(&self.options).await
    }
}

#[async_trait]
impl TodoStore for PgStore {
    async fn insert_todos(&self, todos: &[GeneratedTodo]) -> Result<Vec<i64>, SeedError> {
        let start = Instant::now();
        let mut conn = self.connect().await?;
        let mut tx = conn.begin().await?;

        info!("Inserting {} todos...", todos.len());
        let inserted = self.todos.execute(&mut *tx, todos).await?;
        info!(
            "Inserted {} todos in {} statements in {:.2} seconds",
            inserted.ids.len(),
            inserted.statements,
            start.elapsed().as_secs_f64()
        );

        tx.commit().await?;
        info!("Transaction committed");

        Ok(after_commit(inserted.ids, conn.close()).await)
    }

    async fn insert_users_and_todos(
        &self,
        users: &[GeneratedUser],
        builder: &mut BatchBuilder,
    ) -> Result<CombinedInsert, SeedError> {
        let start = Instant::now();
        let mut conn = self.connect().await?;
        let mut tx = conn.begin().await?;

        info!("Inserting {} users...", users.len());
        let user_ids = self.users.execute(&mut *tx, users).await?.ids;
        info!(
            "Inserted {} users in {:.2} seconds",
            user_ids.len(),
            start.elapsed().as_secs_f64()
        );

        let todos = builder.todos_for_users(&user_ids);
        info!("Inserting {} todos...", todos.len());
        let todo_start = Instant::now();
        let todo_ids = self.todos.execute(&mut *tx, &todos).await?.ids;
        info!(
            "Inserted {} todos in {:.2} seconds",
            todo_ids.len(),
            todo_start.elapsed().as_secs_f64()
        );

        tx.commit().await?;
        info!("Transaction committed");

        Ok(after_commit(CombinedInsert { user_ids, todo_ids }, conn.close()).await)
    }
}

/// Releases the connection of a committed batch and hands back its result.
///
/// The rows are durable once the commit returns, so a failed close is only
/// logged.
async fn after_commit<T, F>(committed: T, close: F) -> T
where
    F: Future<Output = Result<(), sqlx::Error>>,
{
    if let Err(e) = close.await {
        warn!("Failed to close connection after commit: {e}");
    }
    committed
}
