//! Batch-boundary error policy on top of a [`TodoStore`].

use std::time::Instant;

use thiserror::Error;
use tracing::{error, info};

use super::store::{CombinedInsert, TodoStore};
use crate::builders::BatchBuilder;
use crate::config::FailurePolicy;
use crate::generators::{GeneratedTodo, GeneratedUser};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Seeds batches into a store, applying a [`FailurePolicy`] to store errors.
///
/// With [`FailurePolicy::Skip`] a failed batch is logged and reported as
/// `None`; the caller sees no error and no inserted ids for it. With
/// [`FailurePolicy::Abort`] the error is returned.
pub struct Seeder<S> {
    store: S,
    policy: FailurePolicy,
}

impl<S: TodoStore> Seeder<S> {
    /// Creates a seeder that skips failed batches.
    pub fn new(store: S) -> Self {
        Self {
            store,
            policy: FailurePolicy::Skip,
        }
    }

    /// Sets what happens when a batch fails.
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Seeds one batch of todos, returning their ids or the store error.
    pub async fn try_seed_todos(&self, todos: &[GeneratedTodo]) -> Result<Vec<i64>, SeedError> {
        let start = Instant::now();
        let ids = self.store.insert_todos(todos).await?;
        info!(
            "Processed {} todos in {:.2} seconds",
            todos.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(ids)
    }

    /// Seeds one batch of todos under the configured policy.
    pub async fn seed_todos(
        &self,
        todos: &[GeneratedTodo],
    ) -> Result<Option<Vec<i64>>, SeedError> {
        let result = self.try_seed_todos(todos).await;
        self.apply_policy(result)
    }

    /// Seeds users, then [`TODOS_PER_USER`](crate::builders::TODOS_PER_USER)
    /// todos for each of them, in one unit of work.
    pub async fn try_seed_users_and_todos(
        &self,
        users: &[GeneratedUser],
        builder: &mut BatchBuilder,
    ) -> Result<CombinedInsert, SeedError> {
        let start = Instant::now();
        let inserted = self.store.insert_users_and_todos(users, builder).await?;
        info!(
            "Processed {} users and {} todos in {:.2} seconds",
            inserted.user_ids.len(),
            inserted.todo_ids.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(inserted)
    }

    /// Seeds users and their todos under the configured policy.
    pub async fn seed_users_and_todos(
        &self,
        users: &[GeneratedUser],
        builder: &mut BatchBuilder,
    ) -> Result<Option<CombinedInsert>, SeedError> {
        let result = self.try_seed_users_and_todos(users, builder).await;
        self.apply_policy(result)
    }

    fn apply_policy<T>(&self, result: Result<T, SeedError>) -> Result<Option<T>, SeedError> {
        match (result, self.policy) {
            (Ok(value), _) => Ok(Some(value)),
            (Err(e), FailurePolicy::Skip) => {
                error!("Database error: {e}");
                Ok(None)
            }
            (Err(e), FailurePolicy::Abort) => Err(e),
        }
    }
}
