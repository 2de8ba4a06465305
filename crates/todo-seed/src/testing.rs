//! In-memory [`TodoStore`] for exercising seeding logic without PostgreSQL.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::builders::BatchBuilder;
use crate::db::{CombinedInsert, SeedError, TodoStore};
use crate::generators::{GeneratedTodo, GeneratedUser};

/// Assigns sequential ids per table and can be told to fail specific calls.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<GeneratedUser>>,
    todos: Mutex<Vec<GeneratedTodo>>,
    calls: AtomicUsize,
    fail_all: bool,
    fail_calls: HashSet<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails.
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    /// A store that fails the given zero-based calls.
    pub fn failing_on(calls: &[usize]) -> Self {
        Self {
            fail_calls: calls.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn users(&self) -> Vec<GeneratedUser> {
        self.users.lock().unwrap().clone()
    }

    pub fn todos(&self) -> Vec<GeneratedTodo> {
        self.todos.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn begin_call(&self) -> Result<(), SeedError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_all || self.fail_calls.contains(&call) {
            return Err(SeedError::Database(sqlx::Error::Protocol(
                "simulated store failure".to_string(),
            )));
        }
        Ok(())
    }

    fn append<T: Clone>(table: &Mutex<Vec<T>>, rows: &[T]) -> Vec<i64> {
        let mut table = table.lock().unwrap();
        let first = table.len() as i64 + 1;
        table.extend_from_slice(rows);
        (first..first + rows.len() as i64).collect()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn insert_todos(&self, todos: &[GeneratedTodo]) -> Result<Vec<i64>, SeedError> {
        self.begin_call()?;
        Ok(Self::append(&self.todos, todos))
    }

    async fn insert_users_and_todos(
        &self,
        users: &[GeneratedUser],
        builder: &mut BatchBuilder,
    ) -> Result<CombinedInsert, SeedError> {
        self.begin_call()?;
        let user_ids = Self::append(&self.users, users);
        let todos = builder.todos_for_users(&user_ids);
        let todo_ids = Self::append(&self.todos, &todos);
        Ok(CombinedInsert { user_ids, todo_ids })
    }
}
