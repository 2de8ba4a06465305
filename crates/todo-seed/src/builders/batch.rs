//! Batch construction for bulk inserts.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::generators::{GeneratedTodo, TodoGenerator};

/// Number of todos created for every user in the combined seeding path.
pub const TODOS_PER_USER: usize = 10;

/// Assembles batches of todos ready for a single bulk insert.
///
/// The builder owns its random source so it can be handed to a store that
/// needs to generate rows mid-transaction (see
/// [`TodoStore::insert_users_and_todos`](crate::db::TodoStore::insert_users_and_todos)).
#[derive(Debug, Clone)]
pub struct BatchBuilder {
    generator: TodoGenerator,
    rng: StdRng,
}

impl Default for BatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchBuilder {
    /// Creates a builder backed by an entropy-seeded random source.
    pub fn new() -> Self {
        Self {
            generator: TodoGenerator::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Replaces the random source with a seeded one for reproducible batches.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Builds `size` todos, all owned by `user_id`.
    pub fn todo_batch(&mut self, size: usize, user_id: i64) -> Vec<GeneratedTodo> {
        (0..size)
            .map(|_| self.generator.generate(user_id, &mut self.rng))
            .collect()
    }

    /// Builds [`TODOS_PER_USER`] todos for each of `user_ids`, in id order.
    pub fn todos_for_users(&mut self, user_ids: &[i64]) -> Vec<GeneratedTodo> {
        let mut todos = Vec::with_capacity(user_ids.len() * TODOS_PER_USER);
        for &user_id in user_ids {
            for _ in 0..TODOS_PER_USER {
                todos.push(self.generator.generate(user_id, &mut self.rng));
            }
        }
        todos
    }
}
