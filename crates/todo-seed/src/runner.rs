//! The seeding loop: build a batch, insert it, accumulate its timing.

use std::time::Instant;

use tracing::info;

use crate::builders::{BatchBuilder, TODOS_PER_USER};
use crate::config::{SeedConfig, SeedMode};
use crate::db::{SeedError, Seeder, TodoStore};
use crate::generators::UserGenerator;
use crate::report::RunStats;

/// Runs every batch `config` describes and returns the accumulated stats.
///
/// A batch that fails under [`FailurePolicy::Skip`](crate::config::FailurePolicy::Skip)
/// is recorded with its elapsed time and no inserted rows; the loop continues.
pub async fn run<S: TodoStore>(
    seeder: &Seeder<S>,
    config: &SeedConfig,
    builder: &mut BatchBuilder,
) -> Result<RunStats, SeedError> {
    config.validate()?;
    match config.mode {
        SeedMode::Todos => run_todos(seeder, config, builder).await,
        SeedMode::UsersAndTodos => run_users_and_todos(seeder, config, builder).await,
    }
}

/// Inserts `batch_count` full pages of todos owned by `config.user_id`.
pub async fn run_todos<S: TodoStore>(
    seeder: &Seeder<S>,
    config: &SeedConfig,
    builder: &mut BatchBuilder,
) -> Result<RunStats, SeedError> {
    let batch_count = config.batch_count();
    let mut stats = RunStats::new();

    info!(
        "Inserting {} todos in {} batches of {} for user {}",
        batch_count * config.page_size as u64,
        batch_count,
        config.page_size,
        config.user_id
    );

    for batch in 1..=batch_count {
        let todos = builder.todo_batch(config.page_size, config.user_id);

        let start = Instant::now();
        let outcome = seeder.seed_todos(&todos).await?;
        let elapsed = start.elapsed();

        stats.record(todos.len(), elapsed, outcome.map(|ids| ids.len()));
        log_progress(batch, batch_count, elapsed.as_secs_f64(), &stats);
    }

    Ok(stats)
}

/// Inserts `config.user_count` new users with ten todos each.
///
/// Users are inserted `users_per_batch` at a time; each batch commits its
/// users and their todos together.
pub async fn run_users_and_todos<S: TodoStore>(
    seeder: &Seeder<S>,
    config: &SeedConfig,
    builder: &mut BatchBuilder,
) -> Result<RunStats, SeedError> {
    let users_per_batch = config.users_per_batch() as u64;
    let batch_count = config.user_count.div_ceil(users_per_batch);
    let user_gen = UserGenerator::with_offset(config.user_offset);
    let mut stats = RunStats::new();

    info!(
        "Inserting {} users and {} todos in {} batches",
        config.user_count,
        config.user_count.saturating_mul(TODOS_PER_USER as u64),
        batch_count
    );

    for batch in 1..=batch_count {
        let first = (batch - 1) * users_per_batch;
        let last = first.saturating_add(users_per_batch).min(config.user_count);
        let users = user_gen.generate_batch(first..last);
        let requested = users.len() * (1 + TODOS_PER_USER);

        let start = Instant::now();
        let outcome = seeder.seed_users_and_todos(&users, builder).await?;
        let elapsed = start.elapsed();

        stats.record(
            requested,
            elapsed,
            outcome.map(|inserted| inserted.user_ids.len() + inserted.todo_ids.len()),
        );
        log_progress(batch, batch_count, elapsed.as_secs_f64(), &stats);
    }

    Ok(stats)
}

fn log_progress(batch: u64, batch_count: u64, batch_secs: f64, stats: &RunStats) {
    info!(
        "Batch {}/{} took {:.3} seconds, running total {:.2} seconds",
        batch,
        batch_count,
        batch_secs,
        stats.total_elapsed().as_secs_f64()
    );
}
