//! Bulk seed script - inserts generated todos and reports throughput
//!
//! Run with:
//! ```
//! DATABASE_URL=postgres://... cargo run --release -p todo-seed --bin seed -- --total-records 1000000
//! ```

use clap::Parser;
use todo_seed::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SeedArgs::parse().into_config()?;
    let options = DbConfig::from_env()?.connect_options()?;

    let store = PgStore::new(options, config.page_size)
        .with_tables(&config.users_table, &config.todos_table);
    let seeder = Seeder::new(store).with_policy(config.failure_policy);

    let mut builder = BatchBuilder::new();
    if let Some(seed) = config.seed {
        builder = builder.with_seed(seed);
    }

    let stats = run(&seeder, &config, &mut builder).await?;
    stats.log_summary();

    Ok(())
}
