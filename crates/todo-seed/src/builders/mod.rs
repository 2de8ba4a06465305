//! Builders for assembling insert batches.

pub mod batch;

pub use batch::{BatchBuilder, TODOS_PER_USER};
