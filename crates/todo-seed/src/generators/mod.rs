//! Entity generators for seed data.
//!
//! - [`TodoGenerator`]: random todo titles and descriptions from fixed vocabularies
//! - [`UserGenerator`]: sequentially numbered users for the combined seeding path

pub mod todo;
pub mod user;

pub use todo::{GeneratedTodo, TodoGenerator};
pub use user::{GeneratedUser, UserGenerator};
